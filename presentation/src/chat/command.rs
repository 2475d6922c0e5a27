//! Slash-command parsing for the chat REPL

use thiserror::Error;

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Plain text: send it on the active thread
    Send(String),
    New,
    Threads,
    Switch(String),
    Models,
    Model(String),
    Servers,
    AddServer { name: String, url: String },
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unknown command: {0} (type /help for available commands)")]
    Unknown(String),
}

/// `(command, description)` pairs for `/help`
pub const HELP: &[(&str, &str)] = &[
    ("/new", "Start a new thread"),
    ("/threads", "List threads (* marks the active one)"),
    ("/switch <id>", "Switch to a thread and load its messages"),
    ("/models", "List models"),
    ("/model <name>", "Select the model for new messages"),
    ("/servers", "List tool servers"),
    ("/add-server <name> <url>", "Register a tool server"),
    ("/show", "Show the active thread again"),
    ("/help", "Show this help"),
    ("/quit", "Exit"),
];

impl ReplCommand {
    /// Parse a non-empty, trimmed input line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(ReplCommand::Send(line.to_string()));
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match (name, args.as_slice()) {
            ("new", []) => Ok(ReplCommand::New),
            ("threads" | "t", []) => Ok(ReplCommand::Threads),
            ("switch" | "s", [id]) => Ok(ReplCommand::Switch(id.to_string())),
            ("switch" | "s", _) => Err(CommandError::Usage("/switch <id>")),
            ("models", []) => Ok(ReplCommand::Models),
            ("model", [model]) => Ok(ReplCommand::Model(model.to_string())),
            ("model", _) => Err(CommandError::Usage("/model <name>")),
            ("servers", []) => Ok(ReplCommand::Servers),
            ("add-server", [name, url]) => Ok(ReplCommand::AddServer {
                name: name.to_string(),
                url: url.to_string(),
            }),
            ("add-server", _) => Err(CommandError::Usage("/add-server <name> <url>")),
            ("show", []) => Ok(ReplCommand::Show),
            ("help" | "h" | "?", []) => Ok(ReplCommand::Help),
            ("quit" | "exit" | "q", []) => Ok(ReplCommand::Quit),
            _ => Err(CommandError::Unknown(line.to_string())),
        }
    }
}
