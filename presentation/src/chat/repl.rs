//! REPL (Read-Eval-Print Loop) for interactive chat

use super::command::{HELP, ReplCommand};
use crate::ConsoleFormatter;
use crate::ReplConfig;
use colored::Colorize;
use mcp_chat_application::{BootstrapReport, LoadOutcome, SendError, SendOutcome, SessionStore};
use mcp_chat_domain::{Message, Role, ThreadId};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::sync::Arc;
use tracing::warn;

const HISTORY_CAPACITY: usize = 1000;

/// What the loop does after a command
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive chat REPL
pub struct ChatRepl {
    store: Arc<SessionStore>,
    config: ReplConfig,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self {
            store,
            config: ReplConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL until `/quit` or Ctrl-D.
    ///
    /// Must be called on a multi-threaded runtime: line reading blocks the
    /// current worker via `block_in_place`.
    pub async fn run(&self, report: &BootstrapReport) -> std::io::Result<()> {
        if !self.config.color {
            colored::control::set_override(false);
        }

        let mut editor = self.build_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("mcp-chat".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome(report);

        loop {
            let signal = tokio::task::block_in_place(|| editor.read_line(&prompt))?;

            match signal {
                Signal::Success(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    match ReplCommand::parse(line) {
                        Ok(command) => {
                            if self.execute(command).await == Flow::Exit {
                                break;
                            }
                        }
                        Err(e) => println!("{}", ConsoleFormatter::error(&e.to_string())),
                    }
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                // Ctrl-D
                _ => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    fn build_editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.config.history_file else {
            return editor;
        };

        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("History file {} unavailable: {}", path.display(), e);
                editor
            }
        }
    }

    fn print_welcome(&self, report: &BootstrapReport) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│                  mcp-chat                   │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        print!("{}", ConsoleFormatter::format_bootstrap(report));
        print!("{}", ConsoleFormatter::format_status(&self.store.snapshot()));
        println!(
            "Type a message to chat, {} for commands.",
            "/help".cyan()
        );
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        for (command, description) in HELP {
            println!("  {:<26} - {}", command.cyan(), description);
        }
        println!();
    }

    async fn execute(&self, command: ReplCommand) -> Flow {
        match command {
            ReplCommand::Send(text) => self.send(&text).await,
            ReplCommand::New => {
                let id = self.store.create_new_thread();
                println!("{}", ConsoleFormatter::notice(&format!("New thread {}", id)));
            }
            ReplCommand::Threads => {
                if let Err(e) = self.store.load_threads().await {
                    println!("{}", ConsoleFormatter::error(&format!("showing cached threads: {}", e)));
                }
                let snapshot = self.store.snapshot();
                print!(
                    "{}",
                    ConsoleFormatter::format_threads(
                        &snapshot.threads,
                        snapshot.active_thread_id.as_ref()
                    )
                );
            }
            ReplCommand::Switch(id) => self.switch(ThreadId::new(id)).await,
            ReplCommand::Models => {
                if let Err(e) = self.store.load_models().await {
                    println!("{}", ConsoleFormatter::error(&format!("showing cached models: {}", e)));
                }
                print!(
                    "{}",
                    ConsoleFormatter::format_models(
                        &self.store.known_models(),
                        &self.store.selected_model()
                    )
                );
            }
            ReplCommand::Model(name) => match self.store.set_selected_model(name.as_str()) {
                Ok(()) => println!("{}", ConsoleFormatter::notice(&format!("Using {}", name))),
                Err(e) => println!("{}", ConsoleFormatter::error(&e.to_string())),
            },
            ReplCommand::Servers => {
                if let Err(e) = self.store.load_servers().await {
                    println!("{}", ConsoleFormatter::error(&format!("showing cached servers: {}", e)));
                }
                print!("{}", ConsoleFormatter::format_servers(&self.store.known_servers()));
            }
            ReplCommand::AddServer { name, url } => {
                match self.store.add_server(&name, &url).await {
                    Ok(()) => {
                        print!("{}", ConsoleFormatter::format_servers(&self.store.known_servers()))
                    }
                    Err(e) => println!("{}", ConsoleFormatter::error(&e.to_string())),
                }
            }
            ReplCommand::Show => {
                let snapshot = self.store.snapshot();
                print!("{}", ConsoleFormatter::format_status(&snapshot));
                print!("{}", ConsoleFormatter::format_timeline(&snapshot.current_timeline));
            }
            ReplCommand::Help => self.print_help(),
            ReplCommand::Quit => {
                println!("Bye!");
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    async fn send(&self, text: &str) {
        match self.store.send_message(text).await {
            Ok(SendOutcome::ThreadCreated(id)) => {
                println!(
                    "{}",
                    ConsoleFormatter::notice(&format!(
                        "Started thread {}. Send your message again to deliver it.",
                        id
                    ))
                );
            }
            Ok(SendOutcome::Delivered { thread_id, reload }) => match reload {
                LoadOutcome::Applied => {
                    print!("{}", ConsoleFormatter::format_timeline(reply(&self.store.current_timeline())));
                }
                LoadOutcome::Cleared => println!(
                    "{}",
                    ConsoleFormatter::error("message sent, but the thread could not be reloaded")
                ),
                LoadOutcome::Stale | LoadOutcome::Cancelled => println!(
                    "{}",
                    ConsoleFormatter::notice(&format!(
                        "Reply saved to thread {}; /switch {} to read it.",
                        thread_id, thread_id
                    ))
                ),
            },
            Ok(SendOutcome::NotDelivered(_)) => println!(
                "{}",
                ConsoleFormatter::error("the backend did not accept the message")
            ),
            Err(SendError::Busy) => println!(
                "{}",
                ConsoleFormatter::error("still waiting for the previous reply")
            ),
            Err(e) => println!("{}", ConsoleFormatter::error(&e.to_string())),
        }
    }

    async fn switch(&self, id: ThreadId) {
        match self.store.switch_thread(&id).await {
            Ok(LoadOutcome::Applied) => {
                print!("{}", ConsoleFormatter::format_timeline(&self.store.current_timeline()));
            }
            Ok(LoadOutcome::Cleared) => println!(
                "{}",
                ConsoleFormatter::error(&format!("could not load messages for {}", id))
            ),
            // Superseded by a later switch
            Ok(LoadOutcome::Stale | LoadOutcome::Cancelled) => {}
            Err(e) => println!("{}", ConsoleFormatter::error(&e.to_string())),
        }
    }
}

/// Messages after the last human message: the reply to the latest prompt
fn reply(timeline: &[Message]) -> &[Message] {
    let start = timeline
        .iter()
        .rposition(|m| m.role() == Role::Human)
        .map_or(0, |i| i + 1);
    &timeline[start..]
}
