//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for mcp-chat
#[derive(Parser, Debug)]
#[command(name = "mcp-chat")]
#[command(author, version, about = "Terminal chat client for an MCP-enabled LLM backend")]
#[command(long_about = r#"
mcp-chat connects to a chat backend that runs local models with MCP tool
servers attached, and lets you hold threaded conversations with them.

On start it loads the backend's threads, models and tool servers, then
opens an interactive prompt. Type a message to send it on the active
thread, or /help for commands.

Configuration files are loaded from (in priority order):
1. --config <path>                   Explicit config file
2. ./mcp-chat.toml                   Project-level config
3. ~/.config/mcp-chat/config.toml    Global config
4. MCP_CHAT_<SECTION>__<KEY>         Environment variables

Example:
  mcp-chat
  mcp-chat --base-url http://192.168.1.20:3000 --model llama3
  mcp-chat -vv --log-dir ./logs
"#)]
pub struct Cli {
    /// Backend base URL (overrides backend.base_url)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Model to select before the model list is loaded (overrides session.default_model)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to daily files in this directory instead of stderr
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["mcp-chat"]);
        assert!(cli.base_url.is_none());
        assert!(cli.model.is_none());
        assert_eq!(cli.verbose, 0);
        assert!(!cli.no_config);
    }

    #[test]
    fn test_overrides_and_verbosity() {
        let cli = Cli::parse_from([
            "mcp-chat",
            "--base-url",
            "http://10.0.0.2:3000",
            "-m",
            "llama3",
            "-vv",
            "--show-config",
        ]);
        assert_eq!(cli.base_url.as_deref(), Some("http://10.0.0.2:3000"));
        assert_eq!(cli.model.as_deref(), Some("llama3"));
        assert_eq!(cli.verbose, 2);
        assert!(cli.show_config);
    }
}
