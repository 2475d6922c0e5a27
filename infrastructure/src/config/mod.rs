//! Configuration file loading for mcp-chat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./mcp-chat.toml` or `./.mcp-chat.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/mcp-chat/config.toml`
//! 4. Environment: `MCP_CHAT_<SECTION>__<KEY>`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBackendConfig, FileConfig, FileReplConfig, FileSessionConfig,
};
pub use loader::ConfigLoader;
