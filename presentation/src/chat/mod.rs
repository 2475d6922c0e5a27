//! Interactive chat module
//!
//! Provides a line-editor based interactive chat interface over a
//! [`SessionStore`](mcp_chat_application::SessionStore).

mod command;
mod repl;

pub use command::{CommandError, ReplCommand};
pub use repl::ChatRepl;
