//! Application-level configuration.
//!
//! - [`SessionConfig`] — defaults and naming used by the session store

pub mod session_config;

pub use session_config::SessionConfig;
