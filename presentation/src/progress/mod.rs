//! Busy indicators

pub mod reporter;
