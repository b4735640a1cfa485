//! CLI support for the `ulib` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod output;
