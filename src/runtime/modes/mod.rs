//! Execution modes: the HTTP server and one-shot CLI commands

pub mod cli;
pub mod server;

pub use server::run_server;
