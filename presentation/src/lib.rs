//! Presentation layer for sous
//!
//! CLI argument parsing, the interactive chat REPL, and console formatting
//! of the conversation transcript. The mobile app this core was built for
//! renders the transcript in its own views; this crate is the terminal
//! stand-in.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

pub use chat::ChatRepl;
pub use cli::Cli;
pub use output::ConsoleFormatter;
pub use progress::TurnSpinner;
