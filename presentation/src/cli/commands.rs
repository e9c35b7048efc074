//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for sous
#[derive(Parser, Debug)]
#[command(name = "sous")]
#[command(author, version, about = "Sous - AI cooking assistant grounded in your saved data")]
#[command(long_about = r#"
Sous chats with an AI assistant that knows your saved recipes, meal plan,
and shopping list — as far as your privacy toggles allow.

Configuration files are loaded from (in priority order):
1. SOUS_* environment variables
2. --config <path>     Explicit config file
3. ./sous.toml         Project-level config
4. ~/.config/sous/config.toml   Global config

The API key comes from the ANTHROPIC_API_KEY environment variable (or the
[api] section of the config file).

Example:
  sous "What can I cook tonight?"
  sous --chat
  sous --chat --demo
"#)]
pub struct Cli {
    /// A single question to ask (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Seed the in-memory store with sample data
    #[arg(long)]
    pub demo: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the turn spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,
}
