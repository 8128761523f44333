//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for raimon
#[derive(Parser, Debug)]
#[command(name = "raimon")]
#[command(author, version, about = "R.A.I.M.O.N. - Reasoning Artificial Intelligence for Mentorship, Orientation, and Nudging")]
#[command(long_about = r#"
R.A.I.M.O.N. is a conversational mentor that answers in Portuguese, following
the "Pense Comigo" technique and the Teoria da Permissão.

Every chat is saved as one file in the storage directory and can be reopened
by its title (the first 30 characters of the first message you sent).

Configuration files are loaded from (in priority order):
1. RAIMON_* environment variables (e.g. RAIMON_MODELS__DEFAULT=gpt-4o)
2. --config <path>     Explicit config file
3. ./raimon.toml       Project-level config
4. ~/.config/raimon/config.toml   Global config

Example:
  raimon                          Start the interactive chat
  raimon "Estou com medo de mudar de emprego"
  raimon --open "Estou com medo de mudar de e"
  raimon --list
"#)]
pub struct Cli {
    /// Send a single prompt, print the answer and exit
    pub prompt: Option<String>,

    /// Model for this session (gpt-3.5-turbo or gpt-4o)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Focus for this session (key or label, e.g. pense-comigo)
    #[arg(short, long, value_name = "FOCUS")]
    pub focus: Option<String>,

    /// Continue the chat with this title
    #[arg(long, value_name = "TITLE")]
    pub open: Option<String>,

    /// List saved chat titles and exit
    #[arg(short, long)]
    pub list: bool,

    /// Delete the chat with this title and exit
    #[arg(long, value_name = "TITLE")]
    pub delete: Option<String>,

    /// Directory holding saved chats
    #[arg(long, value_name = "DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    pub print_default_config: bool,
}
