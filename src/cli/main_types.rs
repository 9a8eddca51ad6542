use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "infinibrowser")]
#[command(about = "Command line interface for the Infinibrowser API")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// Override the profile's base URL
    #[arg(long, global = true, env = "INFINIBROWSER_BASE_URL")]
    pub base_url: Option<String>,

    /// Override the profile's request timeout
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show an element
    Item {
        /// Element id, e.g. "Water"
        id: String,
    },
    /// List recipes that produce an element
    Recipes {
        id: String,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// List recipes that use an element
    Uses {
        id: String,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Show the lineage of an element
    Lineage { id: String },
    /// Show a user-submitted lineage
    CustomLineage { id: String },
    /// Ask the service to shorten an element's lineage
    Optimize { id: String },
    /// Share a lineage read from a JSON file of steps
    Share {
        /// File holding a JSON array of [first, second, result] steps
        steps_file: String,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set a configuration value on the active profile
    Set {
        /// base_url, timeout_ms or header.<name>
        key: String,
        value: String,
    },
}
