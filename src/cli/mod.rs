use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "aircheck",
    about = "Aircheck - Match radio show uploads to broadcast metadata",
    version,
    long_about = "A CLI tool and JSON API for radio automation intake. Extracts show names and broadcast dates from upload filenames (ShowName_MMDDYY.ext), resolves aliases against a show catalog, and previews parse results before files are committed to the transcode workflow."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a filename into show name and broadcast date
    Parse {
        /// Filename to parse (e.g. AnswersInGenesis_100424.wav)
        #[arg(value_name = "FILENAME")]
        filename: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Parse every audio file in a directory and report the results
    Scan {
        /// Directory containing uploaded audio files
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Suggest the canonical filename for a show and date
    Suggest {
        /// Show name (e.g. "Answers In Genesis")
        #[arg(value_name = "SHOW")]
        show: String,

        /// Broadcast date in YYYY-MM-DD form
        #[arg(value_name = "DATE")]
        date: String,

        /// File extension for the suggested name
        #[arg(short, long, value_name = "EXT")]
        format: Option<String>,
    },

    /// Validate a filename template (ShowName_MMDDYY shape)
    Validate {
        /// Template to check
        #[arg(value_name = "PATTERN")]
        pattern: String,
    },

    /// Find the catalog show a filename belongs to
    Match {
        /// Filename to match against the show catalog
        #[arg(value_name = "FILENAME")]
        filename: String,
    },

    /// List the show catalog with aliases
    Shows,

    /// Run the JSON preview API
    Serve {
        /// Bind address (overrides the configured one)
        #[arg(short, long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Show or initialize configuration
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON, identical to the API endpoint's response
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
