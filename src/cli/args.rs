use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "breathe")]
#[command(about = "Guided breathing sessions in the terminal")]
#[command(long_about = "breathe - Guided breathing sessions in the terminal

Paced breathing techniques with an animated indicator, a phase countdown
and a practice log.

QUICK START:
  breathe techniques          List available techniques
  breathe run box             Start an interactive Box Breathing session
  breathe simulate 4-7-8      Print the timeline of a session
  breathe history             Show recent practice

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  breathe <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output, or 'json' for
    /// machine-readable output. Defaults to `general.default_output` from
    /// the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List breathing techniques
    ///
    /// Shows the built-in techniques followed by any defined in the config
    /// file. Config entries that fail validation are listed as warnings.
    ///
    /// # Examples
    ///
    ///   breathe techniques
    ///   breathe list -o json
    #[command(alias = "list", alias = "ls")]
    Techniques,

    /// Show one technique in detail
    ///
    /// Lists each phase with its label and length, the cycle and session
    /// length, and the breathing rate.
    ///
    /// # Examples
    ///
    ///   breathe show box
    ///   breathe show 1
    Show {
        /// Technique number or name prefix
        technique: String,
    },

    /// Start an interactive session
    ///
    /// Keys: space start/pause, r reset, 1-9 or j/k select, q quit.
    /// Completed sessions are added to the practice log.
    ///
    /// # Examples
    ///
    ///   breathe run
    ///   breathe run deep
    #[command(alias = "r")]
    Run {
        /// Technique number or name prefix (default from config)
        technique: Option<String>,
    },

    /// Run a session on a virtual clock and print its timeline
    ///
    /// # Examples
    ///
    ///   breathe simulate 4-7-8
    ///   breathe simulate box --cycles 2
    ///   breathe simulate --pattern 4-2-6 --cycles 3
    ///   breathe simulate deep --ticks 20 -o json
    #[command(alias = "sim")]
    Simulate(SimulateArgs),

    /// Show the practice log
    ///
    /// # Examples
    ///
    ///   breathe history
    ///   breathe history --days 30
    ///   breathe history --date 2024-05-01
    History {
        /// Number of days to cover, ending today
        #[arg(long, short = 'd', default_value_t = 7)]
        days: u32,

        /// A single day (YYYY-MM-DD)
        #[arg(long, conflicts_with = "days")]
        date: Option<String>,
    },

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   breathe completions zsh > ~/.zsh/completions/_breathe
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for `simulate`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SimulateArgs {
    /// Technique number or name prefix
    #[arg(required_unless_present = "pattern")]
    pub technique: Option<String>,

    /// Override the number of cycles
    #[arg(long, short = 'c')]
    pub cycles: Option<u32>,

    /// Stop after this many seconds
    #[arg(long, short = 't')]
    pub ticks: Option<u64>,

    /// Use a custom pattern such as 4-7-8
    #[arg(long, short = 'p')]
    pub pattern: Option<String>,
}

/// Arguments for `config`.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the config file location
    Path,
}
