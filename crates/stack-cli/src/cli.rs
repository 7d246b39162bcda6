//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use stack_core::OptionRef;
use std::path::PathBuf;

/// stackmix - Compose deployments from layered YAML fragments
#[derive(Parser, Debug)]
#[command(name = "stackmix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (default: ~/.config/stackmix/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fragment store root, overriding the settings file
    #[arg(long, global = true, env = "STACKMIX_DIR", value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Selection state file, overriding the settings file
    #[arg(long, global = true, env = "STACKMIX_STATE", value_name = "PATH")]
    pub state: Option<PathBuf>,

    /// Container engine CLI
    #[arg(
        long,
        global = true,
        env = "STACKMIX_ENGINE",
        default_value = "docker",
        value_name = "PROGRAM"
    )]
    pub engine: String,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List every option with its toggles and whether it is running
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print an option's resolved document
    ///
    /// Examples:
    ///   stackmix show db/postgres
    ///   stackmix show db/postgres --json
    Show {
        /// Option as <category>/<option>
        option: OptionRef,

        /// Output as JSON instead of YAML
        #[arg(long)]
        json: bool,
    },

    /// Print the merged document of every enabled option
    Global {
        /// Output as JSON instead of YAML
        #[arg(long)]
        json: bool,
    },

    /// Print the container, network and volume names an option declares
    Names {
        /// Option as <category>/<option>
        option: OptionRef,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Enable an option
    Enable {
        /// Option as <category>/<option>
        option: OptionRef,
    },

    /// Disable an option
    Disable {
        /// Option as <category>/<option>
        option: OptionRef,
    },

    /// Flip an option between enabled and disabled
    Toggle {
        /// Option as <category>/<option>
        option: OptionRef,
    },

    /// Activate or deactivate an addon of an option
    ///
    /// Examples:
    ///   stackmix addon db/postgres network
    ///   stackmix addon db/postgres network --off
    Addon {
        /// Option as <category>/<option>
        option: OptionRef,

        /// Addon name
        addon: String,

        /// Deactivate instead of activate
        #[arg(long)]
        off: bool,
    },

    /// Show the containers, networks and volumes the engine reports
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Apply the global document (`compose up -d`)
    Up,

    /// Tear down the global document (`compose down`)
    Down,

    /// Start an option's containers
    Start {
        /// Option as <category>/<option>
        option: OptionRef,
    },

    /// Stop an option's containers
    Stop {
        /// Option as <category>/<option>
        option: OptionRef,
    },

    /// Restart an option's containers
    Restart {
        /// Option as <category>/<option>
        option: OptionRef,
    },

    /// Pull the images an option uses
    Pull {
        /// Option as <category>/<option>
        option: OptionRef,
    },

    /// Keep polling the engine and reprint the option table on each refresh
    ///
    /// Press Enter (or close stdin) to stop.
    Watch {
        /// Seconds between polls, overriding the settings file
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,
    },
}
