mod config;
mod diff;
mod report;
mod run;
mod validation;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a config-driven synchronization across all configured locales.
    Run {
        /// Path to the run configuration file
        #[arg(short, long, default_value = "stringsync.toml")]
        config: String,
    },

    /// Compare one Android/iOS file pair and print or write a report.
    Diff {
        /// The Android strings.xml file
        #[arg(long)]
        android: String,

        /// The iOS .strings file
        #[arg(long)]
        ios: String,

        /// Optional path to write the report to instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let args = Args::parse();

    let result = match args.commands {
        Commands::Run { config } => run::run_sync_command(&config),
        Commands::Diff {
            android,
            ios,
            output,
            json,
        } => diff::run_diff_command(diff::DiffOptions {
            android,
            ios,
            output,
            json,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
