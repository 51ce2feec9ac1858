//! Tinkerglot CLI - translate Gremlin traversals from the shell.
//!
//! Thin front end over the library: every command parses its input, calls
//! the translator and prints the result as a table or as JSON.

mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tinkerglot::{Config, Mode, QuoteStyle};

/// Gremlin translation tool.
///
/// Renders a traversal in canonical form, anonymized, or as source for any
/// TinkerPop language variant.
#[derive(Parser)]
#[command(name = "tinkerglot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Suppress info messages and output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

/// Output format options.
#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// Machine-readable JSON format
    Json,
}

/// String delimiter forced onto the output.
#[derive(Clone, Copy, ValueEnum)]
enum QuoteArg {
    /// 'single'
    Single,
    /// "double"
    Double,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Translate a traversal
    Translate {
        /// The traversal, or `-` to read it from stdin
        query: String,

        /// Target: canonical, anonymized, dotnet, go, groovy, java, javascript or python
        #[arg(long, default_value = "canonical")]
        to: Mode,

        /// Render every mode at once
        #[arg(long, conflicts_with = "to")]
        all: bool,

        /// Name rendered for the traversal source
        #[arg(long, default_value = "g")]
        source_name: String,

        /// Force one string delimiter
        #[arg(long)]
        quote: Option<QuoteArg>,
    },

    /// List the bound parameters of a traversal
    Params {
        /// The traversal, or `-` to read it from stdin
        query: String,
    },

    /// Decode a JSON request body and translate its script
    Request {
        /// Request body file, or `-` for stdin
        input: PathBuf,

        /// Target the script is translated to
        #[arg(long, default_value = "canonical")]
        to: Mode,

        /// `Accept` header to negotiate a response type for
        #[arg(long)]
        accept: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    } else if !cli.quiet {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match cli.command {
        Commands::Translate {
            query,
            to,
            all,
            source_name,
            quote,
        } => {
            let mut config = Config::new().with_source_name(source_name);
            if let Some(quote) = quote {
                config = config.with_quote_style(match quote {
                    QuoteArg::Single => QuoteStyle::Single,
                    QuoteArg::Double => QuoteStyle::Double,
                });
            }
            let target = if all { None } else { Some(to) };
            commands::translate::run(&query, target, config, cli.format, cli.quiet)
        }
        Commands::Params { query } => commands::params::run(&query, cli.format, cli.quiet),
        Commands::Request { input, to, accept } => {
            commands::request::run(&input, to, accept.as_deref(), cli.format, cli.quiet)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
