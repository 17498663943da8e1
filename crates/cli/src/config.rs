//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use router::RouteSpec;

#[derive(Debug, Parser)]
#[command(name = "lambda-router")]
#[command(about = "Classify, normalize, and dispatch AWS Lambda events locally")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Default log filter; `RUST_LOG` takes precedence when set
    #[arg(long, env = "LAMBDA_ROUTER_LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    /// Log output format
    #[arg(
        long,
        env = "LAMBDA_ROUTER_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty,
        global = true
    )]
    pub log_format: LogFormat,

    /// Function name placed in the invocation context
    #[arg(
        long,
        env = "AWS_LAMBDA_FUNCTION_NAME",
        default_value = "lambda-router",
        global = true
    )]
    pub function_name: String,

    /// Request id placed in the invocation context (default: a fresh UUID v4)
    #[arg(long, global = true)]
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the detected event kind
    Classify {
        /// Event file, or `-` for stdin
        #[arg(value_name = "EVENT_FILE")]
        input: PathBuf,
    },

    /// Print the normalized record as pretty JSON
    Normalize {
        /// Event file, or `-` for stdin
        #[arg(value_name = "EVENT_FILE")]
        input: PathBuf,
    },

    /// Dispatch the event through the demo router and print the handler's summary
    Invoke {
        /// Event file, or `-` for stdin
        #[arg(value_name = "EVENT_FILE")]
        input: PathBuf,

        /// HTTP route to register, as "METHOD /path/{param}" (repeatable)
        #[arg(
            long = "route",
            value_name = "ROUTE",
            default_values = ["GET /users/{id}", "POST /users"]
        )]
        routes: Vec<RouteSpec>,

        /// Do not register a fallback handler
        #[arg(long)]
        no_fallback: bool,
    },
}
