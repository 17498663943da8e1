//! `lambda-router` CLI entry point.
//!
//! This binary is the composition root for local use of the router. It:
//!
//! 1. **Parses configuration** from flags and environment ([`config`]).
//! 2. **Wires observability** with a stderr `tracing-subscriber` layer
//!    ([`observability`]).
//! 3. **Runs one subcommand** against a captured event file (or stdin):
//!    `classify`, `normalize`, or `invoke` through the [`demo`] router.

mod config;
mod demo;
mod observability;

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use router::{classify, RawEvent};
use tracing::info;

use config::{Cli, Command};
use demo::{build_router, InvocationContext};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    observability::init(&cli.settings)?;

    match cli.command {
        Command::Classify { input } => {
            let raw = read_event(&input)?;
            println!("{}", classify(&raw));
        }
        Command::Normalize { input } => {
            let raw = read_event(&input)?;
            let kind = classify(&raw);
            let event = events::normalize(kind, &raw)
                .with_context(|| format!("failed to normalize {kind} event"))?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        Command::Invoke {
            input,
            routes,
            no_fallback,
        } => {
            let raw = read_event(&input)?;
            let router = build_router(&routes, !no_fallback).context("failed to register handlers")?;
            let ctx = InvocationContext::new(&cli.settings.function_name, cli.settings.request_id.clone());
            info!(
                request_id = %ctx.request_id,
                function_name = %ctx.function_name,
                routes = routes.len(),
                fallback = router.has_fallback(),
                "invoking"
            );
            let output = router
                .dispatch(raw, &ctx)
                .with_context(|| format!("dispatch failed for request {}", ctx.request_id))?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

/// Reads one JSON event from `path`, or from stdin when `path` is `-`.
fn read_event(path: &Path) -> anyhow::Result<RawEvent> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read event from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read event file {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("event in {} is not valid JSON", path.display()))
}
