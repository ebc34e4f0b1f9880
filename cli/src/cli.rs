//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Download, inject and serve the Tarko agent UI bundle
#[derive(Parser)]
#[command(
    name = "agent-ui",
    version,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Answer yes to every prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Download the UI bundle into the asset directory
    Download(commands::download::DownloadArgs),

    /// Print the asset directory
    Path,

    /// Print the entry HTML with runtime config injected
    Html(commands::html::HtmlArgs),

    /// Serve the UI over HTTP
    Serve(commands::serve::ServeArgs),

    /// Show the installed bundle version
    Version(commands::version::VersionArgs),
}

impl Cli {
    /// Returns `true` when the invocation runs the long-lived server.
    #[must_use]
    pub fn is_server(&self) -> bool {
        matches!(self.command, Command::Serve(_))
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
        })?;

        match command {
            Command::Download(args) => commands::download::run(&app, &args),
            Command::Path => commands::path::run(&app),
            Command::Html(args) => commands::html::run(&app, &args),
            Command::Serve(args) => commands::serve::run(&app, args).await,
            Command::Version(args) => commands::version::run(&app, &args),
        }
    }
}
