use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod logging;

use commands::{BuildContext, Overrides};

#[derive(Parser)]
#[command(
    name = "docver",
    version,
    about = "Version substitutions for the Coopr docs build"
)]
struct Cli {
    /// Docs settings file; defaults apply when it does not exist.
    #[arg(long, global = true, default_value = "docver.json")]
    config: PathBuf,

    /// Build descriptor to read instead of the configured one.
    #[arg(long, global = true)]
    descriptor: Option<PathBuf>,

    /// Suffix stripped from the full version to form the release.
    #[arg(long, global = true)]
    suffix: Option<String>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the SDK version line.
    Version,
    /// Print the release form of the version.
    Release,
    /// Print the full declared version.
    Full,
    /// Print the reStructuredText epilog.
    Epilog,
    /// Print the short HTML title.
    Title,
    /// Print every substitution as JSON.
    Substitutions,
    /// Print or write the versions JSONP payload.
    JsonVersions {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the file name the versions payload is served as.
    JsonVersionsFile,
    /// Fail unless the version resolves and is listed in the versions data.
    Check,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.log_file.as_deref());

    let overrides = Overrides {
        descriptor: cli.descriptor,
        suffix: cli.suffix,
    };
    let ctx = BuildContext::load(&cli.config, overrides)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let status = match cli.command {
        Command::Version => commands::version(&ctx, &mut out)?,
        Command::Release => commands::release(&ctx, &mut out)?,
        Command::Full => commands::full(&ctx, &mut out)?,
        Command::Epilog => commands::epilog(&ctx, &mut out)?,
        Command::Title => commands::title(&ctx, &mut out)?,
        Command::Substitutions => commands::substitutions(&ctx, &mut out)?,
        Command::JsonVersions { output } => {
            commands::json_versions(&ctx, output.as_deref(), &mut out)?
        }
        Command::JsonVersionsFile => commands::json_versions_file(&ctx, &mut out)?,
        Command::Check => commands::check(&ctx, &mut out)?,
    };

    out.flush()?;
    Ok(status.into())
}
