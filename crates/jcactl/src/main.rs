use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jcactl::common;
use jcactl::{cmd_canonical, cmd_check, cmd_drivers, cmd_show};

#[derive(Parser, Debug)]
#[command(name = "jcactl", version, about = "JCA descriptor CLI")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Output JSON where applicable
    #[arg(long)]
    json: bool,
    /// Keep ${...} expressions verbatim instead of resolving them
    #[arg(long)]
    no_expressions: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Parse and validate descriptors
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print a summary of one descriptor
    Show { file: PathBuf },
    /// Print the canonical XML form
    Canonical { file: PathBuf },
    /// Resolve <driver> references of a datasources descriptor
    Drivers { file: PathBuf },
}

fn main() -> Result<()> {
    let Cli {
        verbose,
        json,
        no_expressions,
        cmd,
    } = Cli::parse();

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| level.into()),
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let options = common::parser_options(no_expressions);
    match cmd {
        Cmd::Check { files } => cmd_check::run(&files, options)?,
        Cmd::Show { file } => cmd_show::run(&file, options, json)?,
        Cmd::Canonical { file } => cmd_canonical::run(&file, options)?,
        Cmd::Drivers { file } => cmd_drivers::run(&file, options, json)?,
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_check_with_several_files() {
        let cli = Cli::parse_from(["jcactl", "check", "a-ds.xml", "weblogic-ra.xml"]);
        match cli.cmd {
            Cmd::Check { files } => assert_eq!(files.len(), 2),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn check_requires_a_file() {
        assert!(Cli::try_parse_from(["jcactl", "check"]).is_err());
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["jcactl", "-vv", "--json", "--no-expressions", "show", "x.xml"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
        assert!(cli.no_expressions);
        assert!(matches!(cli.cmd, Cmd::Show { ref file } if file == &PathBuf::from("x.xml")));
    }
}
