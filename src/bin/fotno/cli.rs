//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fotno::util::shell::{ColorChoice, MessageFormat};

/// fotno - monorepo tooling for fonto manifests
#[derive(Parser)]
#[command(name = "fotno")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output format: human, json
    #[arg(long, global = true, default_value = "human")]
    pub message_format: MessageFormat,

    /// Repository root (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Options shared by every command.
    pub fn global_args(&self) -> GlobalArgs {
        GlobalArgs {
            verbose: self.verbose,
            quiet: self.quiet,
            color: self.color,
            message_format: self.message_format,
            root: self.root.clone(),
        }
    }
}

/// Global options, detached from the parsed subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub verbose: bool,
    pub quiet: bool,
    pub color: ColorChoice,
    pub message_format: MessageFormat,
    pub root: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// (Experimental) Does some basic formatting of manifest files.
    #[command(long_about = FORMAT_MANIFESTS_LONG_ABOUT)]
    FormatManifests(FormatManifestsArgs),
}

const FORMAT_MANIFESTS_LONG_ABOUT: &str = "\
(Experimental) Does some basic formatting of manifest files.

Reorders your manifest properties and dependency names alphabetically.

Fixes missing or erroneous package locations in manifest dependencies (eg. \"packages/my-extension\").

Indents everything with tabs instead of anything else.";

#[derive(Args)]
pub struct FormatManifestsArgs {
    /// Source directory to look for packages containing a manifest [default: packages]
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Do not strip manifest properties that are not officially supported
    #[arg(short = 'C', long)]
    pub no_clean: bool,

    /// Do not reorder manifest properties and dependencies alphabetically
    #[arg(short = 'R', long)]
    pub no_reorder: bool,

    /// Do not rewrite (dev) dependencies to point to their package locations
    #[arg(short = 'L', long)]
    pub no_dep_locations: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_short_flags() {
        let cli = Cli::try_parse_from(["fotno", "format-manifests", "-C", "-R", "-L"]).unwrap();
        let Commands::FormatManifests(args) = cli.command;
        assert!(args.no_clean);
        assert!(args.no_reorder);
        assert!(args.no_dep_locations);
        assert!(args.source.is_none());
    }

    #[test]
    fn test_parse_globals_after_subcommand() {
        let cli = Cli::try_parse_from([
            "fotno",
            "format-manifests",
            "--source",
            "platform",
            "--message-format",
            "json",
            "--root",
            "repo",
        ])
        .unwrap();

        assert_eq!(cli.message_format, MessageFormat::Json);
        assert_eq!(cli.root, Some(PathBuf::from("repo")));
        let Commands::FormatManifests(args) = cli.command;
        assert_eq!(args.source, Some(PathBuf::from("platform")));
    }
}
