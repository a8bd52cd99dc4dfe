//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Errors only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::metadata::MetadataKind;

/// tmeta - Inspect normalized test metadata and dependencies
#[derive(Parser, Debug)]
#[command(name = "tmeta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if tmeta was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Which class/method pair to inspect and where its declarations live.
#[derive(clap::Args, Debug, Clone)]
pub struct Target {
    /// Declaration manifest (TOML or JSON); defaults to the configured one
    pub manifest: Option<PathBuf>,

    /// Test class name as written in the manifest
    #[arg(long = "class", value_name = "CLASS")]
    pub class_name: String,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the metadata declared for a test class or method
    #[command(
        name = "metadata",
        long_about = "Show the metadata declared for a test class or method.\n\n\
            Declarations are read from a manifest, filtered to the configured \
            namespace and mapped to metadata. With --method, class-level entries \
            are listed first, followed by the method's own entries.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Everything declared on a class
    tmeta metadata tests.toml --class CartTest

    # Class and method together
    tmeta metadata tests.toml --class CartTest --method testTotal

    # Only groups and dependencies, as JSON
    tmeta metadata --class CartTest --method testTotal \\
        --kind group --kind depends_on_method --json"
    )]
    Metadata {
        #[command(flatten)]
        target: Target,

        /// Include the metadata of this method
        #[arg(long)]
        method: Option<String>,

        /// Only show these kinds (snake_case, repeatable)
        #[arg(long = "kind", value_name = "KIND")]
        kinds: Vec<MetadataKind>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the outstanding dependencies of a test method
    #[command(
        name = "deps",
        long_about = "Show the outstanding dependencies of a test method.\n\n\
            Dependencies declared in the manifest are combined with free-text \
            annotation dependencies (first occurrence of a target wins), invalid \
            targets are dropped, and targets that already passed are removed.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Declared dependencies of one test
    tmeta deps tests.toml --class CartTest --method testTotal

    # Add annotation-style dependencies
    tmeta deps --class CartTest --method testTotal \\
        --annotation 'clone testAdd' --annotation 'StockTest::class'

    # What is still missing after some tests passed
    tmeta deps --class CartTest --method testTotal --passed CartTest::testAdd"
    )]
    Deps {
        #[command(flatten)]
        target: Target,

        /// Test method name
        #[arg(long)]
        method: String,

        /// Annotation text of the form "[clone|shallowClone ]target" (repeatable)
        #[arg(long = "annotation", value_name = "TEXT")]
        annotations: Vec<String>,

        /// Target that already passed, e.g. "CartTest::testAdd" (repeatable)
        #[arg(long = "passed", value_name = "TARGET")]
        passed: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration and where it came from
    #[command(
        name = "config",
        long_about = "Show the effective configuration and where it came from.\n\n\
            Global configuration is read from $TESTMETA_CONFIG, \
            $XDG_CONFIG_HOME/testmeta/config.toml or ~/.testmeta/config.toml. \
            Project configuration is read from .testmeta/config.toml under the \
            working directory and overrides global values."
    )]
    Config,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for tmeta commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    tmeta completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    tmeta completion zsh >> ~/.zshrc

    # Fish
    tmeta completion fish > ~/.config/fish/completions/tmeta.fish

    # PowerShell
    tmeta completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeated_kinds() {
        let cli = Cli::try_parse_from([
            "tmeta",
            "metadata",
            "m.toml",
            "--class",
            "A",
            "--kind",
            "group",
            "--kind",
            "test",
        ])
        .unwrap();

        match cli.command {
            Command::Metadata { target, kinds, .. } => {
                assert_eq!(target.manifest, Some(PathBuf::from("m.toml")));
                assert_eq!(kinds, [MetadataKind::Group, MetadataKind::Test]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        let result =
            Cli::try_parse_from(["tmeta", "metadata", "--class", "A", "--kind", "nope"]);
        assert!(result.is_err());
    }

    #[test]
    fn deps_requires_method() {
        let result = Cli::try_parse_from(["tmeta", "deps", "--class", "A"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tmeta", "config", "--debug", "--cwd", "/tmp"]).unwrap();
        assert!(cli.debug);
        assert_eq!(cli.cwd, Some(PathBuf::from("/tmp")));
    }
}
