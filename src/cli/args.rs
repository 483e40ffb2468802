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
//! - `--quiet` / `-q`: Minimal output

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::core::propose::Side;
use crate::core::validate::Mode;

/// refmap - check refspecs against the references that exist
#[derive(Parser, Debug)]
#[command(name = "refmap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if refmap was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
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

/// Where the reference catalog comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Remote whose references form the remote side (default: config, then origin)
    #[arg(long)]
    pub remote: Option<String>,

    /// Read the catalog from a JSON file instead of the repository
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
}

/// A spec set to evaluate.
#[derive(Args, Debug, Clone, Default)]
pub struct SetArgs {
    /// Refspecs in `[+]source:destination` form, in order
    #[arg(value_name = "REFSPEC")]
    pub specs: Vec<String>,

    /// Direction of the operation (default: config, then push)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Add predefined specs after the given ones
    #[arg(long = "preset", value_enum, value_name = "PRESET")]
    pub presets: Vec<PresetArg>,

    /// Force every spec in the set
    #[arg(long)]
    pub force_all: bool,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a set of refspecs
    #[command(
        name = "check",
        long_about = "Validate a set of refspecs against the known references.\n\n\
            Every spec is checked on its own first; the first problem found is \
            reported. When every spec is valid, the whole set is expanded and \
            checked for two specs writing to the same destination. Wildcards \
            that match nothing are reported as warnings and do not fail the check.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Check a push of main and the deletion of an old branch
    refmap check refs/heads/main:refs/heads/main :refs/heads/old

    # Check the remote's configured fetch specs
    refmap check --mode fetch --preset configured

    # Check against a catalog file, machine-readable
    refmap check --catalog refs.json --json 'refs/heads/*:refs/remotes/origin/*'"
    )]
    Check {
        #[command(flatten)]
        set: SetArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the concrete mappings a valid set expands to
    #[command(
        name = "resolve",
        long_about = "Expand a set of refspecs into concrete source -> destination pairs.\n\n\
            Wildcard specs are expanded against the catalog. Fails if the set \
            does not pass `refmap check`."
    )]
    Resolve {
        #[command(flatten)]
        set: SetArgs,

        /// Print the mappings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace one side of a refspec, reshaping the other to match
    #[command(
        name = "derive",
        after_help = "\
WORKFLOW EXAMPLES:
    # Turn a branch mapping into a wildcard mapping
    refmap derive refs/heads/main:refs/remotes/origin/main --source 'refs/heads/*'
    # -> refs/heads/*:refs/remotes/origin/*"
    )]
    Derive {
        /// The refspec to edit
        spec: String,

        /// New source
        #[arg(long, conflicts_with = "destination", required_unless_present = "destination")]
        source: Option<String>,

        /// New destination
        #[arg(long)]
        destination: Option<String>,
    },

    /// Propose the other side of a refspec being written
    #[command(
        name = "propose",
        after_help = "\
WORKFLOW EXAMPLES:
    # What should refs/heads/main fetch into?
    refmap propose --mode fetch refs/heads/main
    # -> refs/remotes/origin/main

    # Reshape an existing destination to match a wildcard source
    refmap propose 'refs/heads/*' --other refs/custom/topic
    # -> refs/custom/*"
    )]
    Propose {
        /// The value the user typed
        value: String,

        /// Which side `value` was typed into
        #[arg(long, value_enum, default_value_t = SideArg::Source)]
        side: SideArg,

        /// Current content of the other side
        #[arg(long, default_value = "")]
        other: String,

        /// Direction of the operation (default: config, then push)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Remote used for naming conventions
        #[arg(long)]
        remote: Option<String>,
    },

    /// Show the reference catalog
    #[command(name = "catalog")]
    Catalog {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage saved refspecs for this repository
    #[command(
        name = "preset",
        long_about = "Manage the refspecs saved in the repository config.\n\n\
            Saved specs are offered by `--preset saved` and drive `refmap propose`.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Save a Gerrit-style push mapping
    refmap preset add --mode push 'refs/heads/*:refs/for/*'

    # Show saved fetch specs
    refmap preset list --mode fetch"
    )]
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for refmap commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    refmap completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    refmap completion zsh >> ~/.zshrc

    # Fish
    refmap completion fish > ~/.config/fish/completions/refmap.fish

    # PowerShell
    refmap completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Preset subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PresetAction {
    /// List saved refspecs
    List {
        /// Only this direction
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
    /// Save a refspec (no-op if already saved)
    Add {
        /// Refspec in `[+]source:destination` form
        spec: String,
        /// Direction (default: config, then push)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
    /// Remove a saved refspec
    Remove {
        /// Refspec in `[+]source:destination` form
        spec: String,
        /// Direction (default: config, then push)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
}

/// Direction of an operation
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Local references are sources, remote references are destinations
    Push,
    /// Remote references are sources, local references are destinations
    Fetch,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Push => Mode::Push,
            ModeArg::Fetch => Mode::Fetch,
        }
    }
}

/// Side of a refspec
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideArg {
    Source,
    Destination,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Source => Side::Source,
            SideArg::Destination => Side::Destination,
        }
    }
}

/// Predefined spec templates
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetArg {
    /// Every branch (mirrored on push, tracked on fetch)
    AllBranches,
    /// Every tag
    AllTags,
    /// The remote's refspecs from the repository's git config
    Configured,
    /// The refspecs saved with `refmap preset add`
    Saved,
}
