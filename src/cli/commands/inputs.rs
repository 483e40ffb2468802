//! Shared input gathering for commands.
//!
//! Commands need the same few things: the repository (if any), the merged
//! config, a mode, a remote, a catalog and a spec set. This module resolves
//! each of them with the precedence flag > config > repository > default.

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::args::{CatalogArgs, ModeArg, PresetArg, SetArgs};
use crate::cli::Context;
use crate::core::catalog::{CatalogSource, Partition, ReferenceCatalog};
use crate::core::config::Config;
use crate::core::presets;
use crate::core::report::SetReport;
use crate::core::set::SpecSet;
use crate::core::spec::RefSpec;
use crate::core::types::RemoteName;
use crate::core::validate::Mode;
use crate::git::{Git, GitError};
use crate::ui::output;

/// Repository and configuration the command runs against.
pub(crate) struct Workspace {
    /// `None` outside a repository
    pub git: Option<Git>,
    pub config: Config,
}

impl Workspace {
    /// Open the repository around `ctx.cwd` (if any) and load config.
    ///
    /// Config warnings are printed here, once per command.
    pub fn open(ctx: &Context) -> Result<Self> {
        let cwd = ctx.cwd()?;
        let git = match Git::open(&cwd) {
            Ok(git) => Some(git),
            Err(GitError::NotARepo { .. }) => {
                output::debug(
                    format!("{} is not inside a git repository", cwd.display()),
                    ctx.verbosity,
                );
                None
            }
            Err(err) => return Err(err).context("Failed to open repository"),
        };

        let loaded = Config::load(git.as_ref().map(Git::git_dir)).context("Failed to load config")?;
        for warning in &loaded.warnings {
            output::warn(
                format!("{}: {}", warning.path.display(), warning.message),
                ctx.verbosity,
            );
        }

        Ok(Self {
            git,
            config: loaded.config,
        })
    }

    /// The repository, or an error explaining that one is needed.
    pub fn require_git(&self) -> Result<&Git> {
        self.git
            .as_ref()
            .context("Not inside a git repository (use --cwd, or --catalog FILE)")
    }

    pub fn mode(&self, arg: Option<ModeArg>) -> Mode {
        arg.map(Mode::from)
            .unwrap_or_else(|| self.config.default_mode())
    }

    /// Remote from the flag, then config, then the repository's default.
    pub fn remote(&self, arg: Option<&str>) -> Result<RemoteName> {
        if let Some(name) = arg {
            return RemoteName::new(name).context("Invalid --remote");
        }
        if let Some(remote) = self.config.configured_remote() {
            return Ok(remote);
        }
        if let Some(git) = &self.git {
            let found = git.default_remote().context("Failed to list remotes")?;
            if let Some(remote) = found.and_then(|name| RemoteName::new(name).ok()) {
                return Ok(remote);
            }
        }
        Ok(RemoteName::default())
    }

    /// Load the catalog from `--catalog` or from the repository.
    pub fn catalog(
        &self,
        ctx: &Context,
        args: &CatalogArgs,
        remote: &RemoteName,
    ) -> Result<ReferenceCatalog> {
        let catalog = match &args.catalog {
            Some(path) => read_catalog_file(&ctx.cwd()?.join(path))?,
            None => self
                .require_git()?
                .source_for(remote.clone())
                .catalog()
                .context("Failed to list references")?,
        };

        output::debug(
            format!(
                "catalog: {} local, {} remote (remote '{}')",
                catalog.len(Partition::Local),
                catalog.len(Partition::Remote),
                remote
            ),
            ctx.verbosity,
        );
        Ok(catalog)
    }

    /// Specs offered to the auto-completer: saved ones, then the remote's.
    ///
    /// The remote's refspecs are best-effort; a missing remote is not an error.
    pub fn predefined(&self, ctx: &Context, mode: Mode, remote: &RemoteName) -> Vec<RefSpec> {
        let mut specs = self.config.predefined(mode);
        if let Some(git) = &self.git {
            match git.configured_specs(remote, mode) {
                Ok(configured) => specs.extend(configured),
                Err(err) => output::debug(err, ctx.verbosity),
            }
        }
        specs
    }

    /// Build the spec set: given specs in order, then presets.
    ///
    /// Presets are added only if an equal spec is not already present.
    pub fn build_set(
        &self,
        ctx: &Context,
        args: &SetArgs,
        mode: Mode,
        remote: &RemoteName,
    ) -> Result<SpecSet> {
        let mut set = SpecSet::new();
        for text in &args.specs {
            set.add(RefSpec::parse(text)?);
        }

        for preset in &args.presets {
            let specs = match preset {
                PresetArg::AllBranches => vec![presets::all_branches(mode, remote)],
                PresetArg::AllTags => vec![presets::all_tags()],
                PresetArg::Configured => self
                    .require_git()?
                    .configured_specs(remote, mode)
                    .context("Failed to read the remote's refspecs")?,
                PresetArg::Saved => self.config.predefined(mode),
            };
            for spec in specs {
                if set.add_if_absent(spec.clone()).is_none() {
                    output::debug(format!("skipping duplicate {spec}"), ctx.verbosity);
                }
            }
        }

        if args.force_all {
            set.set_force_all(true);
        }

        output::debug(format!("{} spec(s), mode {}", set.len(), mode), ctx.verbosity);
        Ok(set)
    }
}

/// Read a catalog from a JSON file of the form `{"local": [...], "remote": [...]}`.
pub(crate) fn read_catalog_file(path: &Path) -> Result<ReferenceCatalog> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file '{}'", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse catalog file '{}'", path.display()))
}

/// One-line description of the blocking diagnostic in `report`.
pub(crate) fn describe_failure(set: &SpecSet, report: &SetReport) -> Option<String> {
    let diagnostic = report.diagnostic.as_ref()?;
    let spec = report.offending.and_then(|id| set.get(id));
    Some(match spec {
        Some(spec) => format!("{spec}: {diagnostic}"),
        None => diagnostic.to_string(),
    })
}
