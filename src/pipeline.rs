use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{PipelineError, Result};
use crate::project::ProjectName;
use crate::runner::{probe, CommandRunner, Invocation, Tool};
use crate::templates::TemplateSet;
use crate::{info, success, trace, warn};

/// Steps of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    CreateProject,
    AddDependencies,
    WriteTemplates,
    InitRepository,
    InstallHook,
    Commit,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::CreateProject => "create project",
            Phase::AddDependencies => "add dependencies",
            Phase::WriteTemplates => "write config files",
            Phase::InitRepository => "initialize git",
            Phase::InstallHook => "install pre-commit hook",
            Phase::Commit => "initial commit",
        })
    }
}

/// Creates poetry projects below `root`.
pub struct Initializer<R> {
    runner: R,
    settings: Settings,
    templates: TemplateSet,
    root: PathBuf,
}

impl<R: CommandRunner> Initializer<R> {
    pub fn new(runner: R, settings: Settings, templates: TemplateSet, root: PathBuf) -> Self {
        Initializer {
            runner,
            settings,
            templates,
            root,
        }
    }

    /// Scaffolds `name` inside the root directory.
    ///
    /// Phases run in order and the first failing one ends the run. Nothing is
    /// rolled back: a failure leaves whatever the failed phase produced on disk.
    ///
    /// # Errors
    ///
    /// Returns the [`PipelineError`] of the phase that failed.
    pub fn initialize(&self, name: &ProjectName) -> Result<()> {
        let dir = self.root.join(name);
        trace!("Project directory: {}", dir.display());

        self.create_project(name)?;
        self.add_dependencies(&dir)?;
        self.write_templates(&dir)?;
        self.init_repository(&dir)?;
        self.install_hook(&dir)?;
        self.commit(&dir)?;

        Ok(())
    }

    fn succeeds(&self, invocation: &Invocation) -> bool {
        match self.runner.run(invocation) {
            Ok(ok) => ok,
            Err(e) => {
                trace!("Failed to spawn {invocation}: {e}");
                false
            }
        }
    }

    fn poetry<const N: usize>(&self, args: [&str; N], dir: &Path) -> bool {
        self.succeeds(&Invocation::new(&self.settings.poetry, args).in_dir(dir))
    }

    fn git<const N: usize>(&self, args: [&str; N], dir: &Path) -> bool {
        self.succeeds(&Invocation::new(&self.settings.git, args).in_dir(dir))
    }

    fn create_project(&self, name: &ProjectName) -> Result<()> {
        info!("Initializing project {name}...");

        if !self.poetry(["new", name.as_str()], &self.root) {
            return Err(if probe(&self.runner, &self.settings.poetry) {
                PipelineError::ProjectCreationFailed
            } else {
                PipelineError::ToolMissing(Tool::Poetry)
            });
        }

        let dir = self.root.join(name);
        if !dir.is_dir() {
            warn!("poetry new succeeded but {} is not a directory", dir.display());
            return Err(PipelineError::ProjectCreationFailed);
        }

        success!("Initialized project");
        Ok(())
    }

    fn add_dependencies(&self, dir: &Path) -> Result<()> {
        info!("Adding dependencies, this may take a while...");

        let mut failed = Vec::new();

        for dep in &self.settings.dependencies {
            let mut args = vec!["add", "--dev"];
            if *dep == self.settings.prerelease {
                args.push("--allow-prereleases");
            }
            args.push(dep.as_str());

            if self.succeeds(&Invocation::new(&self.settings.poetry, args).in_dir(dir)) {
                success!("Added dependency {dep}");
            } else {
                warn!("failed to add dependency {dep}");
                failed.push(dep.clone());
            }
        }

        if !failed.is_empty() {
            return Err(PipelineError::DependencyInstallFailed(failed));
        }

        success!("All dependencies added");
        Ok(())
    }

    fn write_templates(&self, dir: &Path) -> Result<()> {
        let failed = self.templates.write_all(dir);

        if !failed.is_empty() {
            return Err(PipelineError::TemplateWriteFailed(failed));
        }

        success!("Config files added");
        Ok(())
    }

    fn init_repository(&self, dir: &Path) -> Result<()> {
        info!("Initializing git...");

        if !self.git(["init", "-b", self.settings.branch.as_str()], dir) {
            return Err(if probe(&self.runner, &self.settings.git) {
                PipelineError::RepoInitFailed
            } else {
                PipelineError::ToolMissing(Tool::Git)
            });
        }

        success!("Initialized git");
        Ok(())
    }

    fn install_hook(&self, dir: &Path) -> Result<()> {
        info!("Installing pre-commit hook...");

        if !self.poetry(["run", "pre-commit", "install"], dir) {
            return Err(PipelineError::HookInstallFailed);
        }

        if !self.poetry(["run", "pre-commit", "autoupdate"], dir) {
            return Err(PipelineError::HookUpdateFailed);
        }

        success!("Installed pre-commit hook");
        Ok(())
    }

    fn commit(&self, dir: &Path) -> Result<()> {
        info!("Adding everything to git...");

        if !self.git(["add", "."], dir) {
            return Err(PipelineError::StageFailed);
        }

        if !self.git(["commit", "-m", self.settings.message.as_str()], dir) {
            return Err(PipelineError::CommitFailed);
        }

        success!("Created initial commit");
        Ok(())
    }
}
