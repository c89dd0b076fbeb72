use crate::pipeline::Phase;
use crate::runner::Tool;

/// Terminal failure of a scaffolding run. Each variant belongs to exactly one [`Phase`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("invalid project name {0:?}: expected a single directory name")]
    InvalidProjectName(String),

    #[error("{} is not installed: install it from {}", .0, .0.install_url())]
    ToolMissing(Tool),

    #[error("poetry new failed")]
    ProjectCreationFailed,

    #[error("failed to add dependencies: {}", .0.join(" "))]
    DependencyInstallFailed(Vec<String>),

    #[error("failed to write files: {}", .0.join(" "))]
    TemplateWriteFailed(Vec<String>),

    #[error("git init failed")]
    RepoInitFailed,

    #[error("poetry run pre-commit install failed")]
    HookInstallFailed,

    #[error("poetry run pre-commit autoupdate failed")]
    HookUpdateFailed,

    #[error("git add failed")]
    StageFailed,

    #[error("git commit failed: this is usually the pre-commit hook rewriting files, try committing manually")]
    CommitFailed,
}

impl PipelineError {
    /// The phase that produced this error.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            PipelineError::InvalidProjectName(_) | PipelineError::ProjectCreationFailed => {
                Phase::CreateProject
            }
            PipelineError::ToolMissing(Tool::Poetry) => Phase::CreateProject,
            PipelineError::ToolMissing(Tool::Git) => Phase::InitRepository,
            PipelineError::DependencyInstallFailed(_) => Phase::AddDependencies,
            PipelineError::TemplateWriteFailed(_) => Phase::WriteTemplates,
            PipelineError::RepoInitFailed => Phase::InitRepository,
            PipelineError::HookInstallFailed | PipelineError::HookUpdateFailed => {
                Phase::InstallHook
            }
            PipelineError::StageFailed | PipelineError::CommitFailed => Phase::Commit,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
