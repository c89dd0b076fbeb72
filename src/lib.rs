pub mod log;

pub mod args;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod project;
pub mod runner;
pub mod templates;

pub use error::PipelineError;
pub use pipeline::{Initializer, Phase};
pub use project::ProjectName;
pub use runner::{CommandRunner, Invocation, SystemRunner, Tool};
pub use templates::{TemplateFile, TemplateSet, WriteMode};
