pub use clap::{Parser, Subcommand};

use crate::config::SettingsBuilder;

#[derive(Parser)]
#[clap(version, about)]
pub struct Args {
    /// Do not print the error message when a command fails
    #[clap(long, global = true)]
    no_errors: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

impl Args {
    #[must_use]
    pub fn no_errors(&self) -> bool {
        self.no_errors
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a poetry project with linters, a pre-commit hook and a first commit
    New {
        /// Name of the project directory [default: prompt for it]
        project_name: Option<String>,

        #[clap(flatten)]
        overrides: Overrides,
    },
    /// Create the global config directory and a default pyseed.conf
    Init,
    /// Show the settings `new` would use
    Config {
        #[clap(flatten)]
        overrides: Overrides,
    },
}

/// Settings given on the command line, applied over the config file
#[derive(clap::Args, Debug, Default)]
pub struct Overrides {
    /// Default branch of the new repository
    #[clap(long, short)]
    pub branch: Option<String>,

    /// Message of the initial commit
    #[clap(long, short)]
    pub message: Option<String>,

    /// Package manager program to run
    #[clap(long)]
    pub poetry: Option<String>,

    /// Version control program to run
    #[clap(long)]
    pub git: Option<String>,

    /// Show the output of poetry and git
    #[clap(long, short)]
    pub verbose: bool,
}

impl Overrides {
    pub fn apply(&self, builder: &mut SettingsBuilder) {
        if let Some(ref branch) = self.branch {
            builder.branch(branch.as_str());
        }
        if let Some(ref message) = self.message {
            builder.message(message.as_str());
        }
        if let Some(ref poetry) = self.poetry {
            builder.poetry(poetry.as_str());
        }
        if let Some(ref git) = self.git {
            builder.git(git.as_str());
        }
        if self.verbose {
            builder.verbose(true);
        }
    }
}
