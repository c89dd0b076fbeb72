use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::{trace, warn};

/// How a template file lands in the project directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Create the file, replacing any previous contents
    Truncate,
    /// Append to a file that must already exist
    Append,
}

#[derive(Debug, Clone, Copy)]
pub struct TemplateFile {
    pub path: &'static str,
    pub contents: &'static [u8],
    pub mode: WriteMode,
}

impl TemplateFile {
    /// Writes the file below `dir`.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the file can not be opened or written. Nothing is
    /// written when opening fails.
    pub fn write_into(&self, dir: &Path) -> std::io::Result<()> {
        let target = dir.join(self.path);
        let mut options = OpenOptions::new();

        match self.mode {
            WriteMode::Truncate => options.write(true).create(true).truncate(true),
            WriteMode::Append => options.append(true),
        };

        let mut file = options.open(&target)?;
        file.write_all(self.contents)?;
        file.flush()
    }
}

/// Files written into every new project.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    files: Vec<TemplateFile>,
}

impl TemplateSet {
    #[must_use]
    pub fn new(files: Vec<TemplateFile>) -> Self {
        TemplateSet { files }
    }

    #[must_use]
    pub fn files(&self) -> &[TemplateFile] {
        &self.files
    }

    /// Writes every file, carrying on past failures.
    ///
    /// Returns the paths that could not be written, in order.
    pub fn write_all(&self, dir: &Path) -> Vec<String> {
        let mut failed = Vec::new();

        for file in &self.files {
            match file.write_into(dir) {
                Ok(()) => trace!("Wrote {}", dir.join(file.path).display()),
                Err(e) => {
                    warn!("failed to write {}: {e}", file.path);
                    failed.push(file.path.to_string());
                }
            }
        }

        failed
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        TemplateSet::new(vec![
            TemplateFile {
                path: ".gitignore",
                contents: include_bytes!("../embedded/gitignore"),
                mode: WriteMode::Truncate,
            },
            TemplateFile {
                path: "pre-commit-config.yaml",
                contents: include_bytes!("../embedded/pre-commit-config.yaml"),
                mode: WriteMode::Truncate,
            },
            TemplateFile {
                path: "pyproject.toml",
                contents: include_bytes!("../embedded/pyproject.toml"),
                mode: WriteMode::Append,
            },
            TemplateFile {
                path: "setup.cfg",
                contents: include_bytes!("../embedded/setup.cfg"),
                mode: WriteMode::Truncate,
            },
        ])
    }
}
