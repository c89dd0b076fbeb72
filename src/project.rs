use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::PipelineError;

/// Name of the directory a project is created in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProjectName {
    type Err = PipelineError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let valid = !name.trim().is_empty()
            && name != "."
            && name != ".."
            && !name.starts_with('-')
            && !name.contains(['/', '\\', '\0']);

        if valid {
            Ok(ProjectName(name.to_string()))
        } else {
            Err(PipelineError::InvalidProjectName(name.to_string()))
        }
    }
}

impl Display for ProjectName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<std::path::Path> for ProjectName {
    fn as_ref(&self) -> &std::path::Path {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        for name in ["demo", "my-project", "snake_case", ".hidden"] {
            assert_eq!(name.parse::<ProjectName>().unwrap().as_str(), name);
        }
    }

    #[test]
    fn rejects_paths() {
        for name in ["", "  ", ".", "..", "a/b", "a\\b", "nul\0", "-h", "--src"] {
            assert_eq!(
                name.parse::<ProjectName>(),
                Err(PipelineError::InvalidProjectName(name.to_string()))
            );
        }
    }
}
