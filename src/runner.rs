use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::trace;

/// External tools driven by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Poetry,
    Git,
}

impl Tool {
    #[must_use]
    pub fn install_url(&self) -> &'static str {
        match self {
            Tool::Poetry => "https://python-poetry.org/docs/",
            Tool::Git => "https://git-scm.com/",
        }
    }
}

impl Display for Tool {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Tool::Poetry => write!(f, "poetry"),
            Tool::Git => write!(f, "git"),
        }
    }
}

/// A single external process call: program, arguments and the directory it runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            dir: None,
        }
    }

    #[must_use]
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.dir = Some(dir.to_path_buf());
        self
    }

    /// Program followed by its arguments, space separated.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Display for Invocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.dir {
            Some(ref dir) => write!(f, "`{}` in {}", self.command_line(), dir.display()),
            None => write!(f, "`{}`", self.command_line()),
        }
    }
}

/// Runs external commands to completion.
///
/// `Ok(true)` means the process exited successfully, `Ok(false)` that it exited
/// with a failure status. `Err` is returned when the process could not be spawned.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> std::io::Result<bool>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> std::io::Result<bool> {
        (**self).run(invocation)
    }
}

/// [`CommandRunner`] backed by real processes. Blocks until each child exits.
#[derive(Debug, Default, Clone)]
pub struct SystemRunner {
    /// Forward the child's stdout and stderr instead of discarding them
    pub verbose: bool,
}

impl SystemRunner {
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        SystemRunner { verbose }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> std::io::Result<bool> {
        trace!("Running {invocation}");

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args).stdin(Stdio::null());

        if let Some(ref dir) = invocation.dir {
            command.current_dir(dir);
        }

        if !self.verbose {
            command.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let status = command.status()?;
        trace!("{} exited with {status}", invocation.program);

        Ok(status.success())
    }
}

/// Checks that `program` can be invoked at all by asking for its version.
pub fn probe(runner: &impl CommandRunner, program: &str) -> bool {
    matches!(runner.run(&Invocation::new(program, ["--version"])), Ok(true))
}

#[cfg(test)]
pub(crate) mod mock {
    use super::{CommandRunner, Invocation};
    use std::cell::RefCell;
    use std::path::Path;

    /// Records every invocation and answers from a set of rules.
    ///
    /// Commands succeed unless their command line starts with a failing prefix. A
    /// program listed as missing fails to spawn. `poetry new <name>` creates the
    /// project directory with a `pyproject.toml`, like the real thing.
    #[derive(Default)]
    pub struct MockRunner {
        pub calls: RefCell<Vec<Invocation>>,
        failing: Vec<String>,
        missing: Vec<String>,
        hollow_new: bool,
    }

    impl MockRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing(mut self, prefix: &str) -> Self {
            self.failing.push(prefix.to_string());
            self
        }

        /// `poetry new` reports success without creating anything.
        pub fn hollow_new(mut self) -> Self {
            self.hollow_new = true;
            self
        }

        pub fn missing(mut self, program: &str) -> Self {
            self.missing.push(program.to_string());
            self
        }

        pub fn command_lines(&self) -> Vec<String> {
            self.calls
                .borrow()
                .iter()
                .map(Invocation::command_line)
                .collect()
        }

        fn create_project(dir: &Path, name: &str) -> std::io::Result<bool> {
            let project = dir.join(name);
            if project.exists() {
                return Ok(false);
            }
            std::fs::create_dir(&project)?;
            std::fs::write(
                project.join("pyproject.toml"),
                format!("[tool.poetry]\nname = \"{name}\"\n"),
            )?;
            Ok(true)
        }
    }

    impl CommandRunner for MockRunner {
        fn run(&self, invocation: &Invocation) -> std::io::Result<bool> {
            self.calls.borrow_mut().push(invocation.clone());

            if self.missing.contains(&invocation.program) {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} not found", invocation.program),
                ));
            }

            let line = invocation.command_line();
            if self.failing.iter().any(|prefix| line.starts_with(prefix)) {
                return Ok(false);
            }

            match (invocation.args.as_slice(), invocation.dir.as_deref()) {
                ([new, name], Some(dir)) if invocation.program == "poetry" && new == "new" => {
                    if self.hollow_new {
                        Ok(true)
                    } else {
                        Self::create_project(dir, name)
                    }
                }
                _ => Ok(true),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockRunner;
    use super::*;

    #[test]
    fn displays_command_line() {
        let inv = Invocation::new("git", ["init", "-b", "main"]).in_dir(Path::new("demo"));
        assert_eq!(inv.command_line(), "git init -b main");
        assert_eq!(inv.to_string(), "`git init -b main` in demo");
    }

    #[test]
    fn probe_distinguishes_missing_from_failing() {
        let runner = MockRunner::new().missing("poetry").failing("git commit");
        assert!(!probe(&runner, "poetry"));
        assert!(probe(&runner, "git"));
        assert_eq!(runner.command_lines(), ["poetry --version", "git --version"]);
    }

    #[test]
    fn system_runner_reports_spawn_failure() {
        let runner = SystemRunner::default();
        let inv = Invocation::new("pyseed-definitely-not-a-real-program", ["--version"]);
        assert!(runner.run(&inv).is_err());
    }
}
