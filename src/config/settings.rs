use derive_builder::Builder;

/// Development dependencies added to every project
pub const DEFAULT_DEPENDENCIES: [&str; 6] =
    ["black", "flake8", "isort", "mypy", "pre-commit", "pytest-cov"];

#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into))]
pub struct Settings {
    /// Package manager program
    #[builder(default = "String::from(\"poetry\")")]
    pub poetry: String,

    /// Version control program
    #[builder(default = "String::from(\"git\")")]
    pub git: String,

    /// Default branch of the new repository
    #[builder(default = "String::from(\"main\")")]
    pub branch: String,

    /// Message of the initial commit
    #[builder(default = "String::from(\"🚀 initial commit\")")]
    pub message: String,

    #[builder(default = "DEFAULT_DEPENDENCIES.map(String::from).to_vec()")]
    pub dependencies: Vec<String>,

    /// Dependency installed with `--allow-prereleases`
    #[builder(default = "String::from(\"black\")")]
    pub prerelease: String,

    /// Show the output of every external command
    #[builder(default)]
    pub verbose: bool,
}

impl Settings {
    #[must_use]
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    /// Renders the settings in the `pyseed.conf` format.
    #[must_use]
    pub fn to_config(&self) -> String {
        format!(
            "# pyseed configuration, one key=value per line\n\
             poetry={}\n\
             git={}\n\
             branch={}\n\
             message={}\n\
             dependencies={}\n\
             prerelease={}\n",
            self.poetry,
            self.git,
            self.branch,
            self.message,
            self.dependencies.join(" "),
            self.prerelease,
        )
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            poetry: "poetry".into(),
            git: "git".into(),
            branch: "main".into(),
            message: "🚀 initial commit".into(),
            dependencies: DEFAULT_DEPENDENCIES.map(String::from).to_vec(),
            prerelease: "black".into(),
            verbose: false,
        }
    }
}
