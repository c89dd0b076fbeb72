use anyhow::{anyhow, bail, ensure, Context};
use derive_builder::Builder;
use directories::UserDirs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

mod settings;

pub use settings::{Settings, SettingsBuilder, DEFAULT_DEPENDENCIES};

/// Name of the config file inside the global config directory
pub const CONFIG_FILE: &str = "pyseed.conf";

#[derive(Builder)]
pub struct ConfigDirs {
    user_home: PathBuf,
    global_config: PathBuf,
}

impl ConfigDirs {
    /// Create a new [`ConfigDirs`] builder
    #[must_use]
    pub fn builder() -> ConfigDirsBuilder {
        ConfigDirsBuilder::create_empty()
    }

    /// Attempt to create a new [`ConfigDirs`] instance with sane defaults for
    /// path locations
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the user's home directory can not be found.
    pub fn default_paths() -> anyhow::Result<Self> {
        let home = Self::get_user_home()?;
        let xdg = std::env::var("XDG_CONFIG_HOME").ok().map(PathBuf::from);

        Ok(Self {
            global_config: Self::get_config_dir(&home, xdg),
            user_home: home,
        })
    }

    /// Returns the path for the user home `~/`
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if a path for the users home can not
    /// be found
    pub fn get_user_home() -> anyhow::Result<PathBuf> {
        Ok(UserDirs::new()
            .context("Failed to get user's home directory")?
            .home_dir()
            .to_owned())
    }

    /// Returns the path where the global config lives
    ///
    /// Looks for the global configuration dir, in order:
    /// - `$XDG_CONFIG_HOME/pyseed`
    /// - `~/.config/pyseed`
    /// - `~/.pyseed`
    ///
    /// The directory itself does not need to exist.
    #[must_use]
    pub fn get_config_dir(home: &Path, xdg_config_home: Option<PathBuf>) -> PathBuf {
        let config_home = xdg_config_home.unwrap_or_else(|| home.join(".config"));

        if config_home.is_dir() {
            config_home.join("pyseed")
        } else {
            home.join(".pyseed")
        }
    }

    /// Returns a reference to the user home of this [`ConfigDirs`].
    #[must_use]
    pub fn user_home(&self) -> &Path {
        self.user_home.as_path()
    }

    /// Returns a reference to the global config of this [`ConfigDirs`].
    #[must_use]
    pub fn global_config(&self) -> &Path {
        self.global_config.as_path()
    }

    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.global_config.join(CONFIG_FILE)
    }

    /// Path of the config file with the home directory shortened to `~`
    #[must_use]
    pub fn display_config_file(&self) -> String {
        let file = self.config_file();
        match file.strip_prefix(self.user_home()) {
            Ok(rest) => format!("~/{}", rest.display()),
            Err(_) => file.display().to_string(),
        }
    }

    /// Creates the global directory.
    ///
    /// # Errors
    ///
    /// This function will return an error if any IO error occurs
    pub fn create_global_dir(&self) -> anyhow::Result<()> {
        let exists = self.global_config().exists();

        if exists && self.global_config().is_dir() {
            println!(
                "The global config directory at path {} already exists. Skipping creation.",
                self.global_config().display()
            );

            return Ok(());
        } else if exists {
            println!(
                "The global config directory at path {} exists but is not a directory. Removing existing path.",
                self.global_config().display(),
            );

            Self::remove_path(self.global_config())?;
        }

        std::fs::create_dir_all(self.global_config())?;

        Ok(())
    }

    /// Creates the global config inside the global directory, filled with `settings`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the global config directory does not exist or any IO error occurs
    pub fn create_global_config(&self, settings: &Settings) -> anyhow::Result<()> {
        let dir_exists = self.global_config().is_dir();

        ensure!(
            dir_exists,
            anyhow!(
                "Global config directory {} does not exist",
                self.global_config().display()
            )
        );

        let config_file = self.config_file();
        let exists = config_file.exists();

        if exists && config_file.is_file() {
            println!(
                "The global config file at path {} already exists. Skipping creation.",
                config_file.display()
            );

            return Ok(());
        } else if exists {
            println!(
                "The global config file at path {} exists but is not a file. Removing existing path.",
                config_file.display(),
            );

            Self::remove_path(&config_file)?;
        }

        {
            use std::io::Write;

            let mut file = std::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&config_file)?;
            file.write_all(settings.to_config().as_bytes())?;
        }

        Ok(())
    }

    /// Reads the global config file, if there is one.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the file exists but can not be read or parsed.
    pub fn load(&self) -> anyhow::Result<Option<ConfigFile>> {
        let path = self.config_file();

        if !path.is_file() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        ConfigFile::parse(&contents, &path).map(Some)
    }

    pub fn remove_path(path: &Path) -> anyhow::Result<()> {
        let file_type = path.symlink_metadata()?.file_type();

        if file_type.is_dir() {
            std::fs::remove_dir_all(path)?;
        } else {
            std::fs::remove_file(path)?;
        }

        Ok(())
    }
}

/// Keys understood in `pyseed.conf`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Poetry,
    Git,
    Branch,
    Message,
    Dependencies,
    Prerelease,
}

impl FromStr for Key {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "poetry" => Key::Poetry,
            "git" => Key::Git,
            "branch" => Key::Branch,
            "message" => Key::Message,
            "dependencies" => Key::Dependencies,
            "prerelease" => Key::Prerelease,
            other => bail!("unknown key \"{other}\""),
        })
    }
}

/// Parsed `key=value` entries of a config file, in file order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub entries: Vec<(Key, String)>,
}

impl ConfigFile {
    /// Parses `contents`, one `key=value` per line. Blank lines and lines
    /// starting with `#` are skipped.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] naming `origin` and the line number of the first
    /// malformed line or unknown key.
    pub fn parse(contents: &str, origin: &Path) -> anyhow::Result<Self> {
        let mut entries = Vec::new();

        for (n, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| anyhow!("{}:{}: expected key=value", origin.display(), n + 1))?;

            let key = key
                .trim()
                .parse::<Key>()
                .with_context(|| format!("{}:{}", origin.display(), n + 1))?;

            entries.push((key, value.trim().to_string()));
        }

        Ok(ConfigFile { entries })
    }

    /// Applies every entry on top of `builder`; later entries win.
    pub fn apply(&self, builder: &mut SettingsBuilder) {
        for (key, value) in &self.entries {
            match key {
                Key::Poetry => builder.poetry(value.as_str()),
                Key::Git => builder.git(value.as_str()),
                Key::Branch => builder.branch(value.as_str()),
                Key::Message => builder.message(value.as_str()),
                Key::Prerelease => builder.prerelease(value.as_str()),
                Key::Dependencies => builder.dependencies(
                    value
                        .split(|c: char| c == ',' || c.is_whitespace())
                        .filter(|dep| !dep.is_empty())
                        .map(str::to_string)
                        .collect::<Vec<_>>(),
                ),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirs_in(root: &Path) -> ConfigDirs {
        ConfigDirs::builder()
            .user_home(root.to_path_buf())
            .global_config(root.join(".pyseed"))
            .build()
            .unwrap()
    }

    #[test]
    fn parses_entries() {
        let contents = "# comment\n\npoetry = /opt/poetry\nbranch=trunk\ndependencies = black, ruff  pytest\n";
        let file = ConfigFile::parse(contents, Path::new("pyseed.conf")).unwrap();

        assert_eq!(
            file.entries,
            [
                (Key::Poetry, "/opt/poetry".to_string()),
                (Key::Branch, "trunk".to_string()),
                (Key::Dependencies, "black, ruff  pytest".to_string()),
            ]
        );

        let mut builder = Settings::builder();
        file.apply(&mut builder);
        let settings = builder.build().unwrap();

        assert_eq!(settings.poetry, "/opt/poetry");
        assert_eq!(settings.git, "git");
        assert_eq!(settings.branch, "trunk");
        assert_eq!(settings.dependencies, ["black", "ruff", "pytest"]);
    }

    #[test]
    fn message_may_contain_equals() {
        let file = ConfigFile::parse("message=a=b", Path::new("c")).unwrap();
        assert_eq!(file.entries, [(Key::Message, "a=b".to_string())]);
    }

    #[test]
    fn reports_line_of_bad_entry() {
        let err = ConfigFile::parse("branch=main\nnonsense\n", Path::new("pyseed.conf")).unwrap_err();
        assert_eq!(err.to_string(), "pyseed.conf:2: expected key=value");

        let err = ConfigFile::parse("colour=red", Path::new("pyseed.conf")).unwrap_err();
        assert_eq!(err.to_string(), "pyseed.conf:1");
        assert!(format!("{err:#}").contains("unknown key \"colour\""));
    }

    #[test]
    fn prefers_xdg_config_home() {
        let home = tempfile::tempdir().unwrap();
        let xdg = home.path().join("xdg");

        assert_eq!(
            ConfigDirs::get_config_dir(home.path(), Some(xdg.clone())),
            home.path().join(".pyseed")
        );

        std::fs::create_dir(&xdg).unwrap();
        assert_eq!(
            ConfigDirs::get_config_dir(home.path(), Some(xdg.clone())),
            xdg.join("pyseed")
        );
    }

    #[test]
    fn missing_config_file_loads_nothing() {
        let root = tempfile::tempdir().unwrap();
        assert_eq!(dirs_in(root.path()).load().unwrap(), None);
    }

    #[test]
    fn init_writes_loadable_defaults_once() {
        let root = tempfile::tempdir().unwrap();
        let dirs = dirs_in(root.path());

        assert!(dirs.create_global_config(&Settings::default()).is_err());

        dirs.create_global_dir().unwrap();
        dirs.create_global_config(&Settings::default()).unwrap();

        let mut builder = Settings::builder();
        dirs.load().unwrap().unwrap().apply(&mut builder);
        assert_eq!(builder.build().unwrap(), Settings::default());

        std::fs::write(dirs.config_file(), "branch=trunk\n").unwrap();
        dirs.create_global_config(&Settings::default()).unwrap();
        assert_eq!(
            std::fs::read_to_string(dirs.config_file()).unwrap(),
            "branch=trunk\n"
        );
        assert_eq!(dirs.display_config_file(), "~/.pyseed/pyseed.conf");
    }
}
