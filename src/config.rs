use crate::env::SiteEnv;
use crate::error::{Error, Result};
use std::path::PathBuf;

const DEFAULT_CONTENT_DIR: &str = "content";
const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// File name of the note that is promoted to its directory's section index.
pub const DEFAULT_INDEX_MARKER: &str = "📇 Index.md";

/// Configuration for the conversion pipeline.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Zola site root
    pub site_dir: PathBuf,

    /// Directory holding the exported notes, converted in place
    pub content_dir: PathBuf,

    /// Zola config file carrying `___NAME___` tokens
    pub config_file: PathBuf,

    /// File name of notes promoted to `_index.md`
    pub index_marker: String,

    /// Site variables and section sort order
    pub site_env: SiteEnv,

    /// Print every written file to stdout
    pub echo: bool,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use obsidian_zola::{Config, SiteEnv};
    ///
    /// let config = Config::builder()
    ///     .site_dir("./site")
    ///     .site_env(SiteEnv::from_env())
    ///     .build()
    ///     .expect("valid configuration");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The content directory doesn't exist or is not a directory
    /// - The config file doesn't exist or is not a file
    /// - The index marker is empty
    pub fn validate(&self) -> Result<()> {
        if !self.content_dir.exists() {
            return Err(Error::config(format!(
                "Content directory does not exist: {}",
                self.content_dir.display()
            )));
        }

        if !self.content_dir.is_dir() {
            return Err(Error::config(format!(
                "Content path is not a directory: {}",
                self.content_dir.display()
            )));
        }

        if !self.config_file.exists() {
            return Err(Error::config(format!(
                "Config file does not exist: {}",
                self.config_file.display()
            )));
        }

        if !self.config_file.is_file() {
            return Err(Error::config(format!(
                "Config path is not a file: {}",
                self.config_file.display()
            )));
        }

        if self.index_marker.is_empty() {
            return Err(Error::config("index_marker must not be empty"));
        }

        Ok(())
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    site_dir: Option<PathBuf>,
    content_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    index_marker: Option<String>,
    site_env: Option<SiteEnv>,
    echo: Option<bool>,
}

impl ConfigBuilder {
    /// Sets the Zola site root. The content directory and config file
    /// default to `content/` and `config.toml` inside it.
    #[must_use]
    pub fn site_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.site_dir = Some(path.into());
        self
    }

    /// Sets the content directory.
    #[must_use]
    pub fn content_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.content_dir = Some(path.into());
        self
    }

    /// Sets the config file receiving the site variables.
    #[must_use]
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Sets the file name of notes promoted to a section index.
    #[must_use]
    pub fn index_marker(mut self, name: impl Into<String>) -> Self {
        self.index_marker = Some(name.into());
        self
    }

    /// Sets the site variables.
    ///
    /// Defaults to [`SiteEnv::from_env`].
    #[must_use]
    pub fn site_env(mut self, env: SiteEnv) -> Self {
        self.site_env = Some(env);
        self
    }

    /// Enables or disables printing written files to stdout.
    #[must_use]
    pub fn echo(mut self, enabled: bool) -> Self {
        self.echo = Some(enabled);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let site_dir = self.site_dir.unwrap_or_else(|| PathBuf::from("."));
        let config = Config {
            content_dir: self
                .content_dir
                .unwrap_or_else(|| site_dir.join(DEFAULT_CONTENT_DIR)),
            config_file: self
                .config_file
                .unwrap_or_else(|| site_dir.join(DEFAULT_CONFIG_FILE)),
            site_dir,
            index_marker: self
                .index_marker
                .unwrap_or_else(|| DEFAULT_INDEX_MARKER.to_string()),
            site_env: self.site_env.unwrap_or_else(SiteEnv::from_env),
            echo: self.echo.unwrap_or(true),
        };

        config.validate()?;
        Ok(config)
    }
}
