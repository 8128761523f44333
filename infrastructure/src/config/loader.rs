//! Layered configuration discovery.

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["raimon.toml", ".raimon.toml"];
const ENV_PREFIX: &str = "RAIMON_";

/// A TOML file that may contribute to the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub label: &'static str,
    pub path: PathBuf,
}

impl ConfigSource {
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Candidate files, lowest priority first: global, project, `--config`.
    /// Files that do not exist are skipped when loading.
    pub fn sources(explicit: Option<&Path>) -> Vec<ConfigSource> {
        let mut sources = Vec::new();
        if let Some(path) = Self::global_config_path() {
            sources.push(ConfigSource {
                label: "Global",
                path,
            });
        }
        if let Some(path) = Self::project_config_path() {
            sources.push(ConfigSource {
                label: "Project",
                path,
            });
        }
        if let Some(path) = explicit {
            sources.push(ConfigSource {
                label: "Explicit",
                path: path.to_path_buf(),
            });
        }
        sources
    }

    /// Defaults, then every discovered file, then `RAIMON_*` variables
    /// (`RAIMON_MODELS__DEFAULT=gpt-4o` sets `models.default`).
    pub fn load(explicit: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::layered(&Self::sources(explicit))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Defaults overlaid with `path` only.
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        let source = ConfigSource {
            label: "Explicit",
            path: path.to_path_buf(),
        };
        Self::layered(&[source]).extract().map_err(Box::new)
    }

    /// Built-in values only, for `--no-config`.
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn layered(sources: &[ConfigSource]) -> Figment {
        sources
            .iter()
            .filter(|source| source.exists())
            .fold(
                Figment::from(Serialized::defaults(FileConfig::default())),
                |figment, source| figment.merge(Toml::file(&source.path)),
            )
    }

    /// `$XDG_CONFIG_HOME/raimon/config.toml` or the platform equivalent.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("raimon").join("config.toml"))
    }

    /// First of `./raimon.toml`, `./.raimon.toml` that exists.
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    pub fn print_config_sources(explicit: Option<&Path>) {
        println!("Configuration sources (highest priority first):");
        println!("  [ env ] {}* (e.g. {}MODELS__DEFAULT=gpt-4o)", ENV_PREFIX, ENV_PREFIX);
        for source in Self::sources(explicit).iter().rev() {
            let mark = if source.exists() { "FOUND" } else { "     " };
            println!("  [{}] {:<8} {}", mark, source.label, source.path.display());
        }
        if Self::project_config_path().is_none() {
            println!("  [     ] Project  ./raimon.toml or ./.raimon.toml");
        }
        println!("  [     ] built-in defaults");
    }
}
