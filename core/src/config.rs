use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const CONFIG_BASENAME: &str = "tubegraph";
const ENV_PREFIX: &str = "TUBEGRAPH";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct GexfConfig {
    /// Spaces per nesting level; 0 writes the document on a single line.
    pub indent: usize,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log: LogConfig,
    pub gexf: GexfConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log: LogConfig {
                level: "warn".into(),
            },
            gexf: GexfConfig {
                indent: 2,
                creator: None,
                description: None,
            },
        }
    }
}

impl AppConfig {
    /// Layered load from the current working directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."))
    }

    /// Defaults, then `tubegraph.*` and `config/tubegraph.*` under `dir`
    /// (both optional), then `TUBEGRAPH_*` environment variables.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let builder = Config::builder()
            .set_default("log.level", defaults.log.level)?
            .set_default("gexf.indent", defaults.gexf.indent as i64)?
            .add_source(File::from(dir.join(CONFIG_BASENAME)).required(false))
            .add_source(File::from(dir.join("config").join(CONFIG_BASENAME)).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_files() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.gexf.creator, None);
        assert_eq!(config.gexf.description, None);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("tubegraph.toml"),
            "[gexf]\nindent = 4\ncreator = \"crawler-lab\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.gexf.indent, 4);
        assert_eq!(config.gexf.creator.as_deref(), Some("crawler-lab"));
    }

    #[test]
    fn test_nested_config_dir_is_read() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("config")).unwrap();
        std::fs::write(
            dir.path().join("config").join("tubegraph.toml"),
            "[gexf]\ndescription = \"recommendation crawl\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(
            config.gexf.description.as_deref(),
            Some("recommendation crawl")
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("tubegraph.toml"), "[gexf\nindent = ").unwrap();
        assert!(AppConfig::load_from(dir.path()).is_err());
    }
}
