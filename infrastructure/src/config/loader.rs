//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::Uncased,
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["scout.toml", ".scout.toml"];

/// Well-known environment variables and the config keys they set.
const ENV_ALIASES: [(&str, &str); 6] = [
    ("OPENAI_API_KEY", "llm.api_key"),
    ("OPENAI_BASE_URL", "llm.base_url"),
    ("OPENAI_MODEL", "llm.model"),
    ("MINO_API_KEY", "browser.api_key"),
    ("MINO_BASE_URL", "browser.base_url"),
    ("BACKEND_URL", "backend.url"),
];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `SCOUT_*` variables (`SCOUT_EXPLORATION__DEPTH=deep`)
    /// 2. Well-known variables (`OPENAI_API_KEY`, `MINO_API_KEY`, `BACKEND_URL`, ...)
    /// 3. Explicit config path (if provided)
    /// 4. Project root: `./scout.toml` or `./.scout.toml`
    /// 5. Global: `$XDG_CONFIG_HOME/parallel-scout/config.toml`
    /// 6. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        Self::with_env(figment).extract().map_err(Box::new)
    }

    /// Defaults plus environment, ignoring every config file (for --no-config)
    pub fn load_without_files() -> Result<FileConfig, Box<figment::Error>> {
        let figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
        Self::with_env(figment).extract().map_err(Box::new)
    }

    fn with_env(figment: Figment) -> Figment {
        let aliases: Vec<&str> = ENV_ALIASES.iter().map(|(var, _)| *var).collect();
        figment
            .merge(Env::raw().only(&aliases).map(|key| match env_alias(key.as_str()) {
                Some(alias) => Uncased::from(alias),
                None => key.into(),
            }))
            .merge(Env::prefixed("SCOUT_").split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/parallel-scout/config.toml if set,
    /// otherwise falls back to ~/.config/parallel-scout/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("parallel-scout").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     SCOUT_* and OPENAI_*/MINO_*/BACKEND_URL");

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./scout.toml or ./.scout.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

/// Config key set by a well-known environment variable.
pub fn env_alias(var: &str) -> Option<&'static str> {
    ENV_ALIASES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(var))
        .map(|(_, key)| *key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("parallel-scout"));
    }

    #[test]
    fn test_env_alias() {
        assert_eq!(env_alias("OPENAI_API_KEY"), Some("llm.api_key"));
        assert_eq!(env_alias("mino_api_key"), Some("browser.api_key"));
        assert_eq!(env_alias("BACKEND_URL"), Some("backend.url"));
        assert_eq!(env_alias("HOME"), None);
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[exploration]\ndepth = \"deep\"\ntime_budget_minutes = 9\n\n[chat]\nmax_history = 4"
        )
        .unwrap();

        let config = ConfigLoader::load(Some(file.path())).unwrap();
        assert_eq!(config.exploration.depth, scout_domain::Depth::Deep);
        assert_eq!(config.exploration.time_budget_minutes, 9);
        assert_eq!(config.chat.max_history, 4);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[exploration\ndepth = ").unwrap();
        assert!(ConfigLoader::load(Some(file.path())).is_err());
    }
}
