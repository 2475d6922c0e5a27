//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["mcp-chat.toml", ".mcp-chat.toml"];
const ENV_PREFIX: &str = "MCP_CHAT_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./mcp-chat.toml` or `./.mcp-chat.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/mcp-chat/config.toml`
    /// 4. Environment variables (`MCP_CHAT_BACKEND__BASE_URL`, ...)
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )
        .extract()
        .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Build the merged figment; later merges win.
    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Some(path) = global.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = project {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = explicit {
            // A missing explicit file is an error, not a silent fallback
            figment = figment.merge(Toml::file_exact(path));
        }

        figment
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/mcp-chat/config.toml if set,
    /// otherwise falls back to ~/.config/mcp-chat/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("mcp-chat").join("config.toml"))
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

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./mcp-chat.toml or ./.mcp-chat.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Env:     {}<SECTION>__<KEY>", ENV_PREFIX);
        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.session.default_model, "qwen3:1.7b");
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("mcp-chat"));
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "custom.toml",
            r#"
[backend]
base_url = "http://10.0.0.5:3000"

[session]
default_model = "llama3"
"#,
        );

        let config: FileConfig = ConfigLoader::figment(None, None, Some(&path))
            .extract()
            .unwrap();

        assert_eq!(config.backend.base_url, "http://10.0.0.5:3000");
        assert_eq!(config.session.default_model, "llama3");
        assert_eq!(config.session.new_thread_name, "New Chat");
    }

    #[test]
    fn test_file_priority_order() {
        let dir = TempDir::new().unwrap();
        let global = write(
            &dir,
            "global.toml",
            r#"
[session]
default_model = "global-model"
new_thread_name = "Global Chat"

[repl]
color = false
"#,
        );
        let project = write(
            &dir,
            "mcp-chat.toml",
            r#"
[session]
default_model = "project-model"
"#,
        );
        let explicit = write(
            &dir,
            "explicit.toml",
            r#"
[session]
new_thread_name = "Explicit Chat"
"#,
        );

        let config: FileConfig =
            ConfigLoader::figment(Some(&global), Some(&project), Some(&explicit))
                .extract()
                .unwrap();

        assert_eq!(config.session.default_model, "project-model");
        assert_eq!(config.session.new_thread_name, "Explicit Chat");
        assert!(!config.repl.color);
    }

    #[test]
    fn test_missing_global_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.toml");

        let config: FileConfig = ConfigLoader::figment(Some(&missing), None, None)
            .extract()
            .unwrap();

        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.toml");

        let result: Result<FileConfig, _> =
            ConfigLoader::figment(None, None, Some(&missing)).extract();

        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "bad.toml",
            r#"
[backend]
request_timeout_seconds = "soon"
"#,
        );

        let result: Result<FileConfig, _> = ConfigLoader::figment(None, None, Some(&path)).extract();

        assert!(result.is_err());
    }
}
