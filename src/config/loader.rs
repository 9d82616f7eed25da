//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/adr-advisor/config.toml)
//! 3. Project config (.adr-advisor/config.toml)
//! 4. Environment variables (ADR_ADVISOR_* prefix, `__` separates sections)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::constants::provider::API_KEY_ENV;
use crate::types::{AdvisorError, Result};

const ENV_PREFIX: &str = "ADR_ADVISOR_";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_from(
            Self::global_config_path().as_deref(),
            &Self::project_config_path(),
        )
    }

    /// Same chain with explicit file locations. Missing files are skipped.
    pub fn load_from(global: Option<&Path>, project: &Path) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(global_path));
        }

        if project.exists() {
            debug!("Loading project config from: {}", project.display());
            figment = figment.merge(Toml::file(project));
        }

        // e.g. ADR_ADVISOR_LLM__MODEL -> llm.model
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| AdvisorError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/adr-advisor/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("adr-advisor"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get project data directory
    pub fn project_dir() -> PathBuf {
        PathBuf::from(".adr-advisor")
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join("config.toml")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());

        let key_set = env::var(API_KEY_ENV).is_ok_and(|k| !k.trim().is_empty());
        println!(
            "  {}: {}",
            API_KEY_ENV,
            if key_set { "set" } else { "not set" }
        );
    }

    /// Render the effective configuration
    pub fn render(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| AdvisorError::Config(e.to_string()))
        }
    }

    /// Show current effective configuration
    pub fn show_config(as_json: bool) -> Result<()> {
        let config = Self::load()?;
        println!("{}", Self::render(&config, as_json)?);
        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            AdvisorError::Config("Cannot determine global config directory".to_string())
        })?;
        Self::write_config(&global_dir, Self::default_global_config(), force)?;
        Ok(global_dir)
    }

    /// Initialize project configuration
    pub fn init_project(force: bool) -> Result<PathBuf> {
        let project_dir = Self::project_dir();
        Self::write_config(&project_dir, Self::default_project_config(), force)?;
        Ok(project_dir)
    }

    fn write_config(dir: &Path, content: &str, force: bool) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;

        let config_path = dir.join("config.toml");
        if !config_path.exists() || force {
            fs::write(&config_path, content)?;
            info!("Created config: {}", config_path.display());
        } else {
            info!("Config exists: {}", config_path.display());
        }

        Ok(config_path)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn default_global_config() -> &'static str {
        r#"# adr-advisor Global Configuration
# User-wide defaults. Settings in .adr-advisor/config.toml override these.
# The provider key is read from OPENAI_API_KEY.

version = "1.0"

[server]
host = "127.0.0.1"
port = 8080
allowed_origins = ["http://localhost:3000"]

[llm]
provider = "openai"
model = "gpt-5-mini"
temperature = 1.0
max_completion_tokens = 16000
"#
    }

    fn default_project_config() -> &'static str {
        r#"# adr-advisor Project Configuration
# Project-specific settings that override global defaults.

version = "1.0"

# ADR defaults
[report]
owner = "개발팀"
status = "proposed"
source = "fixture"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{AdrStatus, ReportSourceKind};
    use tempfile::TempDir;

    #[test]
    fn test_load_without_files() {
        let temp_dir = TempDir::new().unwrap();
        let config =
            ConfigLoader::load_from(None, &temp_dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_project_overrides_global() {
        let temp_dir = TempDir::new().unwrap();
        let global = temp_dir.path().join("global.toml");
        let project = temp_dir.path().join("project.toml");

        fs::write(&global, "[server]\nport = 9000\nhost = \"0.0.0.0\"\n").unwrap();
        fs::write(&project, "[server]\nport = 9100\n\n[report]\nstatus = \"approved\"\nsource = \"selection\"\n").unwrap();

        let config = ConfigLoader::load_from(Some(&global), &project).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.report.status, AdrStatus::Approved);
        assert_eq!(config.report.source, ReportSourceKind::Selection);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("project.toml");
        fs::write(&project, "[llm]\ntemperature = 3.5\n").unwrap();

        assert!(matches!(
            ConfigLoader::load_from(None, &project),
            Err(AdvisorError::Config(_))
        ));
    }

    #[test]
    fn test_default_templates_parse() {
        let temp_dir = TempDir::new().unwrap();
        let global = ConfigLoader::write_config(
            &temp_dir.path().join("global"),
            ConfigLoader::default_global_config(),
            false,
        )
        .unwrap();
        let project = ConfigLoader::write_config(
            &temp_dir.path().join("project"),
            ConfigLoader::default_project_config(),
            false,
        )
        .unwrap();

        let config = ConfigLoader::load_from(Some(&global), &project).unwrap();
        assert_eq!(config.llm.model, "gpt-5-mini");
        assert_eq!(config.report.status, AdrStatus::Proposed);
    }

    #[test]
    fn test_write_config_respects_force() {
        let temp_dir = TempDir::new().unwrap();
        let path = ConfigLoader::write_config(temp_dir.path(), "version = \"1.0\"\n", false)
            .unwrap();
        fs::write(&path, "version = \"custom\"\n").unwrap();

        ConfigLoader::write_config(temp_dir.path(), "version = \"1.0\"\n", false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "version = \"custom\"\n");

        ConfigLoader::write_config(temp_dir.path(), "version = \"1.0\"\n", true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "version = \"1.0\"\n");
    }

    #[test]
    fn test_env_override() {
        let temp_dir = TempDir::new().unwrap();
        // SAFETY: no other test reads this variable
        unsafe {
            env::set_var("ADR_ADVISOR_REPORT__OWNER", "infra");
        }
        let config = ConfigLoader::load_from(None, &temp_dir.path().join("none.toml")).unwrap();
        unsafe {
            env::remove_var("ADR_ADVISOR_REPORT__OWNER");
        }
        assert_eq!(config.report.owner, "infra");
    }

    #[test]
    fn test_render_hides_api_key() {
        let mut config = Config::default();
        config.llm.api_key = Some("sk-hidden".to_string());

        for as_json in [true, false] {
            let rendered = ConfigLoader::render(&config, as_json).unwrap();
            assert!(!rendered.contains("sk-hidden"));
            assert!(rendered.contains("gpt-5-mini"));
        }
    }
}
