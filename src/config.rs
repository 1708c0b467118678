//! Configuration for the airwaves store.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (AIRWAVES_HOME, AIRWAVES_DB)
//! 2. Config file (.airwaves/config.yaml)
//! 3. Defaults (~/.airwaves, database airwaves.db inside it)
//!
//! Config file discovery:
//! - Searches current directory and parents for .airwaves/config.yaml
//! - `paths.home` is relative to the .airwaves/ directory
//! - `paths.database` is relative to the project root (parent of .airwaves/)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::store::StoreSettings;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

const DEFAULT_DB_FILE: &str = "airwaves.db";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub store: Option<StoreConfig>,
    #[serde(default)]
    pub permalinks: Option<PermalinkConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to .airwaves/)
    pub home: Option<String>,
    /// SQLite database file (relative to the project root)
    pub database: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub busy_timeout_ms: Option<u64>,
}

/// Route templates owned by the website; `{slug}` is substituted
#[derive(Debug, Clone, Deserialize)]
pub struct PermalinkConfig {
    pub bio: Option<String>,
    pub program: Option<String>,
    pub content: Option<String>,
}

/// Resolved permalink templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permalinks {
    pub bio: String,
    pub program: String,
    pub content: String,
}

impl Default for Permalinks {
    fn default() -> Self {
        Self {
            bio: "/about/staff/{slug}/".to_string(),
            program: "/about/programs/{slug}/".to_string(),
            content: "/about/{slug}/".to_string(),
        }
    }
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// State directory
    pub home: PathBuf,
    /// Database file
    pub database: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Connection settings
    pub store: StoreSettings,
    pub permalinks: Permalinks,
}

/// Values read from the environment
#[derive(Debug, Clone, Default)]
struct EnvOverrides {
    home: Option<PathBuf>,
    database: Option<PathBuf>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            home: std::env::var_os("AIRWAVES_HOME").map(PathBuf::from),
            database: std::env::var_os("AIRWAVES_DB").map(PathBuf::from),
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".airwaves").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to `base`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

fn resolve(
    config_file: Option<PathBuf>,
    env: EnvOverrides,
    default_home: PathBuf,
) -> Result<ResolvedConfig> {
    let Some(config_path) = config_file else {
        // No config file - use env vars or defaults
        let home = env.home.unwrap_or(default_home);
        let database = env.database.unwrap_or_else(|| home.join(DEFAULT_DB_FILE));

        return Ok(ResolvedConfig {
            home,
            database,
            config_file: None,
            store: StoreSettings::default(),
            permalinks: Permalinks::default(),
        });
    };

    let config = load_config_file(&config_path)?;

    let airwaves_dir = config_path.parent().unwrap_or(Path::new("."));
    let project_root = airwaves_dir.parent().unwrap_or(Path::new("."));

    let home = match (env.home, &config.paths.home) {
        (Some(home), _) => home,
        (None, Some(home)) => resolve_path(airwaves_dir, home),
        (None, None) => default_home,
    };

    let database = match (env.database, &config.paths.database) {
        (Some(database), _) => database,
        (None, Some(database)) => resolve_path(project_root, database),
        (None, None) => home.join(DEFAULT_DB_FILE),
    };

    let mut store = StoreSettings::default();
    if let Some(ms) = config.store.as_ref().and_then(|s| s.busy_timeout_ms) {
        store.busy_timeout = Duration::from_millis(ms);
    }

    let mut permalinks = Permalinks::default();
    if let Some(links) = config.permalinks {
        if let Some(bio) = links.bio {
            permalinks.bio = bio;
        }
        if let Some(program) = links.program {
            permalinks.program = program;
        }
        if let Some(content) = links.content {
            permalinks.content = content;
        }
    }

    Ok(ResolvedConfig {
        home,
        database,
        config_file: Some(config_path),
        store,
        permalinks,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".airwaves");

    resolve(find_config_file(), EnvOverrides::from_env(), default_home)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

/// Get the configured database path
pub fn database_path() -> Result<PathBuf> {
    Ok(config()?.database.clone())
}
