//! Raíces de almacenamiento resueltas desde el entorno.
//! Convención: `PIPELAB_ARTIFACT_DIR` / `PIPELAB_CACHE_DIR`, con defaults
//! seguros para uso local.

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::constants::{DEFAULT_ARTIFACT_ROOT, DEFAULT_CACHE_ROOT, ENV_ARTIFACT_DIR, ENV_CACHE_DIR};

// El .env se lee a lo sumo una vez, la primera vez que alguien pide config.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // sin .env no es error
});

/// Raíces de almacenamiento para los backends en disco.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub artifact_root: PathBuf,
    pub cache_root: PathBuf,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let artifact_root = env::var(ENV_ARTIFACT_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_ARTIFACT_ROOT));
        let cache_root = env::var(ENV_CACHE_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CACHE_ROOT));
        Self { artifact_root, cache_root }
    }
}

/// Carga el .env de forma anticipada (opcional: `from_env` ya lo hace solo).
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_ARTIFACT_ROOT, DEFAULT_CACHE_ROOT};

    // Un solo test toca las variables de entorno: setearlas y sacarlas en
    // tests separados correría en paralelo sobre estado de proceso.
    #[test]
    fn env_overrides_and_defaults() {
        init_dotenv();
        env::set_var(ENV_ARTIFACT_DIR, "/tmp/pipelab-test-artifacts");
        env::set_var(ENV_CACHE_DIR, "/tmp/pipelab-test-cache");
        let custom = StorageConfig::from_env();
        assert_eq!(custom.artifact_root, PathBuf::from("/tmp/pipelab-test-artifacts"));
        assert_eq!(custom.cache_root, PathBuf::from("/tmp/pipelab-test-cache"));

        env::remove_var(ENV_ARTIFACT_DIR);
        env::remove_var(ENV_CACHE_DIR);
        let defaults = StorageConfig::from_env();
        assert_eq!(defaults.artifact_root, PathBuf::from(DEFAULT_ARTIFACT_ROOT));
        assert_eq!(defaults.cache_root, PathBuf::from(DEFAULT_CACHE_ROOT));
    }
}
