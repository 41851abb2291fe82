//! Constantes del engine.
//!
//! Este módulo agrupa los valores estáticos que participan en el cálculo de
//! claves de cache y los nombres/defaults de configuración de almacenamiento.
//! Cambios en estas constantes pueden invalidar entradas previas si forman
//! parte del input del hashing (por diseño, `CACHE_KEY_VERSION` sí lo es).

/// Versión lógica del formato de clave de cache. Se incluye en el input del
/// hash para que un cambio incompatible de formato recalcule las claves de
/// forma determinística en lugar de leer entradas viejas. Mantener estable
/// mientras no haya cambios incompatibles.
pub const CACHE_KEY_VERSION: &str = "C1.0";

/// Variable de entorno que define la raíz de artifacts en disco.
pub const ENV_ARTIFACT_DIR: &str = "PIPELAB_ARTIFACT_DIR";

/// Variable de entorno que define la raíz del cache en disco.
pub const ENV_CACHE_DIR: &str = "PIPELAB_CACHE_DIR";

/// Raíz por defecto para artifacts en disco cuando no hay configuración.
pub const DEFAULT_ARTIFACT_ROOT: &str = "/tmp/pipelab";

/// Raíz por defecto para entradas de cache en disco.
pub const DEFAULT_CACHE_ROOT: &str = ".cache";
