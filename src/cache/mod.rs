//! Memoización content-addressable por step.
//!
//! Ambos backends comparten el contrato: antes de ejecutar se deriva una
//! clave determinística de {argumentos ligados, configuración del step} y,
//! si hay entrada, se devuelven los outputs memoizados sin ejecutar el
//! step interno. Los wrappers son steps a su vez, así que un pipeline los
//! trata igual que a cualquier otro.

pub mod disk;
pub mod key;
pub mod memory;

pub use disk::DiskCacheStep;
pub use key::cache_key;
pub use memory::{MemoryCache, MemoryCacheStep};

use std::path::Path;

use crate::config::StorageConfig;
use crate::step::Step;

/// Azúcar para envolver cualquier step con memoización.
pub trait CacheExt: Step + Sized {
    /// Cache persistente bajo `root`.
    fn into_disk_cache(self, root: impl AsRef<Path>) -> DiskCacheStep<Self> {
        DiskCacheStep::new(self, root)
    }

    /// Cache persistente bajo la raíz configurada por entorno.
    fn into_disk_cache_default(self) -> DiskCacheStep<Self> {
        let root = StorageConfig::from_env().cache_root;
        DiskCacheStep::new(self, root)
    }

    /// Cache en memoria compartido a través de `cache`.
    fn into_memory_cache(self, cache: MemoryCache) -> MemoryCacheStep<Self> {
        MemoryCacheStep::new(self, cache)
    }
}

impl<S: Step + Sized> CacheExt for S {}
