//! pipelab: engine de pipelines in-process.
//!
//! Steps nombrados que se comunican únicamente a través de un store de
//! artifacts nombre -> valor, con memoización content-addressable opcional
//! por step (memoria o disco) y composición de pipelines en un DAG con
//! visibilidad de artifacts padre -> hijo y scheduling topológico. Todo el
//! engine es sincrónico y single-threaded.

pub mod cache;
pub mod compose;
pub mod config;
pub mod constants;
pub mod errors;
mod fsutil;
pub mod hashing;
pub mod model;
pub mod pipeline;
pub mod step;
pub mod store;

pub use cache::{cache_key, CacheExt, DiskCacheStep, MemoryCache, MemoryCacheStep};
pub use compose::Composition;
pub use config::{init_dotenv, StorageConfig};
pub use errors::PipelineError;
pub use hashing::{hash_str, hash_value, to_canonical_json};
pub use model::{bind_defaults, BoundArgs, ParamSpec, StepOutputs};
pub use pipeline::{Pipeline, SharedPipeline, StepRecord, StorageMode};
pub use step::Step;
pub use store::{ArtifactStore, DiskArtifactStore, InMemoryArtifactStore};
