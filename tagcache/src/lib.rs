mod cached;
mod cfg_debug;
mod dependency_index;
mod error;
mod lock;
mod options;
mod store;
mod tag;
mod tag_cache;

pub use cached::Cached;
pub use cfg_debug::CfgDebug;
pub use dependency_index::DependencyIndex;
pub use error::{BackendError, Context, Error, IndexKind, LockMode, Result};
pub use options::CacheOptions;
pub use store::{MemoryStore, ValueStore};
pub use tag::Tag;
pub use tag_cache::TagCache;
