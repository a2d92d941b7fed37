use std::path::Path;
use std::sync::Arc;
use ls_core::{Error, RecordStorage, Result};

pub mod backends;

pub use backends::*;

pub const DEFAULT_OUTPUT_PATH: &str = "scraped_lessons.json";

/// Build the storage backend named by `kind`.
///
/// `json` writes to `path`, `memory` keeps the batch in process and ignores it.
pub fn create_storage(kind: &str, path: &Path) -> Result<Arc<dyn RecordStorage>> {
    match kind {
        "json" => Ok(Arc::new(JsonFileStorage::new(path))),
        "memory" => Ok(Arc::new(MemoryStorage::new())),
        other => Err(Error::Config(format!(
            "Unknown storage '{}'. Available storages: json, memory",
            other
        ))),
    }
}

pub mod prelude {
    pub use super::create_storage;
    pub use super::backends::*;
}
