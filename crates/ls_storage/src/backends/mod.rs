pub mod memory;
pub mod json;

pub use memory::MemoryStorage;
pub use json::JsonFileStorage;
