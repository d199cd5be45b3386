pub mod json_backend;
pub mod memory_backend;

pub use json_backend::JsonStorageBackend;
pub use memory_backend::MemoryStorageBackend;
