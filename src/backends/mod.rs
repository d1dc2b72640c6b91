//! Built-in backends

#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod memory;

#[cfg(feature = "console")]
pub use console::{ConsoleBackend, ConsoleTemplate};
#[cfg(feature = "file")]
pub use file::FileBackend;
pub use memory::{MemoryBackend, MemoryHandle};

// Re-export the trait so backend authors need a single import
pub use crate::core::Backend;
