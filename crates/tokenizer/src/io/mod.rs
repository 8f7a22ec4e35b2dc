//! Serialization and deserialization for trained vocabularies.
//!
//! Two formats are supported: a compact binary record list (default) and a
//! JSON document for `.json` paths.

pub mod format;
pub mod load;
pub mod save;

pub use format::{ModelFormat, SerializedVocabulary};
pub use load::TokenizerLoader;
pub use save::TokenizerSaver;
