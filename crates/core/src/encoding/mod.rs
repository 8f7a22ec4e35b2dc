//! Encoding and decoding between raw bytes and token IDs.

pub mod byte_level;

pub use byte_level::ByteLevelEncoder;
