//! # VIA LIVRE I/O
//!
//! PNG readers and writers for icon canvases, the JSON generator config,
//! and the error type shared by everything that touches the filesystem.

pub mod config;
pub mod error;
pub mod png;

pub use config::GeneratorConfig;
pub use error::IconError;
pub use png::{decode_png, encode_png, read_png, write_png};
