//! Input/output handling for JSON command batches.

pub mod json_format;

pub use json_format::{load_input, write_output, InputData, RateSeed, UserSeed};
