//! Utility functions and helpers.

pub mod html;
pub mod timestamp;

// Re-export commonly used types
pub use html::escape_text;
pub use timestamp::TimestampFormat;
