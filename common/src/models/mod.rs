//! Shared data models for the console and its upstream API.

pub mod connection;
pub mod message;

// Re-export commonly used types
pub use connection::ConnectionInfo;
pub use message::{Message, MessageId, MessageList, SaveMessageRequest, SavedMessage, Timestamp};
