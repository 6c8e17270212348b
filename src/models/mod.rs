//! Data models shared between the session, the client and the CLI.

mod message;
mod request;

pub use message::{ConversationLog, Message, MessageRole};
pub use request::{IndexRequest, IndexResponse, QueryRequest, ServiceStatus};
