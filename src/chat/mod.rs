pub mod models;
pub mod session;

pub use models::{ChatReply, Message, MessageMetadata, PendingApproval, Role, Turn};
pub use session::{ChatSession, ChatState, SendOutcome};
