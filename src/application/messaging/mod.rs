//! Message handling - Event-driven message processing

pub mod classifier;
pub mod dispatcher;
pub mod parser;

pub use classifier::{Classification, EventClassifier, Route};
pub use dispatcher::{CommandContext, Dispatch, MessageDispatcher};
pub use parser::MessageParser;
