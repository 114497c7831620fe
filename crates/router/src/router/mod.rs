//! Intent resolution and tool dispatch.
//!
//! The resolver delegates query classification to Gemini; the dispatcher
//! validates the model's decision against the fixed allow-list and runs the
//! matching catalog lookup. The allow-list is a hard boundary: an operation
//! whose name was not statically registered is never executed.

mod dispatcher;
mod resolver;
mod tools;

pub use dispatcher::{Dispatcher, route_query};
pub use resolver::{IntentResolver, Resolution, interpret};
pub use tools::{ALLOWED_TOOLS, ToolCall, catalog_tools};
