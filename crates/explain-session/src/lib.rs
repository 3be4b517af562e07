mod clipboard;
mod error;
mod navigation;
mod session;

pub use clipboard::{Clipboard, ClipboardError, copy_best_effort};
pub use error::SessionError;
pub use navigation::{NavigationBridge, ScrollTarget};
pub use session::{ExplainSession, SessionStatus};
