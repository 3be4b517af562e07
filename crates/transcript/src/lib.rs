pub mod document;
pub mod parser;
pub mod types;

pub use document::Transcript;
pub use parser::{DEFAULT_SPEAKER, DELIMITER, parse, speaker_initials};
pub use types::TurnRecord;
