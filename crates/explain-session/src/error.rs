#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("an explanation request is already in flight")]
    Busy,
    #[error("no request is in flight")]
    NotLoading,
}
