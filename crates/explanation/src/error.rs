#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedResponse {
    #[error("response is not a JSON object (got {0})")]
    NotAnObject(&'static str),
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
}
