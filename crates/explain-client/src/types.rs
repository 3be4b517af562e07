use serde::Serialize;

use hypr_transcript::TurnRecord;

pub const DEFAULT_TOP_K: usize = 3;

/// Body of `POST /explain`. Turns serialize as `{turn_idx, speaker, time, text}`.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainRequest {
    pub query: String,
    pub transcript: Vec<TurnRecord>,
    pub top_k: usize,
}

impl ExplainRequest {
    pub fn new(query: impl Into<String>, transcript: &[TurnRecord]) -> Self {
        Self {
            query: query.into(),
            transcript: transcript.to_vec(),
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}
