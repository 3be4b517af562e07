use hypr_explain_client::{DEFAULT_TOP_K, ExplainClient, ExplainRequest};
use hypr_explanation::Explanation;
use hypr_http::HttpClient;
use hypr_transcript::{Transcript, TurnRecord};

use crate::clipboard::{Clipboard, copy_best_effort};
use crate::error::SessionError;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionStatus {
    #[default]
    Idle,
    Loading,
    Ready(Explanation),
    Failed(String),
}

/// Query/transcript state plus the outcome of the latest explanation request.
///
/// At most one request is in flight. [`begin`](Self::begin) drops whatever
/// result or error was showing before the request goes out, and refuses to
/// start a second request until [`complete`](Self::complete) is called.
pub struct ExplainSession<C> {
    client: ExplainClient<C>,
    query: String,
    transcript: Transcript,
    top_k: usize,
    status: SessionStatus,
}

impl<C: HttpClient> ExplainSession<C> {
    pub fn new(client: ExplainClient<C>) -> Self {
        Self {
            client,
            query: String::new(),
            transcript: Transcript::default(),
            top_k: DEFAULT_TOP_K,
            status: SessionStatus::Idle,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the transcript text; turns are re-parsed from scratch.
    pub fn set_transcript(&mut self, raw: impl Into<String>) -> bool {
        self.transcript.replace(raw)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn turns(&self) -> &[TurnRecord] {
        self.transcript.turns()
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, SessionStatus::Loading)
    }

    pub fn explanation(&self) -> Option<&Explanation> {
        match &self.status {
            SessionStatus::Ready(explanation) => Some(explanation),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            SessionStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn begin(&mut self) -> Result<ExplainRequest, SessionError> {
        if self.is_loading() {
            return Err(SessionError::Busy);
        }
        self.status = SessionStatus::Loading;
        Ok(ExplainRequest::new(self.query.clone(), self.transcript.turns()).top_k(self.top_k))
    }

    pub fn complete(
        &mut self,
        outcome: Result<Explanation, hypr_explain_client::Error>,
    ) -> Result<&SessionStatus, SessionError> {
        if !self.is_loading() {
            return Err(SessionError::NotLoading);
        }

        self.status = match outcome {
            Ok(explanation) => SessionStatus::Ready(explanation),
            Err(error) => {
                tracing::warn!(%error, "explain_request_failed");
                SessionStatus::Failed(error.to_string())
            }
        };
        Ok(&self.status)
    }

    pub async fn run(&mut self) -> Result<&SessionStatus, SessionError> {
        let request = self.begin()?;
        let outcome = self.client.explain(&request).await;
        self.complete(outcome)
    }

    /// Dismiss a shown result or error. A pending request is left alone.
    pub fn clear(&mut self) {
        if !self.is_loading() {
            self.status = SessionStatus::Idle;
        }
    }

    pub fn summary(&self) -> Option<&str> {
        self.explanation()
            .map(|explanation| explanation.summary.as_str())
            .filter(|summary| !summary.is_empty())
    }

    pub fn copy_summary(&self, clipboard: &dyn Clipboard) -> bool {
        self.summary()
            .is_some_and(|summary| copy_best_effort(clipboard, summary))
    }

    /// Copy the text of one transcript turn. `false` when the turn does not
    /// exist, has no text, or the clipboard refused the write.
    pub fn copy_turn(&self, turn_index: usize, clipboard: &dyn Clipboard) -> bool {
        match self.transcript.get(turn_index) {
            Some(turn) => copy_best_effort(clipboard, &turn.text),
            None => {
                tracing::debug!(turn_index, "copy_turn_missing");
                false
            }
        }
    }
}
