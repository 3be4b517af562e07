use hypr_explanation::{Explanation, normalize_slice};
use hypr_http::HttpClient;

use crate::error::Error;
use crate::types::ExplainRequest;

pub const EXPLAIN_PATH: &str = "/explain";

pub struct ExplainClient<C> {
    http: C,
}

impl<C: HttpClient> ExplainClient<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    /// Send one query and normalize whichever response shape comes back.
    pub async fn explain(&self, req: &ExplainRequest) -> Result<Explanation, Error> {
        let body = serde_json::to_vec(req)?;
        tracing::debug!(
            turns = req.transcript.len(),
            top_k = req.top_k,
            "explain_request"
        );

        let bytes = self
            .http
            .post(EXPLAIN_PATH, body, "application/json")
            .await
            .map_err(Error::from_http)?;

        let explanation = normalize_slice(&bytes)?;
        tracing::debug!(claims = explanation.claims.len(), "explain_response");
        Ok(explanation)
    }
}
