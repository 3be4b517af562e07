mod reqwest_client;

use std::future::Future;

pub use reqwest_client::ReqwestHttpClient;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Non-success response from the remote side. Carried inside [`Error`] so
/// callers can recover it with `downcast`.
#[derive(Debug, thiserror::Error)]
#[error("HTTP {status}: {body}")]
pub struct StatusError {
    pub status: u16,
    pub body: String,
}

pub trait HttpClient: Send + Sync {
    fn post(
        &self,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> impl Future<Output = Result<Vec<u8>, Error>> + Send;
}
