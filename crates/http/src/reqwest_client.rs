use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::{Error, HttpClient, StatusError};

/// [`HttpClient`] over a plain `reqwest::Client`, resolving paths against a
/// fixed base URL.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    inner: reqwest::Client,
    base_url: Url,
}

impl ReqwestHttpClient {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Ok(Self {
            inner: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }
}

async fn read_body(response: reqwest::Response) -> Result<Vec<u8>, Error> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "http_non_success");
        return Err(Box::new(StatusError {
            status: status.as_u16(),
            body,
        }));
    }
    Ok(response.bytes().await?.to_vec())
}

impl HttpClient for ReqwestHttpClient {
    async fn post(&self, path: &str, body: Vec<u8>, content_type: &str) -> Result<Vec<u8>, Error> {
        let response = self
            .inner
            .post(self.url(path)?)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;
        read_body(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn post_returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/explain"))
            .and(header("content-type", "application/json"))
            .and(body_string("{}"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"claims\":[]}"))
            .mount(&server)
            .await;

        let client = ReqwestHttpClient::new(&server.uri()).unwrap();
        let bytes = client
            .post("/explain", b"{}".to_vec(), "application/json")
            .await
            .unwrap();
        assert_eq!(bytes, b"{\"claims\":[]}");
    }

    #[tokio::test]
    async fn non_success_status_carries_code_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/explain"))
            .respond_with(ResponseTemplate::new(503).set_body_string("model not loaded"))
            .mount(&server)
            .await;

        let client = ReqwestHttpClient::new(&server.uri()).unwrap();
        let err = client
            .post("/explain", b"{}".to_vec(), "application/json")
            .await
            .unwrap_err();
        let status = err.downcast::<StatusError>().unwrap();
        assert_eq!(status.status, 503);
        assert_eq!(status.body, "model not loaded");
        assert_eq!(status.to_string(), "HTTP 503: model not loaded");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(ReqwestHttpClient::new("not a url").is_err());
    }
}
