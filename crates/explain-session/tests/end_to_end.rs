use std::cell::RefCell;
use std::sync::Mutex;
use std::time::Duration;

use explain_session::{ExplainSession, NavigationBridge, ScrollTarget};
use hypr_explain_client::ExplainClient;
use hypr_highlight::{HighlightController, HighlightState};
use hypr_http::HttpClient;

const RESPONSE: &str = r#"{
    "query": "Why delayed?",
    "claims": [{
        "claim_text": "Who followed up?",
        "score": 0.64,
        "evidence": [{"sent_id": 1, "turn_idx": 1, "speaker": "Bob", "time": "", "text": "Who followed up?"}]
    }]
}"#;

#[derive(Default)]
struct Backend {
    requests: Mutex<Vec<serde_json::Value>>,
}

impl HttpClient for &Backend {
    async fn post(
        &self,
        _path: &str,
        body: Vec<u8>,
        _content_type: &str,
    ) -> Result<Vec<u8>, hypr_http::Error> {
        self.requests
            .lock()
            .unwrap()
            .push(serde_json::from_slice(&body)?);
        Ok(RESPONSE.as_bytes().to_vec())
    }
}

#[derive(Default)]
struct Viewport(RefCell<Vec<usize>>);

impl ScrollTarget for Viewport {
    fn scroll_into_view(&self, turn_index: usize) {
        self.0.borrow_mut().push(turn_index);
    }
}

#[tokio::test(start_paused = true)]
async fn query_to_highlight() {
    let backend = Backend::default();
    let mut session = ExplainSession::new(ExplainClient::new(&backend));
    session.set_transcript("Alice|We still haven't got approval.\nBob|Who followed up?");
    session.set_query("Why delayed?");

    session.run().await.unwrap();

    let requests = backend.requests.lock().unwrap();
    let turn_indices: Vec<_> = requests[0]["transcript"]
        .as_array()
        .unwrap()
        .iter()
        .map(|turn| turn["turn_idx"].as_u64().unwrap())
        .collect();
    assert_eq!(turn_indices, [0, 1]);
    assert_eq!(requests[0]["query"], "Why delayed?");
    drop(requests);

    let explanation = session.explanation().unwrap().clone();
    assert_eq!(
        explanation.summary,
        "Likely reason: \"Who followed up?\" (score 0.64)"
    );
    let citation = &explanation.claims[0].evidence[0];

    let viewport = Viewport::default();
    let mut bridge = NavigationBridge::new(&viewport, HighlightController::new());
    assert_eq!(bridge.jump_to(citation, session.turns()), Some(1));
    assert_eq!(*viewport.0.borrow(), [1]);
    assert_eq!(bridge.highlight().state(), HighlightState::Highlighted(1));

    tokio::time::advance(Duration::from_millis(2400)).await;
    tokio::task::yield_now().await;
    assert_eq!(bridge.highlight().state(), HighlightState::Highlighted(1));

    tokio::time::advance(Duration::from_millis(200)).await;
    tokio::task::yield_now().await;
    assert_eq!(bridge.highlight().state(), HighlightState::Idle);
}
