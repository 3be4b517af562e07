//! Reconciles the explanation backend's response shapes into [`Explanation`].
//!
//! The backend has shipped two incompatible claim layouts:
//!
//! - **current**: `{claim_text, score, evidence: [{sent_id, turn_idx, speaker, time, text}]}`
//! - **legacy**: `{candidate: {text, ..}, score, context: [{sent_id, turn_idx, ..}]}`
//!
//! Legacy responses also never carried a top-level `explanation`, so the
//! summary is synthesized from the first claim when it is missing. The layout is
//! picked once per response by probing the first claim ([`detect_shape`]).

use serde_json::{Map, Value};

use crate::error::MalformedResponse;
use crate::types::{Claim, EvidenceCitation, Explanation};

type Object = Map<String, Value>;

/// Claim layout of a response, decided from its first element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimShape {
    Current,
    Legacy,
    Unrecognized,
}

pub fn detect_shape(claims: &[Value]) -> ClaimShape {
    let Some(first) = claims.first().and_then(Value::as_object) else {
        return ClaimShape::Unrecognized;
    };

    if first.get("claim_text").is_some_and(Value::is_string) {
        ClaimShape::Current
    } else if first.get("candidate").is_some_and(Value::is_object) {
        ClaimShape::Legacy
    } else {
        ClaimShape::Unrecognized
    }
}

/// Normalize a raw backend payload. Fails only when the payload is not a JSON
/// object; an unknown claim layout yields an explanation with no claims.
pub fn normalize(payload: &Value) -> Result<Explanation, MalformedResponse> {
    let Some(root) = payload.as_object() else {
        return Err(MalformedResponse::NotAnObject(json_kind(payload)));
    };

    let raw_claims = root
        .get("claims")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let shape = detect_shape(raw_claims);
    let claims = match shape {
        ClaimShape::Current => raw_claims.iter().map(current_claim).collect(),
        ClaimShape::Legacy => raw_claims.iter().map(legacy_claim).collect(),
        ClaimShape::Unrecognized => {
            if !raw_claims.is_empty() {
                tracing::warn!(count = raw_claims.len(), "unrecognized_claim_shape");
            }
            Vec::new()
        }
    };

    let summary = match non_empty_str(root, "explanation") {
        Some(summary) => summary.to_string(),
        None => raw_claims
            .first()
            .map(synthesize_summary)
            .unwrap_or_default(),
    };

    tracing::debug!(?shape, claims = claims.len(), "response_normalized");

    Ok(Explanation {
        query: root.get("query").and_then(Value::as_str).map(str::to_string),
        summary,
        claims,
    })
}

/// Parse and normalize a raw response body.
pub fn normalize_slice(bytes: &[u8]) -> Result<Explanation, MalformedResponse> {
    let payload: Value = serde_json::from_slice(bytes)
        .map_err(|e| MalformedResponse::InvalidJson(e.to_string()))?;
    normalize(&payload)
}

fn synthesize_summary(first: &Value) -> String {
    let text = first
        .get("claim_text")
        .and_then(Value::as_str)
        .or_else(|| {
            first
                .get("candidate")
                .and_then(|candidate| candidate.get("text"))
                .and_then(Value::as_str)
        })
        .or_else(|| first.get("claim").and_then(Value::as_str))
        .unwrap_or_default();

    format!(
        "Likely reason: \"{}\" (score {})",
        text,
        two_decimals(score(first))
    )
}

/// Fixed two-decimal rendering with exact ties rounded away from zero.
///
/// A tie at the second decimal is only representable when the value is an odd
/// multiple of 1/8; `{:.2}` would round those half-to-even.
fn two_decimals(value: f64) -> String {
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        format!("{:.2}", (value * 100.0).round() / 100.0)
    } else {
        format!("{value:.2}")
    }
}

fn current_claim(raw: &Value) -> Claim {
    let evidence = raw
        .get("evidence")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(citation).collect())
        .unwrap_or_default();

    Claim {
        text: raw
            .get("claim_text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        score: score(raw),
        evidence,
    }
}

fn legacy_claim(raw: &Value) -> Claim {
    let evidence = raw
        .get("context")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(citation).collect())
        .unwrap_or_default();

    Claim {
        text: raw
            .get("candidate")
            .and_then(|candidate| candidate.get("text"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        score: score(raw),
        evidence,
    }
}

/// Field-by-field copy of one evidence/context entry. Missing keys stay `None`.
fn citation(raw: &Value) -> Option<EvidenceCitation> {
    let Some(entry) = raw.as_object() else {
        tracing::warn!("evidence_entry_not_an_object");
        return None;
    };

    let sentence_id = index_field(entry, "sent_id");
    // `index` is the last-resort key, below `sent_id`.
    let turn_index = index_field(entry, "turn_idx").or_else(|| {
        sentence_id
            .is_none()
            .then(|| index_field(entry, "index"))
            .flatten()
    });

    Some(EvidenceCitation {
        sentence_id,
        turn_index: turn_index.and_then(|index| usize::try_from(index).ok()),
        speaker: string_field(entry, "speaker"),
        time: string_field(entry, "time"),
        text: string_field(entry, "text"),
    })
}

fn score(raw: &Value) -> f64 {
    raw.get("score").and_then(Value::as_f64).unwrap_or(0.0)
}

/// Non-negative integer, also accepted as a whole-number float (`1.0`).
fn index_field(entry: &Object, key: &str) -> Option<u64> {
    let value = entry.get(key)?;
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= u64::MAX as f64)
            .map(|n| n as u64)
    })
}

fn string_field(entry: &Object, key: &str) -> Option<String> {
    entry.get(key).and_then(Value::as_str).map(str::to_string)
}

fn non_empty_str<'a>(root: &'a Object, key: &str) -> Option<&'a str> {
    root.get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
