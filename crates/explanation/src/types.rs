use serde::{Deserialize, Serialize};

/// Canonical result of one explanation query.
///
/// Serializes to the current backend response shape, so feeding the output of
/// [`crate::normalize`] back into it returns an equal value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct Explanation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(rename = "explanation")]
    pub summary: String,
    pub claims: Vec<Claim>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct Claim {
    #[serde(rename = "claim_text")]
    pub text: String,
    pub score: f64,
    pub evidence: Vec<EvidenceCitation>,
}

/// Pointer from a claim back to the transcript line that supports it.
///
/// Every field is optional: older backends only send `sent_id`, and the
/// resolver needs to tell "absent" apart from "zero". The denormalized
/// `speaker`/`time`/`text` are rendered even when the line cannot be located.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct EvidenceCitation {
    #[serde(rename = "sent_id", default, skip_serializing_if = "Option::is_none")]
    pub sentence_id: Option<u64>,
    #[serde(rename = "turn_idx", default, skip_serializing_if = "Option::is_none")]
    pub turn_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl EvidenceCitation {
    /// Label shown next to an evidence line: the turn index, else the
    /// sentence id, else `-`.
    pub fn line_label(&self) -> String {
        match (self.turn_index, self.sentence_id) {
            (Some(turn_index), _) => turn_index.to_string(),
            (None, Some(sentence_id)) => sentence_id.to_string(),
            (None, None) => "-".to_string(),
        }
    }

    pub fn speaker_or_default(&self) -> &str {
        self.speaker.as_deref().unwrap_or_default()
    }

    pub fn text_or_default(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}
