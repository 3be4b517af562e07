/// One utterance of a delimited transcript.
///
/// `turn_index` is assigned once by [`crate::parse`] and is the only identity
/// evidence citations are resolved against. It is serialized as `turn_idx`,
/// which is also the shape the explanation backend expects in requests.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct TurnRecord {
    #[serde(rename = "turn_idx")]
    pub turn_index: usize,
    pub speaker: String,
    #[serde(default)]
    pub time: String,
    pub text: String,
}

impl TurnRecord {
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }
}
