use hypr_transcript::TurnRecord;

use crate::types::EvidenceCitation;

/// Outcome of locating a citation in the parsed transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The citation's `turn_idx` names an existing turn.
    Exact(usize),
    /// No usable key; points at the first turn so the jump still lands
    /// somewhere visible.
    Default(usize),
    /// The transcript has no turns.
    NotFound,
}

impl Resolution {
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Exact(index) | Self::Default(index) => Some(index),
            Self::NotFound => None,
        }
    }

    pub fn is_exact(self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

/// Map a citation to a turn index.
///
/// Order: `turn_idx` when it names an existing turn, then `sent_id`, then the
/// first turn. Turns carry no sentence ids, so a `sent_id`-only citation always
/// ends on the first turn; the id is kept on the citation for display only.
/// Nothing here matches on text content.
pub fn resolve(citation: &EvidenceCitation, turns: &[TurnRecord]) -> Resolution {
    if let Some(turn_index) = citation.turn_index {
        if let Some(turn) = lookup(turns, turn_index) {
            tracing::trace!(turn_index, "citation_resolved_by_turn_index");
            return Resolution::Exact(turn.turn_index);
        }
        tracing::debug!(turn_index, turns = turns.len(), "citation_turn_index_out_of_range");
    }

    // TODO: match on sentence ids once turns carry the backend's sentence split.
    if let Some(sentence_id) = citation.sentence_id {
        tracing::debug!(sentence_id, "citation_sentence_id_unmatched");
    }

    match turns.first() {
        Some(first) => Resolution::Default(first.turn_index),
        None => Resolution::NotFound,
    }
}

fn lookup(turns: &[TurnRecord], turn_index: usize) -> Option<&TurnRecord> {
    match turns.get(turn_index) {
        Some(turn) if turn.turn_index == turn_index => Some(turn),
        _ => turns.iter().find(|turn| turn.turn_index == turn_index),
    }
}
