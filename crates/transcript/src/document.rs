use crate::parser::parse;
use crate::types::TurnRecord;

/// Parsed transcript together with the text it was parsed from.
///
/// There is no incremental editing: [`Transcript::replace`] re-parses the whole
/// document, so turn indices are always the ones assigned by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    raw: String,
    turns: Vec<TurnRecord>,
}

impl Transcript {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let turns = parse(&raw);
        Self { raw, turns }
    }

    /// Swap in a new document. Returns `true` if the text actually changed.
    pub fn replace(&mut self, raw: impl Into<String>) -> bool {
        let raw = raw.into();
        if raw == self.raw {
            return false;
        }
        *self = Self::new(raw);
        true
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn turns(&self) -> &[TurnRecord] {
        &self.turns
    }

    pub fn get(&self, turn_index: usize) -> Option<&TurnRecord> {
        self.turns
            .get(turn_index)
            .filter(|turn| turn.turn_index == turn_index)
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TurnRecord> {
        self.turns.iter()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a TurnRecord;
    type IntoIter = std::slice::Iter<'a, TurnRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
