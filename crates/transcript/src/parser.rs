use crate::types::TurnRecord;

pub const DELIMITER: char = '|';

/// Label used when a line carries no speaker.
pub const DEFAULT_SPEAKER: &str = "Speaker";

/// Parse `speaker|text` lines into turns.
///
/// Every `\n`-separated line yields exactly one turn, blank lines included, so
/// turn indices always line up with the line numbers of the source text. Only
/// the first delimiter splits; anything after it belongs to the text. Empty
/// input yields no turns.
pub fn parse(raw: &str) -> Vec<TurnRecord> {
    if raw.is_empty() {
        return Vec::new();
    }

    raw.split('\n')
        .enumerate()
        .map(|(turn_index, line)| parse_line(turn_index, line))
        .collect()
}

fn parse_line(turn_index: usize, line: &str) -> TurnRecord {
    let (speaker, text) = match line.split_once(DELIMITER) {
        Some((speaker, text)) => (speaker.trim(), text.trim()),
        None => ("", line.trim()),
    };

    let speaker = if speaker.is_empty() {
        DEFAULT_SPEAKER
    } else {
        speaker
    };

    TurnRecord {
        turn_index,
        speaker: speaker.to_string(),
        time: String::new(),
        text: text.to_string(),
    }
}

/// Short avatar label for a speaker: the first two letters of a single name,
/// or the first letter of each of the first two words.
pub fn speaker_initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    match (words.next(), words.next()) {
        (None, _) => "?".to_string(),
        (Some(first), None) => first.chars().take(2).collect::<String>().to_uppercase(),
        (Some(first), Some(second)) => first
            .chars()
            .take(1)
            .chain(second.chars().take(1))
            .collect::<String>()
            .to_uppercase(),
    }
}
