use std::io::{self, Write};

use crossterm::style::Stylize;

use hypr_explain_session::ScrollTarget;
use hypr_explanation::Explanation;
use hypr_transcript::{TurnRecord, speaker_initials};

pub fn transcript(out: &mut impl Write, turns: &[TurnRecord]) -> io::Result<()> {
    writeln!(out, "{}", "Transcript".bold())?;
    if turns.is_empty() {
        writeln!(out, "  No transcript loaded.")?;
    }
    for turn in turns {
        write_turn(out, turn, false)?;
    }
    writeln!(out)
}

pub fn explanation(out: &mut impl Write, explanation: &Explanation) -> io::Result<()> {
    writeln!(out, "{}", "Explanation".bold())?;
    writeln!(out, "  {}", explanation.summary)?;
    writeln!(out)?;

    writeln!(out, "{}", "Claims & Evidence".bold())?;
    if explanation.claims.is_empty() {
        writeln!(out, "  No claims found.")?;
    }
    for (i, claim) in explanation.claims.iter().enumerate() {
        writeln!(
            out,
            "[{}] {} {}",
            i + 1,
            claim.text.as_str().bold(),
            format!("score: {:.2}", claim.score).dark_grey()
        )?;
        if claim.evidence.is_empty() {
            writeln!(out, "    No explicit evidence lines found.")?;
        }
        for (j, citation) in claim.evidence.iter().enumerate() {
            writeln!(
                out,
                "    {}.{} {}: {} {}",
                i + 1,
                j + 1,
                citation.speaker_or_default().bold(),
                citation.text_or_default(),
                format!("(turn: {})", citation.line_label()).dark_grey()
            )?;
        }
    }
    Ok(())
}

fn write_turn(out: &mut impl Write, turn: &TurnRecord, emphasized: bool) -> io::Result<()> {
    let line = format!(
        "{:>4}  [{}] {}: {}",
        turn.turn_index,
        speaker_initials(&turn.speaker),
        turn.speaker,
        turn.text
    );
    if emphasized {
        writeln!(out, "{}", line.black().on_yellow())
    } else {
        writeln!(out, "{line}")
    }
}

/// Prints a window of turns centered on the jump target.
pub struct TerminalViewport<'a> {
    turns: &'a [TurnRecord],
    context: usize,
}

impl<'a> TerminalViewport<'a> {
    pub fn new(turns: &'a [TurnRecord], context: usize) -> Self {
        Self { turns, context }
    }

    fn draw(&self, center: usize, emphasized: bool) -> io::Result<()> {
        let mut out = io::stdout().lock();
        let start = center.saturating_sub(self.context);
        let end = center.saturating_add(self.context + 1);

        writeln!(out)?;
        for turn in self
            .turns
            .iter()
            .filter(|turn| (start..end).contains(&turn.turn_index))
        {
            write_turn(&mut out, turn, emphasized && turn.turn_index == center)?;
        }
        out.flush()
    }

    /// Repaint the window once the highlight is gone.
    pub fn redraw(&self, center: usize) -> io::Result<()> {
        self.draw(center, false)
    }
}

impl ScrollTarget for TerminalViewport<'_> {
    fn scroll_into_view(&self, turn_index: usize) {
        if let Err(error) = self.draw(turn_index, true) {
            tracing::warn!(%error, turn_index, "viewport_draw_failed");
        }
    }
}
