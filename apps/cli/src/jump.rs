use std::fmt;
use std::str::FromStr;

use hypr_explanation::{EvidenceCitation, Explanation};

/// `<claim>.<evidence>`, both 1-based as printed by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpTarget {
    pub claim: usize,
    pub evidence: usize,
}

impl JumpTarget {
    pub fn select<'a>(&self, explanation: &'a Explanation) -> Option<&'a EvidenceCitation> {
        explanation
            .claims
            .get(self.claim.checked_sub(1)?)?
            .evidence
            .get(self.evidence.checked_sub(1)?)
    }
}

impl FromStr for JumpTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (claim, evidence) = s
            .split_once('.')
            .ok_or_else(|| format!("expected <claim>.<evidence>, got {s:?}"))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| format!("{part:?} is not a positive number"))
        };
        Ok(Self {
            claim: parse(claim)?,
            evidence: parse(evidence)?,
        })
    }
}

impl fmt::Display for JumpTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.claim, self.evidence)
    }
}
