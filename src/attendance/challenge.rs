use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Partial-id confirmation: the user must type the digits found at two
/// random 1-based positions of their national id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    positions: [usize; 2],
    entered: BTreeMap<usize, String>,
}

impl Challenge {
    /// Picks two distinct positions in `[1, len(id)]`, sorted ascending.
    /// Ids shorter than two characters can't host a challenge.
    pub fn generate<R: Rng>(id: &str, rng: &mut R) -> Option<Self> {
        let len = id.chars().count();
        if len < 2 {
            return None;
        }

        let first = rng.gen_range(1..=len);
        let mut second = rng.gen_range(1..=len);
        while second == first {
            second = rng.gen_range(1..=len);
        }

        Some(Self {
            positions: [first.min(second), first.max(second)],
            entered: BTreeMap::new(),
        })
    }

    pub fn positions(&self) -> [usize; 2] {
        self.positions
    }

    pub fn entered(&self, position: usize) -> Option<&str> {
        self.entered.get(&position).map(String::as_str)
    }

    /// Stores a keystroke for `position`, keeping at most one digit.
    /// Returns the stored value, or `None` if the position isn't challenged.
    pub fn enter(&mut self, position: usize, input: &str) -> Option<&str> {
        if !self.positions.contains(&position) {
            return None;
        }
        let digit: String = input.chars().filter(char::is_ascii_digit).take(1).collect();
        let slot = self.entered.entry(position).or_default();
        *slot = digit;
        Some(slot.as_str())
    }

    pub fn validate(&self, id: &str) -> bool {
        self.positions.iter().all(|&position| {
            let expected = id.chars().nth(position - 1);
            let typed = self.entered(position).and_then(|s| s.chars().next());
            matches!((expected, typed), (Some(e), Some(t)) if e == t)
        })
    }
}
