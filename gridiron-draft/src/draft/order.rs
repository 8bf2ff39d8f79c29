// Snake draft order and pick attribution.
//
// The backend is the system of record for picks; attribution here is
// recomputed from the board length to show who is on the clock and to fill
// in the pick submission. The backend's own numbering wins on conflict.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Who picks next, and where that pick sits in the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickAttribution {
    /// Round number (1-indexed).
    pub round: u32,
    /// Position within the round (0-indexed, in `[0, N-1]`).
    pub pick_in_round: usize,
    /// Drafter on the clock.
    pub drafter: String,
    /// Absolute pick number (1-indexed).
    pub pick_number: u32,
}

/// Attribute the pick following `picks_made` completed picks.
///
/// Odd rounds run the order forward, even rounds run it backward:
///
/// ```text
/// order [A, B, C]:  round 1 -> A B C,  round 2 -> C B A,  round 3 -> A B C
/// ```
pub fn attribute(picks_made: usize, draft_order: &[String]) -> Result<PickAttribution, DraftError> {
    let n = draft_order.len();
    if n == 0 {
        return Err(DraftError::InvalidInput(
            "draft order must contain at least one drafter".into(),
        ));
    }

    let round = picks_made / n + 1;
    let pick_in_round = picks_made % n;
    let seat = if round % 2 == 1 {
        pick_in_round
    } else {
        n - 1 - pick_in_round
    };

    Ok(PickAttribution {
        round: to_u32(round, "round")?,
        pick_in_round,
        drafter: draft_order[seat].clone(),
        pick_number: to_u32(picks_made.saturating_add(1), "pick number")?,
    })
}

fn to_u32(value: usize, what: &str) -> Result<u32, DraftError> {
    u32::try_from(value)
        .map_err(|_| DraftError::InvalidInput(format!("{what} {value} is out of range")))
}

/// A committed, non-empty draft order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftOrder {
    drafters: Vec<String>,
}

impl DraftOrder {
    /// Commit an ordered list of drafter names. Rejects an empty list.
    pub fn new(drafters: Vec<String>) -> Result<Self, DraftError> {
        if drafters.is_empty() {
            return Err(DraftError::InvalidInput(
                "draft order must contain at least one drafter".into(),
            ));
        }
        Ok(DraftOrder { drafters })
    }

    pub fn drafters(&self) -> &[String] {
        &self.drafters
    }

    /// Attribute the next pick.
    pub fn on_the_clock(&self, picks_made: usize) -> Result<PickAttribution, DraftError> {
        attribute(picks_made, &self.drafters)
    }
}

/// Move the entry at `from` to `to`, shifting everything in between.
///
/// This is the drag-and-drop reorder used on the setup screen. Returns
/// `false` (leaving `items` untouched) if either index is out of range.
pub fn move_entry<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}
