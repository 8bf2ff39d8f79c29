// Roster slot classification.
//
// A drafter's roster comes back from the backend as a flat list. It is laid
// out into nine starting slots plus a bench in a single greedy pass, in
// arrival order, with no reshuffling of earlier placements.

use serde::{Deserialize, Serialize};

use super::pick::{Player, Position};

/// Number of fixed starting slots.
pub const SLOT_COUNT: usize = 9;

/// Labels of the fixed starting slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotLabel {
    Qb,
    Rb1,
    Rb2,
    Wr1,
    Wr2,
    Te,
    Flex,
    K,
    Def,
}

impl SlotLabel {
    /// All starting slots in display order.
    pub const ALL: [SlotLabel; SLOT_COUNT] = [
        SlotLabel::Qb,
        SlotLabel::Rb1,
        SlotLabel::Rb2,
        SlotLabel::Wr1,
        SlotLabel::Wr2,
        SlotLabel::Te,
        SlotLabel::Flex,
        SlotLabel::K,
        SlotLabel::Def,
    ];

    pub fn display_str(&self) -> &'static str {
        match self {
            SlotLabel::Qb => "QB",
            SlotLabel::Rb1 => "RB1",
            SlotLabel::Rb2 => "RB2",
            SlotLabel::Wr1 => "WR1",
            SlotLabel::Wr2 => "WR2",
            SlotLabel::Te => "TE",
            SlotLabel::Flex => "FLEX",
            SlotLabel::K => "K",
            SlotLabel::Def => "DEF",
        }
    }

    fn index(&self) -> usize {
        match self {
            SlotLabel::Qb => 0,
            SlotLabel::Rb1 => 1,
            SlotLabel::Rb2 => 2,
            SlotLabel::Wr1 => 3,
            SlotLabel::Wr2 => 4,
            SlotLabel::Te => 5,
            SlotLabel::Flex => 6,
            SlotLabel::K => 7,
            SlotLabel::Def => 8,
        }
    }
}

/// Slots a player at `pos` may fill, in the order they are tried.
///
/// Dedicated slots come first; FLEX is only reached once every dedicated
/// slot for the position is taken.
pub fn eligible_slots(pos: Position) -> &'static [SlotLabel] {
    match pos {
        Position::Quarterback => &[SlotLabel::Qb],
        Position::RunningBack => &[SlotLabel::Rb1, SlotLabel::Rb2, SlotLabel::Flex],
        Position::WideReceiver => &[SlotLabel::Wr1, SlotLabel::Wr2, SlotLabel::Flex],
        Position::TightEnd => &[SlotLabel::Te, SlotLabel::Flex],
        Position::Kicker => &[SlotLabel::K],
        Position::Defense => &[SlotLabel::Def],
    }
}

/// A single starting slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSlot {
    pub label: SlotLabel,
    pub player: Option<Player>,
}

/// A roster laid out into starting slots and bench.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSlots {
    /// Starting slots, always in `SlotLabel::ALL` order.
    pub slots: [RosterSlot; SLOT_COUNT],
    /// Overflow players in arrival order.
    pub bench: Vec<Player>,
}

impl Default for RosterSlots {
    fn default() -> Self {
        RosterSlots {
            slots: SlotLabel::ALL.map(|label| RosterSlot {
                label,
                player: None,
            }),
            bench: Vec::new(),
        }
    }
}

impl RosterSlots {
    /// The player in the given slot, if any.
    pub fn get(&self, label: SlotLabel) -> Option<&Player> {
        self.slots[label.index()].player.as_ref()
    }

    /// Number of filled starting slots.
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.player.is_some()).count()
    }

    /// Number of players across starters and bench.
    pub fn player_count(&self) -> usize {
        self.filled_count() + self.bench.len()
    }

    /// Sum of projected points over the filled starting slots.
    pub fn starter_points(&self) -> f64 {
        self.slots
            .iter()
            .filter_map(|s| s.player.as_ref())
            .map(|p| p.projected_points)
            .sum()
    }

    fn try_place(&mut self, player: &Player) -> bool {
        let Some(pos) = player.position() else {
            return false;
        };
        for &label in eligible_slots(pos) {
            let slot = &mut self.slots[label.index()];
            if slot.player.is_none() {
                slot.player = Some(player.clone());
                return true;
            }
        }
        false
    }
}

/// Lay out a roster into starting slots and bench.
///
/// Players are placed in input order; each takes the first empty slot from
/// `eligible_slots` for its position. Players whose slots are all taken, or
/// whose position is not recognized, go to the bench. Never fails and never
/// drops a player.
pub fn classify(roster: &[Player]) -> RosterSlots {
    let mut slots = RosterSlots::default();
    for player in roster {
        if !slots.try_place(player) {
            slots.bench.push(player.clone());
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::pick::PlayerId;

    fn player(id: i64, name: &str, position: &str) -> Player {
        Player {
            id: PlayerId::Number(id),
            name: name.to_string(),
            position: position.to_string(),
            team: "TST".to_string(),
            projected_points: 100.0 + id as f64,
        }
    }

    fn name_in(slots: &RosterSlots, label: SlotLabel) -> Option<&str> {
        slots.get(label).map(|p| p.name.as_str())
    }

    #[test]
    fn empty_roster_is_all_empty() {
        let slots = classify(&[]);
        assert_eq!(slots.filled_count(), 0);
        assert!(slots.bench.is_empty());
        for label in SlotLabel::ALL {
            assert!(slots.get(label).is_none());
        }
    }

    #[test]
    fn slots_keep_display_order() {
        let slots = classify(&[]);
        let labels: Vec<&str> = slots.slots.iter().map(|s| s.label.display_str()).collect();
        assert_eq!(
            labels,
            vec!["QB", "RB1", "RB2", "WR1", "WR2", "TE", "FLEX", "K", "DEF"]
        );
    }

    #[test]
    fn third_running_back_takes_flex() {
        let roster = vec![
            player(1, "RB A", "RB"),
            player(2, "RB B", "RB"),
            player(3, "RB C", "RB"),
        ];
        let slots = classify(&roster);
        assert_eq!(name_in(&slots, SlotLabel::Rb1), Some("RB A"));
        assert_eq!(name_in(&slots, SlotLabel::Rb2), Some("RB B"));
        assert_eq!(name_in(&slots, SlotLabel::Flex), Some("RB C"));
        assert!(slots.bench.is_empty());
    }

    #[test]
    fn flex_is_first_come_first_served() {
        let roster = vec![
            player(1, "WR A", "WR"),
            player(2, "WR B", "WR"),
            player(3, "WR C", "WR"),
            player(4, "RB A", "RB"),
            player(5, "RB B", "RB"),
            player(6, "RB C", "RB"),
        ];
        let slots = classify(&roster);
        assert_eq!(name_in(&slots, SlotLabel::Flex), Some("WR C"));
        assert_eq!(name_in(&slots, SlotLabel::Rb1), Some("RB A"));
        assert_eq!(name_in(&slots, SlotLabel::Rb2), Some("RB B"));
        let bench: Vec<&str> = slots.bench.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(bench, vec!["RB C"]);
    }

    #[test]
    fn second_tight_end_takes_flex() {
        let roster = vec![player(1, "TE A", "TE"), player(2, "TE B", "TE")];
        let slots = classify(&roster);
        assert_eq!(name_in(&slots, SlotLabel::Te), Some("TE A"));
        assert_eq!(name_in(&slots, SlotLabel::Flex), Some("TE B"));
    }

    #[test]
    fn non_flex_positions_overflow_to_bench() {
        let roster = vec![
            player(1, "QB A", "QB"),
            player(2, "QB B", "QB"),
            player(3, "K A", "K"),
            player(4, "K B", "K"),
            player(5, "DEF A", "DEF"),
            player(6, "DEF B", "D/ST"),
        ];
        let slots = classify(&roster);
        assert_eq!(name_in(&slots, SlotLabel::Qb), Some("QB A"));
        assert_eq!(name_in(&slots, SlotLabel::K), Some("K A"));
        assert_eq!(name_in(&slots, SlotLabel::Def), Some("DEF A"));
        assert!(slots.get(SlotLabel::Flex).is_none());
        let bench: Vec<&str> = slots.bench.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(bench, vec!["QB B", "K B", "DEF B"]);
    }

    #[test]
    fn dst_fills_defense_slot() {
        let slots = classify(&[player(1, "49ers", "D/ST")]);
        assert_eq!(name_in(&slots, SlotLabel::Def), Some("49ers"));
    }

    #[test]
    fn unknown_positions_go_to_bench() {
        let roster = vec![player(1, "Punter", "P"), player(2, "Nobody", "")];
        let slots = classify(&roster);
        assert_eq!(slots.filled_count(), 0);
        assert_eq!(slots.bench.len(), 2);
    }

    #[test]
    fn position_strings_must_match_exactly() {
        let roster = vec![player(1, "Lower", "rb"), player(2, "Padded", " WR")];
        let slots = classify(&roster);
        assert_eq!(slots.filled_count(), 0);
        let bench: Vec<&str> = slots.bench.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(bench, vec!["Lower", "Padded"]);
    }

    #[test]
    fn full_lineup_then_bench() {
        let roster = vec![
            player(1, "QB1", "QB"),
            player(2, "RB1", "RB"),
            player(3, "WR1", "WR"),
            player(4, "RB2", "RB"),
            player(5, "WR2", "WR"),
            player(6, "TE1", "TE"),
            player(7, "WR3", "WR"),
            player(8, "K1", "K"),
            player(9, "DEF1", "DEF"),
            player(10, "RB3", "RB"),
            player(11, "QB2", "QB"),
        ];
        let slots = classify(&roster);
        assert_eq!(slots.filled_count(), SLOT_COUNT);
        assert_eq!(name_in(&slots, SlotLabel::Flex), Some("WR3"));
        let bench: Vec<&str> = slots.bench.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(bench, vec!["RB3", "QB2"]);
    }

    #[test]
    fn never_loses_a_player() {
        let positions = ["QB", "RB", "WR", "TE", "K", "DEF", "D/ST", "XX"];
        for len in 0..30 {
            let roster: Vec<Player> = (0..len)
                .map(|i| player(i as i64, &format!("P{i}"), positions[(i * 7 + len) % positions.len()]))
                .collect();
            let slots = classify(&roster);
            assert_eq!(slots.player_count(), roster.len(), "len={len}");
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let roster = vec![
            player(1, "A", "RB"),
            player(2, "B", "WR"),
            player(3, "C", "TE"),
            player(4, "D", "RB"),
        ];
        assert_eq!(classify(&roster), classify(&roster));
    }

    #[test]
    fn starter_points_sums_filled_slots_only() {
        let roster = vec![
            player(1, "QB A", "QB"),
            player(2, "QB B", "QB"),
        ];
        let slots = classify(&roster);
        assert!((slots.starter_points() - 101.0).abs() < f64::EPSILON);
    }
}
