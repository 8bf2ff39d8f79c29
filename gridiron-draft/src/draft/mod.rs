// Draft domain: players, snake pick attribution, and roster slots.

pub mod order;
pub mod pick;
pub mod roster;

pub use order::{attribute, DraftError, DraftOrder, PickAttribution};
pub use roster::{classify, RosterSlots};
