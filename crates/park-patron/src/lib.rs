//! `park-patron`: visitors and how they decide.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`profile`]  | `PatronProfile`: per-kind speed, patience, preferences      |
//! | [`tuning`]   | `BehaviorTuning`: every behavioural constant, with defaults |
//! | [`state`]    | `PatronState` lifecycle enum                                |
//! | [`patron`]   | `Patron`: per-tick `step` and the membership transitions    |
//! | [`movement`] | one movement step with obstacle deflection                  |
//! | [`decision`] | target selection, ride scoring, exit decision               |
//! | [`queueing`] | queue-join and abandonment policies                         |
//! | [`intent`]   | `PatronIntent`: what a patron asks the park to do           |
//! | [`context`]  | `PatronContext`: read-only view handed to `Patron::step`    |
//! | [`store`]    | `PatronStore` registry and `PatronRngs`                     |
//! | [`error`]    | `PatronError`, `PatronResult<T>`                            |
//!
//! # Intent / apply split
//!
//! [`Patron::step`] only mutates the patron itself.  Anything that touches a
//! ride (joining or leaving a queue) is returned as a [`PatronIntent`] and
//! applied by the caller to both sides at once.

pub mod context;
pub mod decision;
pub mod error;
pub mod intent;
pub mod movement;
pub mod patron;
pub mod profile;
pub mod queueing;
pub mod state;
pub mod store;
pub mod tuning;

#[cfg(test)]
mod tests;

pub use context::PatronContext;
pub use error::{PatronError, PatronResult};
pub use intent::PatronIntent;
pub use patron::Patron;
pub use profile::PatronProfile;
pub use state::PatronState;
pub use store::{PatronRngs, PatronStore};
pub use tuning::BehaviorTuning;
