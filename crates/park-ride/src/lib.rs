//! `park-ride`: attractions and their cycle state machine.
//!
//! # Crate layout
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`timing`] | `RideTiming`: loading/unloading ticks per `RideKind`   |
//! | [`state`]  | `RideState`: `Idle`, `Loading`, `Running`, `Unloading` |
//! | [`event`]  | `RideEvent`: boardings, ejections, state changes       |
//! | [`ride`]   | `Ride`: queue, riders and the per-tick `step`          |
//! | [`error`]  | `RideError`, `RideResult<T>`                           |
//!
//! A ride never touches patrons directly.  [`Ride::step`] returns the
//! [`RideEvent`]s it produced and the caller applies them to the patron
//! registry.

pub mod error;
pub mod event;
pub mod ride;
pub mod state;
pub mod timing;


pub use error::{RideError, RideResult};
pub use event::RideEvent;
pub use ride::Ride;
pub use state::RideState;
pub use timing::RideTiming;
