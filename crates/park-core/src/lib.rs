//! `park-core`: foundational types for the park simulation.
//!
//! This crate is a dependency of every other `park-*` crate.  It has no
//! `park-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                      |
//! |-----------|-----------------------------------------------|
//! | [`ids`]   | `PatronId`, `RideId`                          |
//! | [`geo`]   | `Point` (continuous), `BBox` (cell footprint) |
//! | [`time`]  | `Tick`                                        |
//! | [`kind`]  | `RideKind`, `PatronKind`                      |
//! | [`rng`]   | `PatronRng` (per-patron), `ParkRng` (setup)   |
//! | [`error`] | `ParkError`, `ParkResult`                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod geo;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ParkError, ParkResult};
pub use geo::{BBox, Point};
pub use ids::{PatronId, RideId};
pub use kind::{PatronKind, RideKind};
pub use rng::{ParkRng, PatronRng};
pub use time::Tick;
