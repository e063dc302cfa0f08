//! `park-terrain`: the static park map.
//!
//! # Crate layout
//!
//! | Module      | Contents                                          |
//! |-------------|---------------------------------------------------|
//! | [`terrain`] | `Terrain` grid, spawn/exit lists, spatial queries |
//! | [`error`]   | `TerrainError`, `TerrainResult<T>`                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                          |
//! |---------|-------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Terrain`. |

pub mod error;
pub mod terrain;

#[cfg(test)]
mod tests;

pub use error::{TerrainError, TerrainResult};
pub use terrain::{LINE_SAMPLES, Terrain};
