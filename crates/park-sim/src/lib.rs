//! `park-sim`: tick orchestrator for the park simulation.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Rides   : Ride::step in list order; every RideEvent applied at once:
//!                  Boarded       → patron.board
//!                  Ejected       → patron.finish_ride
//!                  StateChanged  → observer.on_ride_transition
//!   ② Patrons : Patron::step in ascending PatronId order; every intent
//!                applied at once to patron and ride:
//!                  JoinQueue(r)     → ride.enqueue + patron.enter_queue
//!                  AbandonQueue(r)  → ride.remove_from_queue + patron.abandon_queue
//!   ③ Counters: aggregated, pushed onto history, observer notified.
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`config`]   | `ParkConfig`, `TerrainSpec`, `RideSpec`, `PatronMix`          |
//! | [`builder`]  | `ParkBuilder`: validation and construction                    |
//! | [`sim`]      | `Park`: the tick loop, controls, explicit operations          |
//! | [`control`]  | `Controls`: pause, speed multiplier, quit                     |
//! | [`observer`] | `ParkObserver`, `NoopObserver`                                |
//! | [`snapshot`] | `TickCounters`, `ParkSnapshot`, per-patron/per-ride snapshots |
//! | [`report`]   | `ParkReport`: end-of-run visitor report                       |
//! | [`error`]    | `SimError`, `SimResult<T>`                                    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use park_sim::{NoopObserver, ParkBuilder, ParkConfig};
//!
//! let mut park = ParkBuilder::new(ParkConfig::default_park()).seed(42).build()?;
//! park.run(&mut NoopObserver)?;
//! println!("{}", park.report());
//! ```

pub mod builder;
pub mod config;
pub mod control;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;
pub mod snapshot;


pub use builder::ParkBuilder;
pub use config::{DEFAULT_SEED, ParkConfig, PatronMix, RideSpec, TerrainLayout, TerrainSpec};
pub use control::Controls;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, ParkObserver};
pub use report::{KindStats, ParkReport, RideStats};
pub use sim::Park;
pub use snapshot::{ParkSnapshot, PatronSnapshot, RideSnapshot, TickCounters};
