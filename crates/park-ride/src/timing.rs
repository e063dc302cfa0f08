//! Per-kind phase timing.

use park_core::RideKind;

/// How many ticks the loading and unloading phases last.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RideTiming {
    pub loading_ticks:   u32,
    pub unloading_ticks: u32,
}

impl RideTiming {
    pub const fn new(loading_ticks: u32, unloading_ticks: u32) -> Self {
        Self { loading_ticks, unloading_ticks }
    }

    /// Default timing for `kind`.
    pub const fn for_kind(kind: RideKind) -> Self {
        match kind {
            RideKind::PirateShip    => Self::new(4, 3),
            RideKind::FerrisWheel   => Self::new(6, 5),
            RideKind::RollerCoaster => Self::new(3, 2),
        }
    }

    /// Replace either value where an override is given.
    pub fn with_overrides(self, loading: Option<u32>, unloading: Option<u32>) -> Self {
        Self {
            loading_ticks:   loading.unwrap_or(self.loading_ticks),
            unloading_ticks: unloading.unwrap_or(self.unloading_ticks),
        }
    }
}
