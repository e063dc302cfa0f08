//! Ride lifecycle state.

/// Where a ride is in its cycle.
///
/// ```text
/// Idle ──(queue non-empty)──▶ Loading ──(riders > 0)──▶ Running
///  ▲                            │                          │
///  └──────(nobody boarded)──────┘                          ▼
///  └────────────────────────────────────────────────── Unloading
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RideState {
    #[default]
    Idle,
    Loading,
    Running,
    Unloading,
}

impl RideState {
    pub fn as_str(self) -> &'static str {
        match self {
            RideState::Idle      => "idle",
            RideState::Loading   => "loading",
            RideState::Running   => "running",
            RideState::Unloading => "unloading",
        }
    }
}

impl std::fmt::Display for RideState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
