//! Run controls: pause, speed, quit.

/// Interactive controls consulted by [`Park::frame`](crate::Park::frame)
/// and [`Park::run`](crate::Park::run).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Controls {
    pub paused:           bool,
    /// Ticks executed per frame.  Always at least 1.
    pub speed_multiplier: u32,
    pub quit:             bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self { paused: false, speed_multiplier: 1, quit: false }
    }
}
