//! Ride and patron kind tags shared by every crate.
//!
//! Kinds are plain tags.  Behaviour keyed on them lives in lookup tables in
//! the owning crate (`park-ride` timing, `park-patron` profiles), so adding a
//! kind means adding a variant here and a row in each table.

use std::str::FromStr;

use crate::ParkError;

/// The kind of attraction.  Drives preference scoring and phase timing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RideKind {
    /// Swinging pendulum ship.  Thrilling.
    PirateShip,
    /// Slow wheel with cabins.  Calm, family friendly.
    FerrisWheel,
    /// Track ride.  The most thrilling.
    RollerCoaster,
}

impl RideKind {
    pub const ALL: [RideKind; 3] = [
        RideKind::PirateShip,
        RideKind::FerrisWheel,
        RideKind::RollerCoaster,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RideKind::PirateShip    => "pirate",
            RideKind::FerrisWheel   => "ferris",
            RideKind::RollerCoaster => "coaster",
        }
    }
}

impl std::fmt::Display for RideKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RideKind {
    type Err = ParkError;

    /// Accepts any casing and the usual prefixes: `pir…`, `fer…`,
    /// `coa…`/`roller…`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s.starts_with("pir") {
            Ok(RideKind::PirateShip)
        } else if s.starts_with("fer") {
            Ok(RideKind::FerrisWheel)
        } else if s.starts_with("coa") || s.starts_with("roller") {
            Ok(RideKind::RollerCoaster)
        } else {
            Err(ParkError::Parse(format!("unknown ride kind {s:?}")))
        }
    }
}

/// Behavioural type of a patron.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PatronKind {
    /// Seeks thrills, waits a long time.
    Adventurous,
    /// Prefers calm rides, moderate patience, walks slowly.
    Family,
    /// Fast walker who abandons queues quickly.
    Impatient,
    /// Likes everything equally; patience varies per patron.
    Explorer,
}

impl PatronKind {
    pub const ALL: [PatronKind; 4] = [
        PatronKind::Adventurous,
        PatronKind::Family,
        PatronKind::Impatient,
        PatronKind::Explorer,
    ];

    /// Position in [`ALL`](Self::ALL); used for per-kind arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PatronKind::Adventurous => 0,
            PatronKind::Family      => 1,
            PatronKind::Impatient   => 2,
            PatronKind::Explorer    => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PatronKind::Adventurous => "adventurous",
            PatronKind::Family      => "family",
            PatronKind::Impatient   => "impatient",
            PatronKind::Explorer    => "explorer",
        }
    }
}

impl std::fmt::Display for PatronKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatronKind {
    type Err = ParkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        PatronKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ParkError::Parse(format!("unknown patron kind {s:?}")))
    }
}
