//! Patron lifecycle state.

/// ```text
/// Spawning ─▶ Roaming ⇄ Queueing ─▶ Riding ─▶ Roaming ─▶ … ─▶ Leaving ─▶ Left
/// ```
///
/// `Left` is terminal.  The patron stays in the registry but is never
/// stepped again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PatronState {
    #[default]
    Spawning,
    Roaming,
    Queueing,
    Riding,
    Leaving,
    Left,
}

impl PatronState {
    pub const ALL: [PatronState; 6] = [
        PatronState::Spawning,
        PatronState::Roaming,
        PatronState::Queueing,
        PatronState::Riding,
        PatronState::Leaving,
        PatronState::Left,
    ];

    /// `true` for every state except `Left`.
    #[inline]
    pub fn is_active(self) -> bool {
        self != PatronState::Left
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PatronState::Spawning => "spawning",
            PatronState::Roaming  => "roaming",
            PatronState::Queueing => "queueing",
            PatronState::Riding   => "riding",
            PatronState::Leaving  => "leaving",
            PatronState::Left     => "left",
        }
    }
}

impl std::fmt::Display for PatronState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
