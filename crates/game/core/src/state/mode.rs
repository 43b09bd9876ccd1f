/// Top-level screen the session is in.
///
/// Map is the hub: Combat and Shop are entered from it and return to it, and
/// Exit ends the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum GameMode {
    #[default]
    Map,
    Combat,
    Shop,
    Exit,
}

impl GameMode {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Exit)
    }

    /// Whether the session may move from `self` to `to`. Staying put is
    /// always allowed except once the session has ended.
    pub const fn can_transition(self, to: GameMode) -> bool {
        use GameMode::*;
        matches!(
            (self, to),
            (Map, Map | Combat | Shop | Exit) | (Combat, Combat | Map) | (Shop, Shop | Map)
        )
    }
}
