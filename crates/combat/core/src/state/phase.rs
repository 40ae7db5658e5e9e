/// Where the sequencer currently is within a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Waiting for the next set of slot actions.
    #[default]
    Idle,
    PlayerResolving,
    EnemyResolving,
    /// Round finished; the selection collaborator is being re-armed.
    RoundComplete,
    /// Terminal.
    GameOver,
}

impl Phase {
    pub const fn is_resolving(&self) -> bool {
        matches!(self, Self::PlayerResolving | Self::EnemyResolving)
    }
}

/// Outcome of the match so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchResult {
    #[default]
    Ongoing,
    PlayerVictory,
    PlayerDefeat,
    Draw,
}

impl MatchResult {
    /// Derives the result from both combatants' knockout state.
    ///
    /// A double knockout is a draw, never a win or a loss.
    pub const fn from_knockouts(player_down: bool, enemy_down: bool) -> Self {
        match (player_down, enemy_down) {
            (true, true) => Self::Draw,
            (true, false) => Self::PlayerDefeat,
            (false, true) => Self::PlayerVictory,
            (false, false) => Self::Ongoing,
        }
    }

    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}
