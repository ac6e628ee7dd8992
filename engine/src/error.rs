use thiserror::Error;

/// Failures raised by the combat core.
#[derive(Debug, Error, PartialEq)]
pub enum CombatError {
    /// A turn was requested with a combatant that is already down.
    #[error("{name} is already defeated and cannot take part in a turn")]
    DefeatedCombatant { name: String },
    #[error("defender stats are missing")]
    MissingStats,
    #[error("{side} team has no characters")]
    EmptyTeam { side: &'static str },
    #[error("invalid character '{character}': {reason}")]
    InvalidInput { character: String, reason: String },
    #[error("invalid match config: {reason}")]
    InvalidConfig { reason: String },
    /// Neither team could finish the other within the turn cap.
    #[error("round did not finish within {limit} turns")]
    TurnLimitExceeded { limit: u32 },
}

pub type CombatResult<T> = Result<T, CombatError>;
