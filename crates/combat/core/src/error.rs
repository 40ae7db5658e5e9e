//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (`ResolveError`, `TurnError`) are defined next to
//! the operations that produce them. None of them is fatal to a match: the
//! runtime logs them and degrades the offending step to a no-op.

use crate::state::{MatchResult, Phase};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the step is skipped and the round continues
/// - **Validation**: the request is rejected without touching state
/// - **Internal**: unexpected state inconsistency, should be investigated
/// - **Fatal**: the match cannot continue (worker gone)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Slot consumed as a no-op; the round proceeds.
    ///
    /// Examples: unrecognized element, slot position past the third
    Recoverable,

    /// Request ignored; nothing changed.
    ///
    /// Examples: turn submitted while a round is resolving, turn after game over
    Validation,

    /// Sequencer driven out of order by its caller.
    Internal,

    /// The owner of the match state is gone; no further turns can run.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }

    /// Returns true if the match cannot continue.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Used as a structured log field and in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Failure to resolve a single slot. The slot is still consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolveError {
    #[error("slot {slot}: unrecognized element, nothing happens")]
    UnrecognizedElement { slot: u8 },

    #[error("slot {slot} is outside the three-slot reel")]
    SlotOutOfRange { slot: u8 },
}

impl GameError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnrecognizedElement { .. } => "UNRECOGNIZED_ELEMENT",
            Self::SlotOutOfRange { .. } => "SLOT_OUT_OF_RANGE",
        }
    }
}

/// Rejection of a turn-level request by the sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("match already finished: {result:?}")]
    MatchOver { result: MatchResult },

    #[error("round in progress (phase {phase:?})")]
    Busy { phase: Phase },

    #[error("no round in progress")]
    NoActiveRound,
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MatchOver { .. } | Self::Busy { .. } => ErrorSeverity::Validation,
            Self::NoActiveRound => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MatchOver { .. } => "MATCH_OVER",
            Self::Busy { .. } => "ROUND_IN_PROGRESS",
            Self::NoActiveRound => "NO_ACTIVE_ROUND",
        }
    }
}
