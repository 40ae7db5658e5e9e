//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and selection providers so
//! clients can bubble them up with consistent context. A turn refused by the
//! sequencer is not an error; see [`TurnDisposition`].
use combat_core::{ErrorSeverity, GameError, TurnError};
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("sequencer worker command channel closed")]
    CommandChannelClosed,

    #[error("sequencer worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("sequencer worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("selection provider not set")]
    SelectionProviderNotSet,

    #[error("selection provider failed: {message}")]
    Provider { message: String },

    #[error("selection provider returned no elements")]
    EmptySelection,

    #[error("scripted selection has no rounds left")]
    SelectionExhausted,

    #[error("turn rejected: {0}")]
    TurnRejected(#[source] TurnError),
}

impl RuntimeError {
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CommandChannelClosed | Self::ReplyChannelClosed(_) | Self::WorkerJoin(_) => {
                ErrorSeverity::Fatal
            }
            Self::SelectionProviderNotSet => ErrorSeverity::Internal,
            Self::Provider { .. } | Self::EmptySelection | Self::SelectionExhausted => {
                ErrorSeverity::Recoverable
            }
            Self::TurnRejected(reason) => reason.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CommandChannelClosed => "COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "WORKER_JOIN",
            Self::SelectionProviderNotSet => "SELECTION_PROVIDER_NOT_SET",
            Self::Provider { .. } => "PROVIDER_FAILED",
            Self::EmptySelection => "EMPTY_SELECTION",
            Self::SelectionExhausted => "SELECTION_EXHAUSTED",
            Self::TurnRejected(reason) => reason.error_code(),
        }
    }
}

/// How the sequencer answered a `ProcessTurn`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnDisposition {
    /// The round started and is now resolving in the background.
    Accepted { round: u32, doublecast: bool },
    /// Ignored: a round is already resolving or the match is over.
    Rejected { reason: TurnError },
}

impl TurnDisposition {
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}
