use thiserror::Error;

/// Errors surfaced by the painting core.
///
/// Capacity exhaustion and empty undo/redo/replay are deliberately not listed
/// here: the first is a silent drop, the rest are reported as "nothing
/// happened" signals on the respective calls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaintError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("unknown draw style: {0:?} (expected SET, ADD or SEQUENCE)")]
    UnknownDrawStyle(String),

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

pub type Result<T> = std::result::Result<T, PaintError>;
