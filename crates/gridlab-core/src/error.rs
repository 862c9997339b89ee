/// Coarse classification of an [`Error`], stable for matching in hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidGeometry,
    OutOfBounds,
    NoActiveSelection,
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidGeometry   => "invalid-geometry",
            Self::OutOfBounds       => "out-of-bounds",
            Self::NoActiveSelection => "no-active-selection",
            Self::Config            => "config",
        }
    }
}

/// Every failure in the core is recoverable: the operation is skipped, state is
/// left as it was, and the caller gets this value plus a readable message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("cell ({col}, {row}) is outside the grid")]
    OutOfBounds { col: i32, row: i32 },

    #[error("no active selection: {0}")]
    NoActiveSelection(String),

    #[error("bad settings: {0}")]
    Config(String),
}

impl Error {
    pub fn geometry(message: impl Into<String>) -> Self { Self::InvalidGeometry(message.into()) }

    pub fn selection(message: impl Into<String>) -> Self { Self::NoActiveSelection(message.into()) }

    pub fn config(message: impl Into<String>) -> Self { Self::Config(message.into()) }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidGeometry(_)   => ErrorKind::InvalidGeometry,
            Self::OutOfBounds { .. }   => ErrorKind::OutOfBounds,
            Self::NoActiveSelection(_) => ErrorKind::NoActiveSelection,
            Self::Config(_)            => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
