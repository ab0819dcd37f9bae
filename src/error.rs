use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("decomposition level must not be negative, got {0}")]
    NegativeLevel(i32),

    #[error("length {len} is not an integer multiple of factor {factor}")]
    InvalidFactor { len: usize, factor: usize },

    #[error("vector lengths differ: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("{0} must not be empty")]
    EmptyInput(&'static str),

    #[error("sequence contains NaN at index {index}")]
    NanInSequence { index: usize },

    #[error("level {level} with section margin {margin} needs sections longer than usize::MAX")]
    LevelTooDeep { level: i32, margin: usize },

    #[error("section margin must be at least 1, got {0}")]
    InvalidSectionMargin(usize),

    #[error("line {line}: cannot parse '{value}'")]
    Parse { line: usize, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
