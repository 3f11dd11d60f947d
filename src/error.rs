use std::fmt;
use std::panic::Location;

use thiserror::Error;

/// Coarse failure categories, one per codec layer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    #[error("out of bounds")]
    OutOfBounds,
    #[error("failed to read qname")]
    FailedToReadQName,
    #[error("failed to read label")]
    FailedToReadLabel,
    #[error("failed to parse header")]
    FailedToParseHeader,
    #[error("failed to write header")]
    FailedToWriteHeader,
    #[error("failed to parse question")]
    FailedToParseQuestion,
    #[error("failed to write question")]
    FailedToWriteQuestion,
    #[error("failed to parse record")]
    FailedToParseRecord,
    #[error("failed to write record")]
    FailedToWriteRecord,
}

/// One entry in an error trace: a code, a message and the call site that
/// raised it.
#[derive(Debug, Clone)]
pub struct ErrorUnit {
    code: ErrorCode,
    message: String,
    location: &'static Location<'static>,
}

impl ErrorUnit {
    #[track_caller]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            location: Location::caller(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

/// An ordered failure trace, innermost cause first. Each layer that fails
/// appends one unit describing what it was attempting; units are never
/// removed individually.
#[derive(Debug, Clone, Default)]
pub struct ErrorChain {
    units: Vec<ErrorUnit>,
}

impl ErrorChain {
    #[track_caller]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            units: vec![ErrorUnit::new(code, message)],
        }
    }

    #[track_caller]
    pub fn push(&mut self, code: ErrorCode, message: impl Into<String>) {
        self.units.push(ErrorUnit::new(code, message));
    }

    pub fn first(&self) -> Option<&ErrorUnit> {
        self.units.first()
    }

    pub fn last(&self) -> Option<&ErrorUnit> {
        self.units.last()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn clear(&mut self) {
        self.units.clear();
    }
}

impl fmt::Display for ErrorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, unit) in self.units.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(
                f,
                "({:03}) [{}] {}:{}",
                index + 1,
                unit.code(),
                unit.location().file(),
                unit.location().line()
            )?;
            write!(f, "      \"{}\"", unit.message())?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorChain {}

pub type Result<T> = std::result::Result<T, ErrorChain>;

/// Appends context to the error side of a `Result` while keeping the root
/// cause at the front of the chain.
pub trait Annotate<T> {
    #[track_caller]
    fn annotate(self, code: ErrorCode, message: impl Into<String>) -> Result<T>;
}

impl<T> Annotate<T> for Result<T> {
    #[track_caller]
    fn annotate(self, code: ErrorCode, message: impl Into<String>) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(mut chain) => {
                chain.push(code, message);
                Err(chain)
            }
        }
    }
}
