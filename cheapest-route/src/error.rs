use std::fmt;
use std::io;

use route_field::FieldError;
use route_search::SearchError;

/// Everything that can stop a `cheapest_route` run.
#[derive(Debug)]
pub enum AppError {
    /// Malformed, duplicate, unknown or missing command-line keys.
    Cmdline(String),
    /// A recognized key with a value this program cannot handle.
    UnsupportedInput { what: &'static str, value: String },
    Field(FieldError),
    Search(SearchError),
    Io(io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Cmdline(msg) => write!(f, "{msg}"),
            AppError::UnsupportedInput { what, value } => {
                write!(f, "unsupported {what} `{value}`")
            }
            AppError::Field(e) => write!(f, "{e}"),
            AppError::Search(e) => write!(f, "{e}"),
            AppError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Field(e) => Some(e),
            AppError::Search(e) => Some(e),
            AppError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FieldError> for AppError {
    fn from(e: FieldError) -> Self {
        AppError::Field(e)
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        AppError::Search(e)
    }
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        AppError::Io(e)
    }
}
