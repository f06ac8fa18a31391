use crate::domain::REQUIRED_COLUMNS;

/// Exit code for bad input: unreadable file, missing columns, bad flags.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for failures while writing the report artifacts.
pub const EXIT_OUTPUT: u8 = 3;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// The input table lacks one or more required columns.
///
/// Raised before any row is looked at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    pub missing: Vec<String>,
}

impl SchemaError {
    pub fn required(&self) -> &'static [&'static str] {
        &REQUIRED_COLUMNS
    }
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Input is missing required columns: {}. Required columns: {}",
            self.missing.join(", "),
            REQUIRED_COLUMNS.join(", ")
        )
    }
}

impl std::error::Error for SchemaError {}

impl From<SchemaError> for AppError {
    fn from(err: SchemaError) -> Self {
        AppError::new(EXIT_INPUT, err.to_string())
    }
}
