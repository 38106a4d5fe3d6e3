/// Exit code for failures that are neither the user's input nor the model.
pub const EXIT_INTERNAL: u8 = 1;
/// Exit code for bad arguments or out-of-range inputs.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for a missing or unusable model artifact.
pub const EXIT_MODEL: u8 = 3;
/// Exit code for terminal setup/draw failures.
pub const EXIT_TERMINAL: u8 = 4;

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

impl From<crate::io::ModelError> for AppError {
    fn from(err: crate::io::ModelError) -> Self {
        AppError::new(EXIT_MODEL, format!("Cannot start without a model: {err}"))
    }
}

impl From<crate::domain::InputError> for AppError {
    fn from(err: crate::domain::InputError) -> Self {
        AppError::new(EXIT_USAGE, format!("Invalid input: {err}"))
    }
}
