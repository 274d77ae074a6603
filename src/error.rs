/// Exit code for bad arguments and unreadable or invalid input files.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for data that violates a configured policy (e.g. `--undated fail`).
pub const EXIT_POLICY: u8 = 3;
/// Exit code for outputs that could not be written.
pub const EXIT_OUTPUT: u8 = 4;

/// Error returned from the boundary layers (ingest, trend assembly, export).
///
/// The date parser and the smoothing engine never produce one; absent data is
/// represented as `None` there.
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

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn policy(message: impl Into<String>) -> Self {
        Self::new(EXIT_POLICY, message)
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::new(EXIT_OUTPUT, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_pick_exit_codes() {
        assert_eq!(AppError::input("x").exit_code(), EXIT_INPUT);
        assert_eq!(AppError::policy("x").exit_code(), EXIT_POLICY);
        assert_eq!(AppError::output("x").exit_code(), EXIT_OUTPUT);
        assert_eq!(AppError::output("disk full").to_string(), "disk full");
    }
}
