//! Options for the lopdf text source.

/// Options for extracting positioned text.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    /// Error handling mode for individual pages
    pub error_mode: ErrorMode,
}

impl SourceOptions {
    /// Create new source options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip pages whose content cannot be decoded).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the document on any page error
    #[default]
    Strict,
    /// Skip unreadable pages and continue
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_options_builder() {
        assert_eq!(SourceOptions::new().error_mode, ErrorMode::Strict);
        assert_eq!(SourceOptions::new().lenient().error_mode, ErrorMode::Lenient);
        assert_eq!(
            SourceOptions::new()
                .with_error_mode(ErrorMode::Lenient)
                .error_mode,
            ErrorMode::Lenient
        );
    }
}
