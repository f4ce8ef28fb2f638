use thiserror::Error;

/// Result type alias using NotebookError
pub type Result<T> = std::result::Result<T, NotebookError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Interpreter resolution itself never fails; these kinds classify the
/// failures that can happen at the edges (configuration files, CLI output).
/// Each kind maps to a stable error code usable by scripts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus the
/// operation, the interpreter key or config path involved, and a message.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context (an interpreter key or a config path)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for notebook configuration and presentation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotebookError {
    /// Configuration file could not be read
    #[error("Failed to read config {path}: {message}")]
    ConfigRead { path: String, message: String },

    /// Configuration content is not valid TOML for the settings schema
    #[error("Failed to parse config: {message}")]
    ConfigParse { message: String },

    /// Configuration could not be written back to its backing store
    #[error("Failed to write config {path}: {message}")]
    ConfigWrite { path: String, message: String },

    /// No resolved interpreter has the requested key
    #[error("Interpreter not found: {key}")]
    InterpreterNotFound { key: String },

    /// Serialization error (JSON/TOML encoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from NotebookError to the canonical ExError
impl From<NotebookError> for ExError {
    fn from(err: NotebookError) -> Self {
        match err {
            NotebookError::ConfigRead { path, message } => ExError::new(ExErrorKind::Io)
                .with_op("load_config")
                .with_entity_id(path)
                .with_message(message),

            NotebookError::ConfigParse { message } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("load_config")
                .with_message(message),

            NotebookError::ConfigWrite { path, message } => {
                ExError::new(ExErrorKind::Persistence)
                    .with_op("store_config")
                    .with_entity_id(path)
                    .with_message(message)
            }

            NotebookError::InterpreterNotFound { key } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(key)
                .with_message("Interpreter not found"),

            NotebookError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            NotebookError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to NotebookError
impl From<serde_json::Error> for NotebookError {
    fn from(err: serde_json::Error) -> Self {
        NotebookError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Conversion from toml::de::Error to NotebookError
impl From<toml::de::Error> for NotebookError {
    fn from(err: toml::de::Error) -> Self {
        NotebookError::ConfigParse {
            message: err.to_string(),
        }
    }
}

/// Conversion from toml::ser::Error to NotebookError
impl From<toml::ser::Error> for NotebookError {
    fn from(err: toml::ser::Error) -> Self {
        NotebookError::Serialization {
            message: err.to_string(),
        }
    }
}
