use thiserror::Error;

/// Result type alias using GiftError
pub type Result<T> = std::result::Result<T, GiftError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on in tests,
/// CLI output and logs without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    MissingField,
    InvalidName,
    InvalidEmail,
    NotFound,
    AlreadyExists,
    ConstraintViolation,

    // Identity and relations
    TransientReference,
    IdentityReassigned,

    // Integration/IO
    Io,
    Config,
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
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::InvalidName => "ERR_INVALID_NAME",
            ExErrorKind::InvalidEmail => "ERR_INVALID_EMAIL",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::TransientReference => "ERR_TRANSIENT_REFERENCE",
            ExErrorKind::IdentityReassigned => "ERR_IDENTITY_REASSIGNED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, entity type, entity id) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<String>,
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
            entity: None,
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

    /// Add entity type context (e.g. "product")
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
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

    /// Get the entity type context, if any
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Get the entity ID context, if any
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
        match (&self.entity, &self.entity_id) {
            (Some(entity), Some(id)) => write!(f, " ({} {})", entity, id)?,
            (Some(entity), None) => write!(f, " ({})", entity)?,
            (None, Some(id)) => write!(f, " (entity_id: {})", id)?,
            (None, None) => {}
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised while building or linking entities
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GiftError {
    /// A builder was finished without a required field
    #[error("{entity} is missing required field '{field}'")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// Product name is empty or whitespace-only
    #[error("Invalid name: {reason}")]
    InvalidName { reason: String },

    /// Member email is blank or has no '@'
    #[error("Invalid email: {email}")]
    InvalidEmail { email: String },

    /// A relation points at an entity that has not been persisted yet
    #[error("{entity} must be persisted before it can be referenced")]
    TransientReference { entity: &'static str },

    /// An attempt to change an identity that is already assigned
    #[error("{entity} identity {current} cannot be reassigned to {attempted}")]
    IdentityReassigned {
        entity: &'static str,
        current: i64,
        attempted: i64,
    },
}

impl From<GiftError> for ExError {
    fn from(err: GiftError) -> Self {
        let message = err.to_string();
        match err {
            GiftError::MissingField { entity, .. } => ExError::new(ExErrorKind::MissingField)
                .with_entity(entity)
                .with_op("build")
                .with_message(message),

            GiftError::InvalidName { .. } => ExError::new(ExErrorKind::InvalidName)
                .with_entity("product")
                .with_message(message),

            GiftError::InvalidEmail { .. } => ExError::new(ExErrorKind::InvalidEmail)
                .with_entity("member")
                .with_message(message),

            GiftError::TransientReference { entity } => {
                ExError::new(ExErrorKind::TransientReference)
                    .with_entity(entity)
                    .with_message(message)
            }

            GiftError::IdentityReassigned {
                entity, current, ..
            } => ExError::new(ExErrorKind::IdentityReassigned)
                .with_entity(entity)
                .with_entity_id(current)
                .with_message(message),
        }
    }
}
