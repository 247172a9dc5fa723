use fleetpol_core_types::ResourceId;
use thiserror::Error;

/// Result type alias using PolicyError
pub type Result<T> = std::result::Result<T, PolicyError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and responses surfaced by collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Interchange
    /// Input is neither an object of strings nor an array of strings
    MalformedInterchangeValue,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MalformedInterchangeValue => "ERR_MALFORMED_INTERCHANGE_VALUE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional context
/// describing where the failure happened.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    resource_id: Option<ResourceId>,
    policy: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            resource_id: None,
            policy: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add resource context
    pub fn with_resource_id(mut self, id: ResourceId) -> Self {
        self.resource_id = Some(id);
        self
    }

    /// Add policy token context
    pub fn with_policy(mut self, policy: impl Into<String>) -> Self {
        self.policy = Some(policy.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn resource_id(&self) -> Option<&ResourceId> {
        self.resource_id.as_ref()
    }

    pub fn policy(&self) -> Option<&str> {
        self.policy.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
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
        if let Some(resource_id) = &self.resource_id {
            write!(f, " (resource_id: {})", resource_id)?;
        }
        if let Some(policy) = &self.policy {
            write!(f, " (policy: {})", policy)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for policy operations
///
/// Decoding is the only fallible path in the kernel; every query and
/// derivation is total.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolicyError {
    /// Interchange value matched neither the object nor the legacy array shape
    #[error("Malformed policy set: {message}")]
    MalformedInterchangeValue { message: String },

    /// Serialization error (JSON encoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<PolicyError> for ExError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::MalformedInterchangeValue { message } => {
                ExError::new(ExErrorKind::MalformedInterchangeValue)
                    .with_op("decode_set")
                    .with_message(format!("Malformed policy set: {}", message))
            }
            PolicyError::Serialization { message } => ExError::new(ExErrorKind::Serialization)
                .with_op("encode_set")
                .with_message(format!("Serialization error: {}", message)),
        }
    }
}
