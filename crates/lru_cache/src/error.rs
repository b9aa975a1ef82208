#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheErrorKind {
    ZeroCapacity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheError {
    pub kind: CacheErrorKind,
    pub message: String,
}

impl CacheError {
    pub fn new(kind: CacheErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CacheError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidVersion,
    InvalidCapacity,
    EmptyKey,
    ConflictingExpectation,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidVersion => "InvalidVersion",
            ErrorCode::InvalidCapacity => "InvalidCapacity",
            ErrorCode::EmptyKey => "EmptyKey",
            ErrorCode::ConflictingExpectation => "ConflictingExpectation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub code: ErrorCode,
    pub message: String,
    pub path: Option<String>,
}

impl ScriptError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

pub type ValidationResult = Result<(), Vec<ScriptError>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayErrorKind {
    UnsupportedVersion,
    InvalidCapacity,
}

impl ReplayErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplayErrorKind::UnsupportedVersion => "UnsupportedVersion",
            ReplayErrorKind::InvalidCapacity => "InvalidCapacity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayError {
    pub kind: ReplayErrorKind,
    pub message: String,
    pub path: Option<String>,
}

impl ReplayError {
    pub fn new(kind: ReplayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "{} (path: {})", self.message, path)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<CacheError> for ReplayError {
    fn from(err: CacheError) -> Self {
        match err.kind {
            CacheErrorKind::ZeroCapacity => {
                ReplayError::new(ReplayErrorKind::InvalidCapacity, err.message)
            }
        }
    }
}

/// A step whose `expect` or `found` check did not hold. Replay keeps going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectationMismatch {
    pub step: usize,
    pub message: String,
    pub path: String,
}

impl ExpectationMismatch {
    pub fn new(step: usize, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            step,
            message: message.into(),
            path: path.into(),
        }
    }
}

impl std::fmt::Display for ExpectationMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (path: {})", self.message, self.path)
    }
}
