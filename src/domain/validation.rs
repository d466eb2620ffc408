use std::fmt;

/// Category of a [`FieldError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required value is absent or blank.
    MissingField,
    /// The value does not match the expected pattern (email, `HH:MM`, ...).
    InvalidFormat,
    /// The value is well-formed but outside its allowed range or ordering.
    RangeViolation,
    /// A weekday key is absent from `workingHours`.
    MissingDay,
    /// `workingHours` contains a key that is not a weekday.
    UnknownDay,
    /// Untyped input carried the wrong primitive type.
    TypeMismatch,
}

impl ErrorKind {
    fn label(self) -> &'static str {
        match self {
            Self::MissingField => "missing field",
            Self::InvalidFormat => "invalid format",
            Self::RangeViolation => "range violation",
            Self::MissingDay => "missing day",
            Self::UnknownDay => "unknown day",
            Self::TypeMismatch => "type mismatch",
        }
    }
}

/// A validation failure addressed to a single field.
///
/// `field` is a path using the JSON names, e.g. `workingHours.monday.open`
/// or `generalPhone[1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: String,
    kind: ErrorKind,
    detail: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            detail: detail.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, ErrorKind::MissingField, "value is required")
    }

    pub fn invalid_format(field: impl Into<String>, expected: &str) -> Self {
        Self::new(
            field,
            ErrorKind::InvalidFormat,
            format!("expected {expected}"),
        )
    }

    pub fn range(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(field, ErrorKind::RangeViolation, detail)
    }

    pub fn type_mismatch(field: impl Into<String>, expected: &str, found: &str) -> Self {
        Self::new(
            field,
            ErrorKind::TypeMismatch,
            format!("expected {expected}, found {found}"),
        )
    }

    /// Path of the offending field.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable description of what is wrong.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Prefix the field path with `parent`, yielding `parent.field`.
    ///
    /// Index segments (`[0]`) are appended without a dot.
    pub fn within(mut self, parent: &str) -> Self {
        self.field = if self.field.starts_with('[') {
            format!("{parent}{}", self.field)
        } else {
            format!("{parent}.{}", self.field)
        };
        self
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.field, self.kind.label(), self.detail)
    }
}

impl std::error::Error for FieldError {}

/// Every violation found in one validation pass, in discovery order.
///
/// Invariant: never empty when returned as an `Err`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Append all of `other`, prefixing each path with `parent`.
    pub fn extend_within(&mut self, parent: &str, other: FieldErrors) {
        self.0.extend(other.0.into_iter().map(|e| e.within(parent)));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// First error reported for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn has(&self, field: &str, kind: ErrorKind) -> bool {
        self.0.iter().any(|e| e.field == field && e.kind == kind)
    }

    /// Record the error(s) of `result`, if any, and pass the value through.
    pub fn take<T, E>(&mut self, result: Result<T, E>) -> Option<T>
    where
        E: Into<FieldErrors>,
    {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.append(err.into());
                None
            }
        }
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }

    /// Split into (type mismatches, everything else).
    pub(crate) fn partition_type_mismatches(self) -> (FieldErrors, FieldErrors) {
        let (mismatches, rest) = self
            .0
            .into_iter()
            .partition(|e| e.kind == ErrorKind::TypeMismatch);
        (Self(mismatches), Self(rest))
    }

    pub(crate) fn append(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }
}

impl From<FieldError> for FieldErrors {
    fn from(value: FieldError) -> Self {
        Self(vec![value])
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => write!(f, "no validation errors"),
            [only] => write!(f, "{only}"),
            [first, rest @ ..] => write!(f, "{first} (and {} more)", rest.len()),
        }
    }
}

impl std::error::Error for FieldErrors {}
