// Field Validators - Reusable validation components
use once_cell::sync::Lazy;
use regex::Regex;

/// 24-hour `HH:MM` clock time
#[allow(clippy::expect_used)] // literal pattern, verified by tests
static TIME_OF_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid time-of-day pattern")
});

/// Trait for field validators
pub trait FieldValidator<T: ?Sized> {
    /// Validate a field value
    fn validate(&self, value: &T) -> Result<(), String>;
}

/// String validator with length constraints
///
/// Lengths are counted in characters, not bytes, so limits match what a user
/// sees in the input.
#[derive(Debug, Clone)]
pub struct StringValidator {
    min_length: Option<(usize, String)>,
    max_length: Option<(usize, String)>,
    not_empty: Option<String>,
    trim: bool,
}

impl Default for StringValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl StringValidator {
    /// Create a new string validator
    pub fn new() -> Self {
        Self { min_length: None, max_length: None, not_empty: None, trim: true }
    }

    /// Require non-empty string
    pub fn not_empty(self) -> Self {
        self.not_empty_with("Value cannot be empty")
    }

    /// Require non-empty string, reporting `message` otherwise
    pub fn not_empty_with(mut self, message: impl Into<String>) -> Self {
        self.not_empty = Some(message.into());
        self
    }

    /// Set minimum length
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some((min, format!("Length must be at least {} characters", min)));
        self
    }

    /// Set maximum length
    pub fn max_length(self, max: usize) -> Self {
        let message = format!("Length must not exceed {} characters", max);
        self.max_length_with(max, message)
    }

    /// Set maximum length, reporting `message` when exceeded
    pub fn max_length_with(mut self, max: usize, message: impl Into<String>) -> Self {
        self.max_length = Some((max, message.into()));
        self
    }

    /// Set whether to trim before validation
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

impl FieldValidator<str> for StringValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let val = if self.trim { value.trim() } else { value };
        let length = val.chars().count();

        if let Some(ref message) = self.not_empty {
            if val.is_empty() {
                return Err(message.clone());
            }
        }

        if let Some((min, ref message)) = self.min_length {
            if length < min {
                return Err(message.clone());
            }
        }

        if let Some((max, ref message)) = self.max_length {
            if length > max {
                return Err(message.clone());
            }
        }

        Ok(())
    }
}

impl FieldValidator<String> for StringValidator {
    fn validate(&self, value: &String) -> Result<(), String> {
        FieldValidator::<str>::validate(self, value.as_str())
    }
}

/// Validator matching a whole value against a regular expression
#[derive(Debug, Clone)]
pub struct PatternValidator {
    pattern: Regex,
    message: String,
}

impl PatternValidator {
    /// Create a validator from a pattern string
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self { pattern: Regex::new(pattern)?, message: message.into() })
    }

    /// 24-hour `HH:MM` clock time (`00:00` through `23:59`)
    pub fn time_of_day(message: impl Into<String>) -> Self {
        Self { pattern: TIME_OF_DAY.clone(), message: message.into() }
    }
}

impl FieldValidator<str> for PatternValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if self.pattern.is_match(value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// Collection size validator
#[derive(Debug, Clone, Default)]
pub struct CollectionValidator {
    min_size: Option<(usize, String)>,
    max_size: Option<(usize, String)>,
}

impl CollectionValidator {
    /// Create a new collection validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum size
    pub fn min_size(self, min: usize) -> Self {
        let message = format!("Collection must contain at least {} items", min);
        self.min_size_with(min, message)
    }

    /// Set minimum size, reporting `message` when the collection is smaller
    pub fn min_size_with(mut self, min: usize, message: impl Into<String>) -> Self {
        self.min_size = Some((min, message.into()));
        self
    }

    /// Set maximum size
    pub fn max_size(mut self, max: usize) -> Self {
        self.max_size = Some((max, format!("Collection must not exceed {} items", max)));
        self
    }
}

impl<T> FieldValidator<[T]> for CollectionValidator {
    fn validate(&self, value: &[T]) -> Result<(), String> {
        let size = value.len();

        if let Some((min, ref message)) = self.min_size {
            if size < min {
                return Err(message.clone());
            }
        }

        if let Some((max, ref message)) = self.max_size {
            if size > max {
                return Err(message.clone());
            }
        }

        Ok(())
    }
}
