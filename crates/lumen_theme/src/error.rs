//! Theme error taxonomy
//!
//! Every failure the engine surfaces is a [`ThemeError`]. Each kind carries a
//! stable code (`THEME_001`..`THEME_008`), a category, a severity and a
//! declared recovery strategy. The recovery strategy is a classification tag
//! for logs and telemetry; nothing acts on it automatically.

use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Boxed foreign error kept as the source of a wrapped theme error
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Structured key/value context attached to an error for logging
pub type ErrorContext = BTreeMap<String, String>;

/// Theme engine errors
#[derive(Error, Debug)]
pub enum ThemeError {
    /// A theme variant or plugin is not registered
    #[error("{kind} '{name}' not found (available: {})", .available.join(", "))]
    NotFound {
        kind: &'static str,
        name: String,
        available: Vec<String>,
    },

    /// Input or theme content failed validation
    #[error("validation failed: {message}")]
    Validation { message: String, issues: Vec<String> },

    /// Tokens could not be composed
    #[error("failed to compose theme '{variant}': {message}")]
    Composition {
        variant: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The enhanced theme is missing required accessors or fields
    #[error("failed to enhance theme '{variant}': missing {}", .missing.join(", "))]
    Enhancement { variant: String, missing: Vec<String> },

    /// Cache bookkeeping failed
    #[error("cache error: {message}")]
    Cache { message: String },

    /// An operation exceeded its time budget
    #[error("{operation} took {elapsed_ms}ms (budget {budget_ms}ms)")]
    Performance {
        operation: String,
        elapsed_ms: u64,
        budget_ms: u64,
    },

    /// Configuration could not be loaded or is inconsistent
    #[error("configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// A parent theme or plugin lifecycle dependency is unavailable
    #[error("dependency '{dependency}' unavailable for '{required_by}': {message}")]
    Dependency {
        dependency: String,
        required_by: String,
        message: String,
    },
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;

/// Broad classification of an error
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    Resolution,
    Validation,
    Composition,
    Enhancement,
    Cache,
    Performance,
    Configuration,
    Dependency,
}

/// How bad an error is, ordered from least to most severe
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// Declared recovery strategy for an error kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecoveryStrategy {
    Retry,
    Fallback,
    UserAction,
    Restart,
    Ignore,
}

impl ThemeError {
    pub fn not_found(kind: &'static str, name: impl Into<String>, available: Vec<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
            available,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            issues: Vec::new(),
        }
    }

    pub fn validation_with(message: impl Into<String>, issues: Vec<String>) -> Self {
        Self::Validation {
            message: message.into(),
            issues,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    pub fn configuration_from(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Wrap a foreign error raised while building `variant`.
    pub fn composition(variant: impl Into<String>, source: impl Into<BoxError>) -> Self {
        let source = source.into();
        Self::Composition {
            variant: variant.into(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "THEME_001",
            Self::Validation { .. } => "THEME_002",
            Self::Composition { .. } => "THEME_003",
            Self::Enhancement { .. } => "THEME_004",
            Self::Cache { .. } => "THEME_005",
            Self::Performance { .. } => "THEME_006",
            Self::Configuration { .. } => "THEME_007",
            Self::Dependency { .. } => "THEME_008",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::Resolution,
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::Composition { .. } => ErrorCategory::Composition,
            Self::Enhancement { .. } => ErrorCategory::Enhancement,
            Self::Cache { .. } => ErrorCategory::Cache,
            Self::Performance { .. } => ErrorCategory::Performance,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Dependency { .. } => ErrorCategory::Dependency,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Cache { .. } | Self::Performance { .. } => ErrorSeverity::Low,
            Self::Validation { .. } | Self::Enhancement { .. } => ErrorSeverity::Medium,
            Self::NotFound { .. } | Self::Composition { .. } | Self::Configuration { .. } => {
                ErrorSeverity::High
            }
            Self::Dependency { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery(&self) -> RecoveryStrategy {
        match self {
            Self::NotFound { .. } | Self::Composition { .. } | Self::Enhancement { .. } => {
                RecoveryStrategy::Fallback
            }
            Self::Validation { .. } | Self::Configuration { .. } => RecoveryStrategy::UserAction,
            Self::Cache { .. } | Self::Performance { .. } => RecoveryStrategy::Ignore,
            Self::Dependency { .. } => RecoveryStrategy::Restart,
        }
    }

    /// Structured context derived from the error's fields
    pub fn context(&self) -> ErrorContext {
        let mut ctx = ErrorContext::new();
        match self {
            Self::NotFound {
                kind,
                name,
                available,
            } => {
                ctx.insert("kind".into(), (*kind).to_string());
                ctx.insert("name".into(), name.clone());
                ctx.insert("available".into(), available.join(","));
            }
            Self::Validation { issues, .. } => {
                ctx.insert("issues".into(), issues.len().to_string());
            }
            Self::Composition { variant, .. } => {
                ctx.insert("variant".into(), variant.clone());
            }
            Self::Enhancement { variant, missing } => {
                ctx.insert("variant".into(), variant.clone());
                ctx.insert("missing".into(), missing.join(","));
            }
            Self::Cache { .. } | Self::Configuration { .. } => {}
            Self::Performance {
                operation,
                elapsed_ms,
                budget_ms,
            } => {
                ctx.insert("operation".into(), operation.clone());
                ctx.insert("elapsed_ms".into(), elapsed_ms.to_string());
                ctx.insert("budget_ms".into(), budget_ms.to_string());
            }
            Self::Dependency {
                dependency,
                required_by,
                ..
            } => {
                ctx.insert("dependency".into(), dependency.clone());
                ctx.insert("required_by".into(), required_by.clone());
            }
        }
        ctx
    }

    /// Emit this error as a tracing event at a level matching its severity
    pub fn report(&self) {
        let code = self.code();
        let category = self.category();
        let recovery = self.recovery();
        match self.severity() {
            ErrorSeverity::Critical | ErrorSeverity::High => {
                tracing::error!(code, ?category, ?recovery, "{self}")
            }
            ErrorSeverity::Medium => tracing::warn!(code, ?category, ?recovery, "{self}"),
            ErrorSeverity::Low => tracing::debug!(code, ?category, ?recovery, "{self}"),
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_and_distinct() {
        let errors = [
            ThemeError::not_found("theme", "x", vec![]),
            ThemeError::validation("bad"),
            ThemeError::composition("x", std::fmt::Error),
            ThemeError::Enhancement {
                variant: "x".into(),
                missing: vec!["primary".into()],
            },
            ThemeError::Cache {
                message: "poisoned".into(),
            },
            ThemeError::Performance {
                operation: "create_theme".into(),
                elapsed_ms: 30,
                budget_ms: 16,
            },
            ThemeError::configuration("bad"),
            ThemeError::Dependency {
                dependency: "base".into(),
                required_by: "child".into(),
                message: "missing".into(),
            },
        ];
        let codes: Vec<_> = errors.iter().map(ThemeError::code).collect();
        assert_eq!(
            codes,
            vec![
                "THEME_001",
                "THEME_002",
                "THEME_003",
                "THEME_004",
                "THEME_005",
                "THEME_006",
                "THEME_007",
                "THEME_008"
            ]
        );
    }

    #[test]
    fn not_found_lists_available_variants() {
        let err = ThemeError::not_found("theme", "sepia", vec!["light".into(), "dark".into()]);
        assert_eq!(
            err.to_string(),
            "theme 'sepia' not found (available: light, dark)"
        );
        assert_eq!(err.context()["available"], "light,dark");
        assert_eq!(err.recovery(), RecoveryStrategy::Fallback);
    }

    #[test]
    fn severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::High);
        assert!(ErrorSeverity::Low < ErrorSeverity::Medium);
    }
}
