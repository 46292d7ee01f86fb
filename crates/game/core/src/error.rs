//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g., `GridError`, `EngineError`) are defined in
//! their respective modules next to the operations that raise them. This
//! module only holds the classification shared by all of them.
//!
//! Expected gameplay results such as an invalid move or a full backpack are
//! not errors at all; they are [`crate::Outcome`] variants.

/// Severity level of an error, used for categorization and logging.
///
/// - **Validation**: a caller passed something it should have checked first
///   (out-of-range coordinate or inventory index, unknown hero)
/// - **Internal**: grid/registry state disagrees with itself; indicates a bug
/// - **Fatal**: world construction cannot proceed (bad map, too few treasures)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on who is at fault, not on impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
