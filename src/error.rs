//! Error types for the decorators.
//!
//! Failures raised by a wrapped function are never converted into these
//! errors: a returned `Result` is treated as an ordinary value and a panic
//! unwinds to the caller that triggered the execution. [`Error`] only covers
//! what the decorators themselves can detect.

use thiserror::Error;

/// Errors reported by the decorators.
///
/// # Examples
///
/// ```rust
/// use underbar::Error;
///
/// let error = Error::Poisoned { decorator: "once" };
/// assert_eq!(
///     error.to_string(),
///     "once: the wrapped function panicked during its only execution"
/// );
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The single execution of a `once` wrapper panicked, so no result was
    /// ever stored.
    #[error("{decorator}: the wrapped function panicked during its only execution")]
    Poisoned {
        /// Name of the decorator that was poisoned.
        decorator: &'static str,
    },

    /// A `once` wrapper was called again from inside its own wrapped function.
    #[error("{decorator}: called re-entrantly from inside the wrapped function")]
    Reentrant {
        /// Name of the decorator that was re-entered.
        decorator: &'static str,
    },

    /// The argument list could not be encoded into a cache key.
    #[cfg(feature = "serde")]
    #[error("memoize: argument list could not be encoded as a cache key: {0}")]
    KeyEncoding(#[from] serde_json::Error),
}

impl Error {
    /// Returns the name of the decorator that reported this error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use underbar::Error;
    ///
    /// assert_eq!(Error::Reentrant { decorator: "once" }.decorator(), "once");
    /// ```
    pub const fn decorator(&self) -> &'static str {
        match self {
            Self::Poisoned { decorator } | Self::Reentrant { decorator } => *decorator,
            #[cfg(feature = "serde")]
            Self::KeyEncoding(_) => "memoize",
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
