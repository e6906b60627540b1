//! Result type alias for Whisp
//!
//! This module provides a convenient Result type alias that uses WhispError
//! as the error type.

use super::errors::WhispError;

/// Result type alias for Whisp operations
///
/// # Examples
///
/// ```
/// use whisp::domain::result::Result;
/// use whisp::domain::errors::WhispError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(WhispError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, WhispError>;
