//! Command implementations.

pub mod compose;
pub mod config;
pub mod eval;
pub mod member;

pub use self::compose::execute_compose;
pub use self::config::execute_config;
pub use self::eval::execute_eval;
pub use self::member::execute_member;

use crate::error::Result;
use predix_expr::Lambda;
use std::fs;

/// Read a lambda from a JSON file; a `null` document is the absent lambda.
///
/// Trees read from disk bypass the checked constructors, so they are
/// validated before use.
pub fn read_lambda(path: &str) -> Result<Option<Lambda>> {
    let contents = fs::read_to_string(path)?;
    let lambda: Option<Lambda> = serde_json::from_str(&contents)?;
    if let Some(lambda) = &lambda {
        lambda.validate()?;
    }
    Ok(lambda)
}
