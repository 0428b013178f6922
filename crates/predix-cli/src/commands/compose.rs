//! Compose command implementation.

use crate::cli::ComposeArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use predix_compose::{compose_lambdas, ComposeError, Connective};
use predix_expr::Lambda;
use tracing::debug;

/// Execute the compose command.
pub fn execute_compose(
    args: ComposeArgs,
    default_connective: Connective,
    formatter: &Formatter,
) -> Result<()> {
    let connective = args.connective.map(Into::into).unwrap_or(default_connective);
    let composed = compose_files(&args.files, connective)?;
    println!("{}", formatter.format_lambda(&composed)?);
    Ok(())
}

/// Left-fold the lambdas in `paths` under `connective`.
pub fn compose_files(paths: &[String], connective: Connective) -> Result<Lambda> {
    let mut lambdas = paths.iter().map(|path| {
        super::read_lambda(path)?
            .ok_or_else(|| CliError::from(ComposeError::NullExpression(path.clone())))
    });

    let first = lambdas
        .next()
        .ok_or_else(|| CliError::InvalidInput("No predicate files provided".to_string()))??;

    let mut composed = first;
    let mut count = 1;
    for next in lambdas {
        composed = compose_lambdas(&composed, &next?, connective)?;
        count += 1;
    }

    if count < 2 {
        return Err(CliError::InvalidInput(
            "At least two predicate files are required".to_string(),
        ));
    }

    debug!(files = count, connective = %connective, "Composed predicate files");
    Ok(composed)
}
