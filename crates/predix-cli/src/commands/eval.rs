//! Eval command implementation.

use crate::cli::EvalArgs;
use crate::convert;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use predix_compose::ComposeError;
use predix_eval::{EvalConfig, EvalContext, Evaluator};
use predix_expr::Value;

/// Execute the eval command.
pub fn execute_eval(args: EvalArgs, config: &EvalConfig, formatter: &Formatter) -> Result<()> {
    let value = evaluate_file(&args.predicate, &args.args, config)?;
    println!("{}", formatter.format_value(&value)?);
    Ok(())
}

/// Evaluate the lambda stored in `path` against a JSON array of arguments.
pub fn evaluate_file(path: &str, args_json: &str, config: &EvalConfig) -> Result<Value> {
    let lambda = super::read_lambda(path)?
        .ok_or_else(|| CliError::from(ComposeError::NullExpression(path.to_string())))?;

    let raw: Vec<serde_json::Value> = serde_json::from_str(args_json)
        .map_err(|e| CliError::InvalidInput(format!("Arguments must be a JSON array: {}", e)))?;
    if raw.len() != lambda.arity() {
        return Err(CliError::InvalidInput(format!(
            "Expected {} argument(s), got {}",
            lambda.arity(),
            raw.len()
        )));
    }

    let args = raw
        .iter()
        .zip(lambda.params())
        .map(|(json, param)| convert::from_json(json, Some(&param.ty)))
        .collect::<Result<Vec<_>>>()?;

    let evaluator = Evaluator::new(config.clone(), EvalContext::new());
    Ok(evaluator.evaluate(&lambda, &args)?)
}
