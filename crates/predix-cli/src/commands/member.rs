//! Member command implementation.

use crate::cli::MemberArgs;
use crate::error::Result;
use crate::output::Formatter;
use predix_compose::member_name;

/// Execute the member command.
pub fn execute_member(args: MemberArgs, formatter: &Formatter) -> Result<()> {
    let name = member_name_of_file(&args.file)?;
    println!("{}", formatter.format_member(&name)?);
    Ok(())
}

/// Member name read by the selector stored in `path`.
pub fn member_name_of_file(path: &str) -> Result<String> {
    let selector = super::read_lambda(path)?;
    Ok(member_name(selector.as_ref())?)
}
