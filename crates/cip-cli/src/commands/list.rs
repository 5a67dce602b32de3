//! List command implementation.

use crate::cli::ListArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use cip_registry::ProfileRegistry;
use cip_sdk::Settings;

/// Execute the list command.
pub fn execute_list(args: ListArgs, settings: &Settings, formatter: &Formatter) -> Result<()> {
    let dir = args.dir.unwrap_or_else(|| settings.profiles_dir.clone());
    if !dir.is_dir() {
        return Err(CliError::InvalidInput(format!(
            "profile directory not found: {}",
            dir.display()
        )));
    }

    let registry = ProfileRegistry::from_directory(&dir)?;
    println!("{}", formatter.format_profiles(&registry.list())?);

    Ok(())
}
