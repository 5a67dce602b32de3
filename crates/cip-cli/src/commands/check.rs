//! Check command implementation.

use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use cip_registry::{load_profile_file, RegistryError};

/// Execute the check command.
pub fn execute_check(args: CheckArgs, formatter: &Formatter) -> Result<()> {
    match load_profile_file(&args.file) {
        Ok(profile) => {
            println!(
                "{}",
                formatter.success(&format!("{} is a valid profile", args.file.display()))
            );
            println!("{}", formatter.format_profiles(&[profile.descriptor()])?);
            Ok(())
        }
        Err(RegistryError::Load { source, .. }) => {
            for message in source.messages() {
                println!("{}", formatter.error(&message));
            }
            Err(CliError::LintFailed {
                failures: 1,
                checked: 1,
            })
        }
        Err(e) => Err(e.into()),
    }
}
