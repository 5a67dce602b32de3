//! Command implementations.

pub mod check;
pub mod detect;
pub mod list;
pub mod validate;

pub use self::check::execute_check;
pub use self::detect::execute_detect;
pub use self::list::execute_list;
pub use self::validate::{execute_validate, lint_directory, LintReport};
