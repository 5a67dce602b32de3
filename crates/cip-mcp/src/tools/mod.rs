//! MCP tool implementations

mod detect;
mod health;
mod profiles;
mod validate;

pub use detect::{handle_detect, DetectOutcome, DetectParams, ErrorCode, ToolError};
pub use health::{handle_health, HealthResult, SERVER_NAME};
pub use profiles::{handle_list_profiles, ListProfilesResult};
pub use validate::{handle_validate, ValidateParams, ValidateResult};
