//! CIP MCP Server
//!
//! Model Context Protocol server exposing profile-based detection to AI
//! clients over stdio.
//!
//! Provides 6 MCP tools:
//! - `health_check` - Server readiness and loaded profile count
//! - `list_domain_profiles` - Registered profile names
//! - `validate_domain_profile` - Contract validation for profile YAML
//! - `mantic_detect` - Detection in a caller-chosen mode
//! - `mantic_detect_friction` - Friction detection
//! - `mantic_detect_emergence` - Emergence detection
//!
//! # Example
//!
//! ```no_run
//! use cip_mcp::McpServer;
//! use cip_sdk::Settings;
//!
//! let settings = Settings::load(None).unwrap();
//! let server = McpServer::from_settings(&settings).unwrap();
//! server.run().unwrap();
//! ```

#![warn(missing_docs)]

mod error;
mod protocol;
mod server;
mod tools;

pub use error::McpError;
pub use server::{McpServer, PROTOCOL_VERSION};
