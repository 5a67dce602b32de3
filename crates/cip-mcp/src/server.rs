//! MCP server implementation

use cip_domain::Detector;
use cip_registry::ProfileRegistry;
use cip_sdk::{load_registry, Settings};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::McpError;
use crate::protocol::*;
use crate::tools;

/// MCP protocol revision this server speaks
pub const PROTOCOL_VERSION: &str = "2024-11-05";

const INSTRUCTIONS: &str = "Profile-based detection server for cross-domain reasoning. \
Exposes detection tools plus domain profile contract validation and registry discovery.";

/// MCP Server
///
/// Handles Model Context Protocol requests over a line-delimited JSON-RPC
/// stream. The registry is fixed at construction; requests never mutate state.
pub struct McpServer {
    registry: Arc<ProfileRegistry>,
    detector: Arc<dyn Detector>,
}

impl McpServer {
    /// Create a server over a registry and a detector
    pub fn new(registry: Arc<ProfileRegistry>, detector: Arc<dyn Detector>) -> Self {
        Self { registry, detector }
    }

    /// Create a server from settings
    ///
    /// Loads every profile under `settings.profiles_dir` and builds the
    /// configured detector.
    pub fn from_settings(settings: &Settings) -> Result<Self, McpError> {
        let registry = load_registry(&settings.profiles_dir)?;
        info!(
            "Loaded {} domain profiles from {}",
            registry.len(),
            settings.profiles_dir.display()
        );
        let detector = settings.detector()?;
        Ok(Self::new(Arc::new(registry), detector))
    }

    /// Run the MCP server (stdio transport)
    ///
    /// Reads JSON-RPC requests from stdin and writes responses to stdout.
    pub fn run(&self) -> Result<(), McpError> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Serve requests from `reader` until it is exhausted
    pub fn serve<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> Result<(), McpError> {
        info!("MCP server started");

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            debug!("Received request: {}", line);

            let request: JsonRpcRequest = match serde_json::from_str(&line) {
                Ok(req) => req,
                Err(e) => {
                    error!("Failed to parse request: {}", e);
                    let response = JsonRpcError::new(None, -32700, format!("Parse error: {}", e));
                    self.write_response(&mut writer, &response.into())?;
                    continue;
                }
            };

            if let Some(response) = self.handle_request(request) {
                self.write_response(&mut writer, &response)?;
            }
        }

        info!("MCP server stopped");
        Ok(())
    }

    /// Handle a JSON-RPC request; notifications get no response
    fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcMessage> {
        let id = request.id.clone();

        if request.jsonrpc != JSONRPC_VERSION {
            let error = McpError::InvalidRequest(format!(
                "Unsupported jsonrpc version: {}",
                request.jsonrpc
            ));
            return Some(JsonRpcError::new(id, error.error_code(), error.to_string()).into());
        }

        if request.method.starts_with("notifications/") {
            debug!("Ignoring notification {}", request.method);
            return None;
        }

        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tool_call(request.params),
            _ => Err(McpError::ToolNotFound(format!(
                "Method not found: {}",
                request.method
            ))),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::new(id, value).into(),
            Err(e) => {
                warn!("Request failed: {}", e);
                JsonRpcError::new(id, e.error_code(), e.to_string()).into()
            }
        })
    }

    /// Handle initialize request
    fn handle_initialize(&self) -> Result<Value, McpError> {
        let response = InitializeResponse {
            protocol_version: PROTOCOL_VERSION.to_string(),
            server_info: ServerInfo {
                name: "cip-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: INSTRUCTIONS.to_string(),
            capabilities: Capabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
        };

        Ok(serde_json::to_value(response)?)
    }

    /// Handle tools/list request
    fn handle_tools_list(&self) -> Result<Value, McpError> {
        let tools = vec![
            tool_definition_health(),
            tool_definition_list_profiles(),
            tool_definition_validate(),
            tool_definition_detect(
                "mantic_detect",
                "Run profile-based detection in friction or emergence mode",
                true,
            ),
            tool_definition_detect(
                "mantic_detect_friction",
                "Run profile-based friction detection",
                false,
            ),
            tool_definition_detect(
                "mantic_detect_emergence",
                "Run profile-based emergence detection",
                false,
            ),
        ];

        Ok(serde_json::to_value(ToolListResponse { tools })?)
    }

    /// Handle tools/call request
    fn handle_tool_call(&self, params: Value) -> Result<Value, McpError> {
        let tool_name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::InvalidParams("Missing tool name".to_string()))?;

        let mut arguments = match params.get("arguments") {
            Some(Value::Object(args)) => args.clone(),
            Some(Value::Null) | None => Map::new(),
            Some(_) => {
                return Err(McpError::InvalidParams(
                    "Tool arguments must be an object".to_string(),
                ))
            }
        };

        match tool_name {
            "health_check" => Ok(serde_json::to_value(tools::handle_health(&self.registry))?),
            "list_domain_profiles" => Ok(serde_json::to_value(tools::handle_list_profiles(
                &self.registry,
            ))?),
            "validate_domain_profile" => {
                let params: tools::ValidateParams = parse_arguments(arguments)?;
                Ok(serde_json::to_value(tools::handle_validate(params)?)?)
            }
            "mantic_detect" => {
                arguments.entry("mode").or_insert_with(|| json!("friction"));
                self.call_detect_tool(arguments)
            }
            "mantic_detect_friction" => {
                arguments.insert("mode".to_string(), json!("friction"));
                self.call_detect_tool(arguments)
            }
            "mantic_detect_emergence" => {
                arguments.insert("mode".to_string(), json!("emergence"));
                self.call_detect_tool(arguments)
            }
            _ => Err(McpError::ToolNotFound(tool_name.to_string())),
        }
    }

    /// Call a detect tool
    fn call_detect_tool(&self, arguments: Map<String, Value>) -> Result<Value, McpError> {
        let params: tools::DetectParams = parse_arguments(arguments)?;
        let outcome = tools::handle_detect(&self.registry, self.detector.as_ref(), params);
        Ok(serde_json::to_value(outcome)?)
    }

    /// Write response to the output stream
    fn write_response<W: Write>(&self, writer: &mut W, response: &JsonRpcMessage) -> Result<(), McpError> {
        let response_str = serde_json::to_string(response)?;
        writeln!(writer, "{}", response_str)?;
        writer.flush()?;
        debug!("Sent response: {}", response_str);
        Ok(())
    }
}

fn parse_arguments<T: DeserializeOwned>(arguments: Map<String, Value>) -> Result<T, McpError> {
    serde_json::from_value(Value::Object(arguments)).map_err(|e| McpError::InvalidParams(e.to_string()))
}

// Tool definitions for tools/list response
fn tool_definition_health() -> ToolDefinition {
    ToolDefinition {
        name: "health_check".to_string(),
        description: "Check server readiness and profile load state".to_string(),
        input_schema: json!({"type": "object", "properties": {}}),
    }
}

fn tool_definition_list_profiles() -> ToolDefinition {
    ToolDefinition {
        name: "list_domain_profiles".to_string(),
        description: "List registered domain profiles available for detection".to_string(),
        input_schema: json!({"type": "object", "properties": {}}),
    }
}

fn tool_definition_validate() -> ToolDefinition {
    ToolDefinition {
        name: "validate_domain_profile".to_string(),
        description: "Validate a domain profile YAML document against the canonical contract".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "profile_yaml": {"type": "string", "description": "Profile document as YAML text"}
            },
            "required": ["profile_yaml"]
        }),
    }
}

fn tool_definition_detect(name: &str, description: &str, with_mode: bool) -> ToolDefinition {
    let mut properties = json!({
        "profile_name": {"type": "string", "description": "Registered domain profile name"},
        "layer_values": {
            "type": "array",
            "description": "One value per profile layer, clamped to [0, 1]",
            "items": {"type": "number"}
        },
        "f_time": {"type": "number", "description": "Temporal multiplier (default: 1.0)", "default": 1.0},
        "threshold_override": {
            "type": "object",
            "description": "Threshold overrides by name",
            "additionalProperties": {"type": "number"}
        },
        "temporal_config": {
            "type": "object",
            "description": "Temporal kernel configuration; kernel_type must be on the profile allowlist"
        },
        "interaction_mode": {"type": "string", "enum": ["dynamic", "base"], "default": "dynamic"},
        "interaction_override": {
            "description": "Interaction coefficients by layer name, or positional",
            "oneOf": [
                {"type": "object", "additionalProperties": {"type": "number"}},
                {"type": "array", "items": {"type": "number"}}
            ]
        },
        "interaction_override_mode": {"type": "string", "enum": ["scale", "replace"], "default": "scale"}
    });

    if with_mode {
        if let Some(props) = properties.as_object_mut() {
            props.insert(
                "mode".to_string(),
                json!({"type": "string", "enum": ["friction", "emergence"], "default": "friction"}),
            );
        }
    }

    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: json!({
            "type": "object",
            "properties": properties,
            "required": ["profile_name", "layer_values"]
        }),
    }
}
