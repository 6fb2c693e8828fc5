//! Tool registry and capability gating.
//!
//! Toolsets declare themselves read-only or write up front. At startup the
//! registry checks every tool's own read-only hint against its toolset's
//! bucket and collects mismatches as structured violations instead of
//! registering a tool surface that lies about its side effects. In read-only
//! mode, write toolsets are never constructed, so destructive handlers do not
//! exist in the process at all.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use aegis_client::ApiClient;
use serde_json::Value;

use crate::args::ArgumentMap;
use crate::outcome::ToolOutcome;

pub type ToolFuture = Pin<Box<dyn Future<Output = ToolOutcome> + Send>>;
pub type ToolHandler = Box<dyn Fn(ArgumentMap) -> ToolFuture + Send + Sync>;
pub type ToolConstructor = fn(&ApiClient) -> Tool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ReadOnly,
    Write,
}

impl Capability {
    fn as_str(self) -> &'static str {
        match self {
            Self::ReadOnly => "read-only",
            Self::Write => "write",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMode {
    ReadOnly,
    ReadWrite,
}

pub struct Tool {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    pub read_only: bool,
    pub handler: ToolHandler,
}

pub struct Toolset {
    pub name: &'static str,
    pub capability: Capability,
    pub constructors: Vec<ToolConstructor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// A tool's read-only hint disagrees with the bucket it was placed in.
    CapabilityMismatch { declared: bool, bucket: Capability },
    /// Two tools registered under the same name.
    DuplicateName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractViolation {
    pub toolset: &'static str,
    pub tool: &'static str,
    pub kind: ViolationKind,
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::CapabilityMismatch { declared, bucket } => write!(
                f,
                "tool {} in toolset {}: declared read_only={} but registered in {} bucket",
                self.tool,
                self.toolset,
                declared,
                bucket.as_str()
            ),
            ViolationKind::DuplicateName => write!(
                f,
                "tool {} in toolset {}: name already registered",
                self.tool, self.toolset
            ),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("tool registry contract violations:\n{}", render(.violations))]
pub struct RegistryError {
    pub violations: Vec<ContractViolation>,
}

fn render(violations: &[ContractViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("  {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct ToolRegistry {
    tools: BTreeMap<&'static str, Tool>,
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ToolRegistry {
    /// Builds the registry from the given toolsets. Write toolsets are
    /// skipped entirely in read-only mode. All contract violations found
    /// across the surviving toolsets are reported together.
    pub fn build(
        client: &ApiClient,
        mode: ServerMode,
        toolsets: Vec<Toolset>,
    ) -> Result<Self, RegistryError> {
        let mut tools: BTreeMap<&'static str, Tool> = BTreeMap::new();
        let mut violations = Vec::new();

        for toolset in toolsets {
            if mode == ServerMode::ReadOnly && toolset.capability == Capability::Write {
                continue;
            }
            let expected_read_only = toolset.capability == Capability::ReadOnly;
            for constructor in &toolset.constructors {
                let tool = constructor(client);
                if tool.read_only != expected_read_only {
                    violations.push(ContractViolation {
                        toolset: toolset.name,
                        tool: tool.name,
                        kind: ViolationKind::CapabilityMismatch {
                            declared: tool.read_only,
                            bucket: toolset.capability,
                        },
                    });
                    continue;
                }
                if tools.contains_key(tool.name) {
                    violations.push(ContractViolation {
                        toolset: toolset.name,
                        tool: tool.name,
                        kind: ViolationKind::DuplicateName,
                    });
                    continue;
                }
                tools.insert(tool.name, tool);
            }
        }

        if !violations.is_empty() {
            return Err(RegistryError { violations });
        }
        Ok(Self { tools })
    }

    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tools in lexicographic name order, for a stable tools/list payload.
    pub fn iter(&self) -> impl Iterator<Item = &Tool> {
        self.tools.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_client() -> ApiClient {
        ApiClient::new(aegis_client::ClientOptions {
            api_key: "test-key".to_string(),
            region: Some("us".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    fn noop_handler() -> ToolHandler {
        Box::new(|_args| {
            let fut: ToolFuture = Box::pin(async { ToolOutcome::text("ok") });
            fut
        })
    }

    fn read_tool(_client: &ApiClient) -> Tool {
        Tool {
            name: "list_things",
            description: "Lists things.",
            input_schema: json!({ "type": "object", "properties": {} }),
            read_only: true,
            handler: noop_handler(),
        }
    }

    fn write_tool(_client: &ApiClient) -> Tool {
        Tool {
            name: "delete_things",
            description: "Deletes things.",
            input_schema: json!({ "type": "object", "properties": {} }),
            read_only: false,
            handler: noop_handler(),
        }
    }

    fn mislabeled_tool(_client: &ApiClient) -> Tool {
        Tool {
            name: "sneaky_delete",
            description: "Claims to be read-only.",
            input_schema: json!({ "type": "object", "properties": {} }),
            read_only: false,
            handler: noop_handler(),
        }
    }

    #[test]
    fn read_only_mode_drops_write_toolsets() {
        let client = test_client();
        let toolsets = vec![
            Toolset {
                name: "things",
                capability: Capability::ReadOnly,
                constructors: vec![read_tool],
            },
            Toolset {
                name: "things_write",
                capability: Capability::Write,
                constructors: vec![write_tool],
            },
        ];
        let registry = ToolRegistry::build(&client, ServerMode::ReadOnly, toolsets).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("list_things").is_some());
        assert!(registry.get("delete_things").is_none());
    }

    #[test]
    fn read_write_mode_keeps_both_buckets() {
        let client = test_client();
        let toolsets = vec![
            Toolset {
                name: "things",
                capability: Capability::ReadOnly,
                constructors: vec![read_tool],
            },
            Toolset {
                name: "things_write",
                capability: Capability::Write,
                constructors: vec![write_tool],
            },
        ];
        let registry = ToolRegistry::build(&client, ServerMode::ReadWrite, toolsets).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.get("delete_things").is_some());
    }

    #[test]
    fn capability_mismatch_is_reported_not_registered() {
        let client = test_client();
        let toolsets = vec![Toolset {
            name: "things",
            capability: Capability::ReadOnly,
            constructors: vec![read_tool, mislabeled_tool],
        }];
        let err = ToolRegistry::build(&client, ServerMode::ReadWrite, toolsets).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].tool, "sneaky_delete");
        assert_eq!(
            err.violations[0].kind,
            ViolationKind::CapabilityMismatch {
                declared: false,
                bucket: Capability::ReadOnly,
            }
        );
    }

    #[test]
    fn duplicate_names_are_reported() {
        let client = test_client();
        let toolsets = vec![Toolset {
            name: "things",
            capability: Capability::ReadOnly,
            constructors: vec![read_tool, read_tool],
        }];
        let err = ToolRegistry::build(&client, ServerMode::ReadWrite, toolsets).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].kind, ViolationKind::DuplicateName);
    }

    #[test]
    fn iteration_is_name_ordered() {
        let client = test_client();
        let toolsets = vec![
            Toolset {
                name: "things_write",
                capability: Capability::Write,
                constructors: vec![write_tool],
            },
            Toolset {
                name: "things",
                capability: Capability::ReadOnly,
                constructors: vec![read_tool],
            },
        ];
        let registry = ToolRegistry::build(&client, ServerMode::ReadWrite, toolsets).unwrap();
        let names: Vec<&str> = registry.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["delete_things", "list_things"]);
    }
}
