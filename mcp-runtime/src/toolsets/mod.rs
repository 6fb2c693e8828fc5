//! Tool surface, one module per product area.

use std::future::Future;

use aegis_client::{ApiClient, QueryParameters};

use crate::args::{ArgError, ArgumentMap, optional_i64, optional_str};
use crate::outcome::ToolOutcome;
use crate::registry::{Capability, ToolHandler, Toolset};

mod alerts;
mod cloudposture;
mod container;
mod credits;
mod email;
mod endpoint;
mod exposure;
mod iam;

/// Every toolset the server knows about, read-only buckets first. The
/// registry decides which of these actually get registered based on the
/// server mode.
pub fn all() -> Vec<Toolset> {
    vec![
        Toolset {
            name: "alerts",
            capability: Capability::ReadOnly,
            constructors: alerts::constructors(),
        },
        Toolset {
            name: "cloud_posture",
            capability: Capability::ReadOnly,
            constructors: cloudposture::constructors(),
        },
        Toolset {
            name: "container_security",
            capability: Capability::ReadOnly,
            constructors: container::constructors(),
        },
        Toolset {
            name: "credits",
            capability: Capability::ReadOnly,
            constructors: credits::constructors(),
        },
        Toolset {
            name: "email_inventory",
            capability: Capability::ReadOnly,
            constructors: email::constructors(),
        },
        Toolset {
            name: "endpoint_security",
            capability: Capability::ReadOnly,
            constructors: endpoint::constructors(),
        },
        Toolset {
            name: "exposure_management",
            capability: Capability::ReadOnly,
            constructors: exposure::constructors(),
        },
        Toolset {
            name: "iam",
            capability: Capability::ReadOnly,
            constructors: iam::constructors(),
        },
        Toolset {
            name: "cloud_posture_write",
            capability: Capability::Write,
            constructors: cloudposture::write_constructors(),
        },
        Toolset {
            name: "iam_write",
            capability: Capability::Write,
            constructors: iam::write_constructors(),
        },
    ]
}

/// Wraps a plain async tool function into a boxed handler. Coercion failures
/// become error outcomes here, so individual tools only deal with the happy
/// path and `?`.
pub(crate) fn handler<F, Fut>(client: &ApiClient, run: F) -> ToolHandler
where
    F: Fn(ApiClient, ArgumentMap) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ToolOutcome, ArgError>> + Send + 'static,
{
    let client = client.clone();
    Box::new(move |args| {
        let fut = run(client.clone(), args);
        let boxed: crate::registry::ToolFuture =
            Box::pin(async move { fut.await.unwrap_or_else(ToolOutcome::from) });
        boxed
    })
}

/// Common pagination and ordering arguments shared by every list tool.
pub(crate) fn paging_params(args: &ArgumentMap) -> Result<QueryParameters, ArgError> {
    Ok(QueryParameters {
        order_by: optional_str(args, "orderBy")?,
        top: optional_i64(args, "top")?,
        skip_token: optional_str(args, "skipToken")?,
        next_batch_token: optional_str(args, "nextBatchToken")?,
        ..Default::default()
    })
}

/// Expands field names into the `"<field> asc" / "<field> desc"` enum values
/// used by orderBy schemas.
pub(crate) fn ordering_values(fields: &[&str]) -> Vec<String> {
    let mut values = Vec::with_capacity(fields.len() * 2);
    for field in fields {
        values.push(format!("{field} asc"));
        values.push(format!("{field} desc"));
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ServerMode, ToolRegistry};
    use aegis_client::ClientOptions;

    fn test_client() -> ApiClient {
        ApiClient::new(ClientOptions {
            api_key: "test-key".to_string(),
            region: Some("us".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn full_surface_builds_without_violations() {
        let client = test_client();
        let registry = ToolRegistry::build(&client, ServerMode::ReadWrite, all()).unwrap();
        assert!(registry.len() >= 40);
    }

    #[test]
    fn read_only_surface_excludes_destructive_tools() {
        let client = test_client();
        let registry = ToolRegistry::build(&client, ServerMode::ReadOnly, all()).unwrap();
        assert!(registry.get("aegis_delete_account").is_none());
        assert!(registry.get("aegis_delete_api_keys").is_none());
        assert!(registry.get("aegis_start_account_scan").is_none());
        assert!(registry.get("aegis_update_scan_settings").is_none());
        assert!(registry.get("aegis_list_accounts").is_some());
    }

    #[test]
    fn ordering_values_expand_to_both_directions() {
        assert_eq!(
            ordering_values(&["createdDateTime"]),
            vec!["createdDateTime asc", "createdDateTime desc"]
        );
    }
}
