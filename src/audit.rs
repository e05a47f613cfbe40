use serde_json::Value;
use uuid::Uuid;

/// Emits an audit event on the `audit` target. Audit output never affects
/// the outcome of the request that produced it.
pub fn record(user_id: Option<Uuid>, action: &str, resource: Option<&str>, metadata: Option<Value>) {
    let metadata = metadata.map(|m| m.to_string()).unwrap_or_default();
    match user_id {
        Some(user_id) => tracing::info!(
            target: "audit",
            %user_id,
            action,
            resource = resource.unwrap_or("-"),
            %metadata,
            "audit"
        ),
        None => tracing::info!(
            target: "audit",
            action,
            resource = resource.unwrap_or("-"),
            %metadata,
            "audit"
        ),
    }
}
