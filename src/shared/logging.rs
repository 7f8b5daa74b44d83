//! Structured logging module for the MileStack client
//!
//! Provides consistent, contextual logging across the application.
//! Every event carries an `operation` field so optimistic mutations,
//! rollbacks and scoped loads can be followed in one stream.

/// Operations that emit log events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOperation {
    ScopedLoad,
    OptimisticUpdate,
    OptimisticDelete,
    Create,
    Reclassify,
    Session,
    ChatPersistence,
    Http,
}

impl LogOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOperation::ScopedLoad => "scoped_load",
            LogOperation::OptimisticUpdate => "optimistic_update",
            LogOperation::OptimisticDelete => "optimistic_delete",
            LogOperation::Create => "create",
            LogOperation::Reclassify => "reclassify",
            LogOperation::Session => "session",
            LogOperation::ChatPersistence => "chat_persistence",
            LogOperation::Http => "http",
        }
    }
}

/// Install the native subscriber. `RUST_LOG` overrides the `info` default.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

/// Log the start of a project-scoped load
pub fn log_load_start(parent_id: &str, generation: u64) {
    tracing::debug!(
        operation = LogOperation::ScopedLoad.as_str(),
        parent_id = parent_id,
        generation = generation,
        "Loading project-scoped collections"
    );
}

/// Log a load whose result was discarded
pub fn log_load_discarded(parent_id: &str, generation: u64, reason: &str) {
    tracing::debug!(
        operation = LogOperation::ScopedLoad.as_str(),
        parent_id = parent_id,
        generation = generation,
        reason = reason,
        "Discarded stale load result"
    );
}

/// Log a single collection fetch failure inside a scoped load
pub fn log_load_error(parent_id: &str, collection: &str, error: &str) {
    tracing::warn!(
        operation = LogOperation::ScopedLoad.as_str(),
        parent_id = parent_id,
        collection = collection,
        error = error,
        "Failed to load collection"
    );
}

/// Log a rollback after a rejected remote call
pub fn log_rollback(operation: LogOperation, entity_id: &str, error: &str) {
    tracing::warn!(
        operation = operation.as_str(),
        entity_id = entity_id,
        error = error,
        "Remote call failed, local state rolled back"
    );
}

/// Log a successful reconciliation with the server entity
pub fn log_reconciled(operation: LogOperation, entity_id: &str) {
    tracing::debug!(
        operation = operation.as_str(),
        entity_id = entity_id,
        "Reconciled with server entity"
    );
}

/// Log a mutation that targeted an id absent from the collection
pub fn log_missing_entity(operation: LogOperation, entity_id: &str) {
    tracing::warn!(
        operation = operation.as_str(),
        entity_id = entity_id,
        "Entity not present in local collection"
    );
}

/// Log a drop that was ignored before any state change
pub fn log_drop_ignored(reason: &str) {
    tracing::debug!(
        operation = LogOperation::Reclassify.as_str(),
        reason = reason,
        "Ignored drop"
    );
}

/// Log a failed creation
pub fn log_create_error(error: &str) {
    tracing::warn!(
        operation = LogOperation::Create.as_str(),
        error = error,
        "Create rejected by server"
    );
}

/// Log credential changes (never the token itself)
pub fn log_session_event(event: &str) {
    tracing::info!(operation = LogOperation::Session.as_str(), event = event, "Session changed");
}

/// Log chat storage problems; these never reach the user
pub fn log_chat_storage_error(action: &str, error: &str) {
    tracing::error!(
        operation = LogOperation::ChatPersistence.as_str(),
        action = action,
        error = error,
        "Chat thread storage failed"
    );
}

/// Log an outgoing request
pub fn log_request(method: &str, url: &str) {
    tracing::trace!(operation = LogOperation::Http.as_str(), method = method, url = url, "HTTP request");
}

/// Log a non-success response
pub fn log_response_error(method: &str, url: &str, status: u16, message: &str) {
    tracing::warn!(
        operation = LogOperation::Http.as_str(),
        method = method,
        url = url,
        status = status,
        message = message,
        "HTTP request failed"
    );
}
