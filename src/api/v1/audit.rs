//! Audit event query handler

use axum::extract::{Query, State};

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, AuditEventResponse, AuditEventsQuery, AuditEventsResponse, Json,
};
use crate::domain::audit::AuditEventRepository;

/// GET /v1/audit/events
pub async fn list_audit_events(
    State(state): State<AppState>,
    Query(query): Query<AuditEventsQuery>,
) -> Result<Json<AuditEventsResponse>, ApiError> {
    let events = match query.process_instance_id.as_deref() {
        Some(id) => state.audit_events.find_by_process_instance(id).await?,
        None => state.audit_events.list().await?,
    };

    Ok(Json(AuditEventsResponse::new(
        events.iter().map(AuditEventResponse::from_domain).collect(),
    )))
}
