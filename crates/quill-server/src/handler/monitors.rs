//! Health check handler.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use quill_postgres::PgClient;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::MonitorStatus;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "quill_server::handler::monitors";

/// Reports whether the database answers.
#[tracing::instrument(skip_all)]
async fn health_status(
    State(pg_client): State<PgClient>,
) -> Result<(StatusCode, Json<MonitorStatus>)> {
    tracing::debug!(target: TRACING_TARGET, "Health status check requested");

    let is_healthy = match pg_client.ping().await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %err,
                pool = ?pg_client.pool_status(),
                "Database health check failed"
            );
            false
        }
    };

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(
        target: TRACING_TARGET,
        is_healthy,
        status_code = status_code.as_u16(),
        "Health status response prepared"
    );

    Ok((status_code, Json(MonitorStatus::new(is_healthy))))
}

fn health_status_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get system health status")
        .description("Checks that the database answers. Does not require a session.")
        .response_with::<200, Json<MonitorStatus>, _>(|res| res.description("System is healthy"))
        .response_with::<503, Json<MonitorStatus>, _>(|res| {
            res.description("System is unhealthy")
        })
}

/// Returns a [`Router`] with all health monitoring routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/health", get_with(health_status, health_status_docs))
        .with_path_items(|item| item.tag("Health"))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn unreachable_database_is_unhealthy() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/health").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

        let body: serde_json::Value = response.json();
        assert_eq!(body["isHealthy"], serde_json::json!(false));
        assert!(body["updatedAt"].is_string());

        Ok(())
    }
}
