//! The health check endpoint.

use axum::Json;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The body returned by the health check.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Report that the server is up along with the current time.
pub async fn get_health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_owned(),
        timestamp: OffsetDateTime::now_utc(),
    })
}

#[cfg(test)]
mod health_tests {
    use time::OffsetDateTime;

    use crate::{
        endpoints,
        test_utils::{get_test_app_state, get_test_server},
    };

    use super::HealthStatus;

    #[tokio::test]
    async fn health_check_returns_ok_and_timestamp() {
        let server = get_test_server(get_test_app_state());
        let before = OffsetDateTime::now_utc();

        let response = server.get(endpoints::HEALTH).await;

        response.assert_status_ok();
        let health = response.json::<HealthStatus>();
        assert_eq!(health.status, "ok");
        assert!(health.timestamp >= before.replace_nanosecond(0).unwrap());
    }
}
