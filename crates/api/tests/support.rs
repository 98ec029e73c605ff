use std::sync::Arc;

use agenda_common::time::MockClock;
use agenda_domain::Config;
use agenda_infra::api::{ApiClient, ApiClientConfig, Credentials, SchedulesApi};
use agenda_lib::AppContext;
use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Context wired to `server` with the clock frozen at 2025-03-01 12:00 UTC
pub fn context(server: &MockServer) -> AppContext {
    let config = Config::default();
    let api = ApiClientConfig { base_url: server.uri(), ..ApiClientConfig::from(&config.api) };
    let client = ApiClient::new(api, Arc::new(Credentials::bearer("test-token")))
        .expect("client should build");
    let clock = MockClock::at(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap());

    AppContext::with_gateway(
        config,
        Arc::new(SchedulesApi::new(Arc::new(client))),
        Arc::new(clock),
        Tz::America__Sao_Paulo,
    )
}

pub fn schedule_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "message": format!("Message {id}"),
        "scheduledAt": "2025-03-10T17:30:00.000Z",
        "status": status,
        "type": "recurring",
        "frequency": "weekly",
        "contacts": [
            {"id": format!("{id}-c0"), "name": "Ana", "phone": "+5511999990000", "scheduleId": id}
        ],
        "createdAt": "2025-03-01T12:00:00.000Z",
        "updatedAt": "2025-03-01T12:00:00.000Z"
    })
}

pub fn page_json(items: Vec<Value>, total: u64, total_pages: u32) -> Value {
    json!({
        "data": items,
        "pagination": {"page": 1, "limit": 10, "total": total, "totalPages": total_pages}
    })
}

pub fn output(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).expect("output is UTF-8")
}
