//! Application context - dependency injection container

use std::sync::Arc;

use agenda_common::time::{Clock, SystemClock};
use agenda_core::{ScheduleGateway, ScheduleService};
use agenda_domain::{AgendaError, Config, Result};
use agenda_infra::api::{ApiClient, ApiClientConfig, Credentials, SchedulesApi};
use chrono_tz::Tz;
use tracing::info;

use crate::adapters::NotificationFeed;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub service: Arc<ScheduleService>,
    pub notifications: Arc<NotificationFeed>,
    pub clock: Arc<dyn Clock>,
    pub tz: Tz,
}

impl AppContext {
    /// Wire the HTTP gateway described by `config`
    ///
    /// # Errors
    /// Returns `AgendaError::Config` if the API client cannot be built.
    pub fn new(config: Config, tz: Tz) -> Result<Self> {
        let credentials = Credentials::from_token(config.auth.token.clone());
        let client = ApiClient::new(ApiClientConfig::from(&config.api), Arc::new(credentials))
            .map_err(AgendaError::from)?;
        info!(
            base_url = client.base_url(),
            authenticated = config.auth.token.is_some(),
            time_zone = %tz,
            "API client ready"
        );

        let gateway = Arc::new(SchedulesApi::new(Arc::new(client)));
        Ok(Self::with_gateway(config, gateway, Arc::new(SystemClock), tz))
    }

    /// Wire an arbitrary gateway and clock
    pub fn with_gateway(
        config: Config,
        gateway: Arc<dyn ScheduleGateway>,
        clock: Arc<dyn Clock>,
        tz: Tz,
    ) -> Self {
        let notifications = Arc::new(NotificationFeed::new());
        let service = Arc::new(ScheduleService::new(gateway, notifications.clone(), &config.cache));
        Self { config, service, notifications, clock, tz }
    }
}

/// Pick the display time zone: explicit name, then `$TZ`, then UTC
///
/// # Errors
/// Returns `AgendaError::Config` if an explicit name is not an IANA zone.
pub fn resolve_time_zone(explicit: Option<&str>) -> Result<Tz> {
    if let Some(name) = explicit.map(str::trim).filter(|name| !name.is_empty()) {
        return name
            .parse::<Tz>()
            .map_err(|_| AgendaError::Config(format!("Unknown time zone: {name}")));
    }
    Ok(std::env::var("TZ")
        .ok()
        .and_then(|name| name.trim().trim_start_matches(':').parse::<Tz>().ok())
        .unwrap_or(Tz::UTC))
}
