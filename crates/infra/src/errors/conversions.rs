//! Conversions from external infrastructure errors into domain errors.

use agenda_domain::AgendaError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub AgendaError);

impl From<InfraError> for AgendaError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<AgendaError> for InfraError {
    fn from(value: AgendaError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoAgendaError {
    fn into_agenda(self) -> AgendaError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → AgendaError */
/* -------------------------------------------------------------------------- */

impl IntoAgendaError for HttpError {
    fn into_agenda(self) -> AgendaError {
        if self.is_timeout() {
            return AgendaError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return AgendaError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                404 => AgendaError::NotFound(message),
                _ => AgendaError::Api { status: code, message },
            };
        }

        if self.is_decode() {
            return AgendaError::Internal(format!("invalid response body: {self}"));
        }

        AgendaError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_agenda())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
