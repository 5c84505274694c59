//! Service endpoint configuration.
//!
//! Three base URLs, environment-provided, validated once at load. The
//! notification base may use `ws://`/`wss://`; the REST bases are `http(s)`.

use std::time::Duration;

use reqwest::Url;

use crate::error::ApiError;

pub const ENV_ORDERS_URL: &str = "WOK_ORDERS_URL";
pub const ENV_EMPLOYEES_URL: &str = "WOK_EMPLOYEES_URL";
pub const ENV_NOTIFY_URL: &str = "WOK_NOTIFY_URL";

/// Per-request timeout used by both REST clients.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the backend services live.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Orders service (order CRUD + confirm-delivery).
    pub orders_base: Url,
    /// Employees service (reviews).
    pub employees_base: Url,
    /// Notification-stream WebSocket base.
    pub notify_base: Url,
}

impl Endpoints {
    pub fn new(orders: &str, employees: &str, notify: &str) -> Result<Self, ApiError> {
        Ok(Self {
            orders_base: parse_base(orders, "orders base url")?,
            employees_base: parse_base(employees, "employees base url")?,
            notify_base: parse_base(notify, "notify base url")?,
        })
    }

    /// Read `WOK_ORDERS_URL`, `WOK_EMPLOYEES_URL` and `WOK_NOTIFY_URL`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(
            &env_var(ENV_ORDERS_URL)?,
            &env_var(ENV_EMPLOYEES_URL)?,
            &env_var(ENV_NOTIFY_URL)?,
        )
    }
}

fn env_var(name: &str) -> Result<String, ApiError> {
    std::env::var(name).map_err(|_| ApiError::Config(format!("{name} is not set")))
}

fn parse_base(raw: &str, what: &str) -> Result<Url, ApiError> {
    Url::parse(raw.trim()).map_err(|e| ApiError::Config(format!("invalid {what} '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_three_bases() {
        let eps = Endpoints::new(
            "https://api.chinawok.local",
            "https://empleados.chinawok.local",
            "wss://notificaciones.chinawok.local/ws",
        )
        .unwrap();
        assert_eq!(eps.orders_base.scheme(), "https");
        assert_eq!(eps.notify_base.scheme(), "wss");
    }

    #[test]
    fn invalid_base_is_a_config_error() {
        let err = Endpoints::new("no scheme", "https://e", "wss://n").unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
        assert!(err.to_string().contains("orders base url"));
    }

    #[test]
    fn from_env_reads_the_three_variables() {
        std::env::set_var(ENV_ORDERS_URL, "https://api.chinawok.local");
        std::env::set_var(ENV_EMPLOYEES_URL, "https://empleados.chinawok.local");
        std::env::set_var(ENV_NOTIFY_URL, "wss://notificaciones.chinawok.local/ws");

        let eps = Endpoints::from_env().unwrap();
        assert_eq!(eps.employees_base.host_str(), Some("empleados.chinawok.local"));

        std::env::remove_var(ENV_ORDERS_URL);
        std::env::remove_var(ENV_EMPLOYEES_URL);
        std::env::remove_var(ENV_NOTIFY_URL);
    }
}
