//! Subcommand implementations and shared helpers.

pub mod confirm;
pub mod order;
pub mod review;
pub mod track;

mod render;

use anyhow::{bail, Context, Result};
use wok_api::{Endpoints, OrdersClient, ReviewsClient};

pub(crate) const ENV_USER_EMAIL: &str = "WOK_USER_EMAIL";
pub(crate) const ENV_AUTH_TOKEN: &str = "WOK_AUTH_TOKEN";

/// `--email` flag, falling back to `WOK_USER_EMAIL`.
pub(crate) fn resolve_email(flag: Option<String>) -> Result<String> {
    if let Some(email) = flag {
        return Ok(email);
    }
    match std::env::var(ENV_USER_EMAIL) {
        Ok(email) if !email.trim().is_empty() => Ok(email),
        _ => bail!("no customer email: pass --email or set {ENV_USER_EMAIL}"),
    }
}

pub(crate) fn load_endpoints() -> Result<Endpoints> {
    Endpoints::from_env().context("endpoint configuration")
}

pub(crate) fn orders_client(endpoints: &Endpoints) -> OrdersClient {
    let client = OrdersClient::new(endpoints.orders_base.clone());
    match std::env::var(ENV_AUTH_TOKEN) {
        Ok(token) if !token.is_empty() => client.with_auth_token(token),
        _ => client,
    }
}

pub(crate) fn reviews_client(endpoints: &Endpoints) -> ReviewsClient {
    let client = ReviewsClient::new(endpoints.employees_base.clone());
    match std::env::var(ENV_AUTH_TOKEN) {
        Ok(token) if !token.is_empty() => client.with_auth_token(token),
        _ => client,
    }
}
