//! `wok confirm`: confirm receipt of a delivered order.

use anyhow::{Context, Result};
use wok_api::OrderGateway;

pub async fn run(store: String, order: String, email: Option<String>) -> Result<()> {
    let endpoints = super::load_endpoints()?;
    let email = super::resolve_email(email)?;
    let client = super::orders_client(&endpoints);

    client
        .confirm_delivery(&order, &email, &store)
        .await
        .context("the backend rejected the confirmation")?;

    println!("Recepción confirmada. El estado final llegará por el canal de notificaciones.");
    Ok(())
}
