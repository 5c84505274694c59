//! Session, store selection and delivery data.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The signed-in user. The auth token is redacted from `Debug` output so it
/// cannot leak through logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_email: String,
    pub display_name: String,
    pub auth_token: Option<String>,
}

impl Session {
    pub fn new(user_email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_email: user_email.into(),
            display_name: display_name.into(),
            auth_token: None,
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_email", &self.user_email)
            .field("display_name", &self.display_name)
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "REDACTED"),
            )
            .finish()
    }
}

/// The store the user is ordering from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSelection {
    pub store_id: String,
    /// Display label (the backend uses the store address as its name).
    pub name: String,
}

impl StoreSelection {
    pub fn new(store_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            name: name.into(),
        }
    }
}

/// How the order reaches the customer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    Delivery,
    Pickup,
}

/// Structured delivery address, flattened to one line for the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub street: String,
    pub district: String,
    pub city: String,
    pub reference: Option<String>,
}

impl DeliveryAddress {
    /// `"street, district, city (Ref: reference)"`; the backend stores the
    /// address as a single string.
    pub fn formatted(&self) -> String {
        let mut line = format!("{}, {}, {}", self.street, self.district, self.city);
        if let Some(reference) = &self.reference {
            line.push_str(&format!(" (Ref: {reference})"));
        }
        line
    }
}
