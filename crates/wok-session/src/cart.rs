//! Cart state and order-payload assembly.

use std::fmt;

use serde::{Deserialize, Serialize};
use wok_schemas::{CreateOrderRequest, OrderComboLine, OrderProductLine};

use crate::session::{DeliveryAddress, DeliveryType, Session, StoreSelection};

/// Flat delivery fee in cents (S/ 5.00). Pickup is free.
pub const DELIVERY_FEE_CENTS: i64 = 500;

/// What kind of catalog entry a cart line came from. Combos are ordered by
/// id; products and offers are ordered by display name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Product,
    Combo,
    Offer,
}

/// One cart line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product name or combo id, depending on `kind`.
    pub id: String,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: u32,
    pub kind: ItemKind,
}

impl CartItem {
    pub fn subtotal_cents(&self) -> i64 {
        self.unit_price_cents * i64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    Empty,
}

impl fmt::Display for CartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartError::Empty => write!(f, "the cart is empty"),
        }
    }
}

impl std::error::Error for CartError {}

/// The shopping cart. Lines merge by `(id, kind)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a line; an existing `(id, kind)` line absorbs the quantity.
    pub fn add(&mut self, item: CartItem) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|line| line.id == item.id && line.kind == item.kind)
        {
            existing.quantity += item.quantity;
        } else {
            self.items.push(item);
        }
    }

    /// Set a line's quantity; zero removes the line. No-op for unknown ids.
    pub fn set_quantity(&mut self, id: &str, kind: ItemKind, quantity: u32) {
        if quantity == 0 {
            self.remove(id, kind);
            return;
        }
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.id == id && line.kind == kind)
        {
            line.quantity = quantity;
        }
    }

    pub fn remove(&mut self, id: &str, kind: ItemKind) {
        self.items
            .retain(|line| !(line.id == id && line.kind == kind));
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn subtotal_cents(&self) -> i64 {
        self.items.iter().map(CartItem::subtotal_cents).sum()
    }

    pub fn delivery_fee_cents(delivery: DeliveryType) -> i64 {
        match delivery {
            DeliveryType::Delivery => DELIVERY_FEE_CENTS,
            DeliveryType::Pickup => 0,
        }
    }

    pub fn total_cents(&self, delivery: DeliveryType) -> i64 {
        self.subtotal_cents() + Self::delivery_fee_cents(delivery)
    }
}

/// Assemble the `POST /pedidos` body from the cart.
///
/// Combos go out as `{combo_id, cantidad}`, products and offers as
/// `{nombre, cantidad}`. The total is converted from cents to the backend's
/// decimal number here, and nowhere else.
pub fn build_order_request(
    cart: &Cart,
    session: &Session,
    store: &StoreSelection,
    delivery: DeliveryType,
    address: Option<&DeliveryAddress>,
) -> Result<CreateOrderRequest, CartError> {
    if cart.is_empty() {
        return Err(CartError::Empty);
    }

    let mut products = Vec::new();
    let mut combos = Vec::new();
    for line in cart.items() {
        match line.kind {
            ItemKind::Combo => combos.push(OrderComboLine {
                combo_id: line.id.clone(),
                quantity: line.quantity,
            }),
            ItemKind::Product | ItemKind::Offer => products.push(OrderProductLine {
                name: line.name.clone(),
                quantity: line.quantity,
            }),
        }
    }

    let address = address
        .map(DeliveryAddress::formatted)
        .unwrap_or_else(|| "Dirección no especificada".to_string());

    Ok(CreateOrderRequest {
        store_id: store.store_id.clone(),
        user_email: session.user_email.clone(),
        total: cents_to_soles(cart.total_cents(delivery)),
        address,
        products,
        combos,
    })
}

/// Integer cents → decimal soles for the wire.
pub fn cents_to_soles(cents: i64) -> f64 {
    cents as f64 / 100.0
}
