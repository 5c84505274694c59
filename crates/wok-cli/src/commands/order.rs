//! `wok order`: place and list orders.

use anyhow::{anyhow, bail, Context, Result};
use clap::Subcommand;
use wok_session::{
    build_order_request, Cart, CartItem, DeliveryAddress, DeliveryType, ItemKind, Session,
    StoreSelection,
};

use super::render;

#[derive(Subcommand)]
pub enum OrderCmd {
    /// Create an order from product/combo lines
    Create {
        #[arg(long)]
        store: String,

        #[arg(long)]
        email: Option<String>,

        /// Product line as "name:qty:unit_price", e.g. "Arroz Chaufa:2:18.90"
        #[arg(long = "product")]
        products: Vec<String>,

        /// Combo line as "combo_id:qty:unit_price"
        #[arg(long = "combo")]
        combos: Vec<String>,

        /// Pick up at the store instead of delivery
        #[arg(long, default_value_t = false)]
        pickup: bool,

        /// Delivery street ("Av. Brasil 123")
        #[arg(long)]
        street: Option<String>,

        #[arg(long)]
        district: Option<String>,

        #[arg(long, default_value = "Lima")]
        city: String,

        /// Free-form address reference
        #[arg(long)]
        reference: Option<String>,
    },

    /// List your orders
    List {
        #[arg(long)]
        email: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
}

pub async fn run(cmd: OrderCmd) -> Result<()> {
    match cmd {
        OrderCmd::Create {
            store,
            email,
            products,
            combos,
            pickup,
            street,
            district,
            city,
            reference,
        } => {
            create(
                store, email, products, combos, pickup, street, district, city, reference,
            )
            .await
        }
        OrderCmd::List { email, page, limit } => list(email, page, limit).await,
    }
}

#[allow(clippy::too_many_arguments)]
async fn create(
    store: String,
    email: Option<String>,
    products: Vec<String>,
    combos: Vec<String>,
    pickup: bool,
    street: Option<String>,
    district: Option<String>,
    city: String,
    reference: Option<String>,
) -> Result<()> {
    let endpoints = super::load_endpoints()?;
    let email = super::resolve_email(email)?;
    let session = Session::new(email, "");
    let selection = StoreSelection::new(store, "");

    let mut cart = Cart::new();
    for line in &products {
        cart.add(parse_line(line, ItemKind::Product)?);
    }
    for line in &combos {
        cart.add(parse_line(line, ItemKind::Combo)?);
    }

    let delivery = if pickup {
        DeliveryType::Pickup
    } else {
        DeliveryType::Delivery
    };

    let address = match (street, district) {
        (Some(street), Some(district)) => Some(DeliveryAddress {
            street,
            district,
            city,
            reference,
        }),
        (None, None) if pickup => None,
        _ => bail!("delivery orders need both --street and --district"),
    };

    let request = build_order_request(&cart, &session, &selection, delivery, address.as_ref())
        .context("could not assemble the order")?;

    let ack = super::orders_client(&endpoints)
        .create_order(&request)
        .await
        .context("order creation failed")?;

    println!(
        "Pedido {} creado en {}: {} {} - S/ {:.2}",
        render::short_id(&ack.order_id),
        ack.store_id,
        ack.status.icon(),
        ack.status.label(),
        ack.total,
    );
    println!("Síguelo con: wok track --store {} --order {}", ack.store_id, ack.order_id);
    Ok(())
}

async fn list(email: Option<String>, page: u32, limit: u32) -> Result<()> {
    let endpoints = super::load_endpoints()?;
    let email = super::resolve_email(email)?;

    let orders = super::orders_client(&endpoints)
        .list_orders(&email, page, limit)
        .await
        .context("could not list orders")?;

    if orders.data.is_empty() {
        println!("Sin pedidos.");
        return Ok(());
    }

    for order in &orders.data {
        let date = order
            .date
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}  {}  {} {}  S/ {:.2}  {}",
            render::short_id(&order.order_id),
            order.store_id,
            order.status.icon(),
            order.status.label(),
            order.total,
            date,
        );
    }
    println!(
        "página {}/{} ({} pedidos)",
        orders.pagination.page, orders.pagination.total_pages, orders.pagination.total,
    );
    Ok(())
}

/// Parse `"name:qty:unit_price"` into a cart line. The price is decimal
/// soles, converted to integer cents without going through floats.
fn parse_line(raw: &str, kind: ItemKind) -> Result<CartItem> {
    let mut parts = raw.rsplitn(3, ':');
    let price = parts.next();
    let quantity = parts.next();
    let name = parts.next();

    let (Some(name), Some(quantity), Some(price)) = (name, quantity, price) else {
        bail!("bad line '{raw}': expected \"name:qty:unit_price\"");
    };

    let quantity: u32 = quantity
        .trim()
        .parse()
        .with_context(|| format!("bad quantity in '{raw}'"))?;
    if quantity == 0 {
        bail!("quantity must be at least 1 in '{raw}'");
    }

    Ok(CartItem {
        id: name.trim().to_string(),
        name: name.trim().to_string(),
        unit_price_cents: parse_soles_to_cents(price.trim())
            .with_context(|| format!("bad price in '{raw}'"))?,
        quantity,
        kind,
    })
}

/// `"18.90"` → `1890`. At most two decimal places.
fn parse_soles_to_cents(raw: &str) -> Result<i64> {
    let (whole, frac) = match raw.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (raw, ""),
    };
    if frac.len() > 2 {
        return Err(anyhow!("more than two decimal places: '{raw}'"));
    }

    let whole: i64 = whole.parse().map_err(|_| anyhow!("bad amount: '{raw}'"))?;
    if whole < 0 {
        return Err(anyhow!("negative amount: '{raw}'"));
    }
    let frac: i64 = match frac {
        "" => 0,
        f if f.len() == 1 => 10 * f.parse::<i64>().map_err(|_| anyhow!("bad amount: '{raw}'"))?,
        f => f.parse().map_err(|_| anyhow!("bad amount: '{raw}'"))?,
    };

    Ok(whole * 100 + frac)
}
