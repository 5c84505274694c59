//! wok-session
//!
//! Client-side session state: who is ordering, from which store, and what is
//! in the cart, plus the assembly of a cart into an order request.
//!
//! Everything here is a plain owned struct passed explicitly into whatever
//! needs it. There is no ambient provider, no global lookup; an embedder
//! holds one `Session`/`Cart` per signed-in user and threads them through.
//!
//! Money is integer cents throughout this crate (`S/ 5.00` → `500`). The
//! single conversion to the backend's decimal number happens when the order
//! payload is built.

mod cart;
mod session;

pub use cart::{build_order_request, Cart, CartError, CartItem, ItemKind, DELIVERY_FEE_CENTS};
pub use session::{DeliveryAddress, DeliveryType, Session, StoreSelection};
