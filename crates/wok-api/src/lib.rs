//! wok-api
//!
//! REST boundary clients for the storefront's backend services: the orders
//! service (detail fetch, creation, listing, confirm-delivery) and the
//! employees service (review CRUD).
//!
//! Response bodies arrive in several shapes: bare values, arrays,
//! `{data: …}` / `{resena: …}` wrappers. They are normalized exactly once,
//! at this boundary (`normalize`); nothing deeper in the call chain ever
//! branches on shape.
//!
//! The tracker consumes the orders service through the [`OrderGateway`]
//! trait so its tests can substitute an in-process implementation.

pub mod endpoints;
pub mod error;
mod normalize;
pub mod orders;
pub mod reviews;

pub use endpoints::Endpoints;
pub use error::ApiError;
pub use orders::{OrderGateway, OrdersClient};
pub use reviews::{CachedStoreReviews, ReviewsClient};
