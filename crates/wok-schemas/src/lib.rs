//! wok-schemas
//!
//! Wire types shared across the client core: the notification-stream
//! envelope, the REST DTOs for orders and reviews, and the canonical
//! order-status vocabulary.
//!
//! This crate owns serialization shapes only. No I/O, no state folding;
//! those live in `wok-channel` / `wok-api` / `wok-timeline`.
//!
//! Field names on the wire are the backend's Spanish identifiers
//! (`pedido_id`, `historial_estados`, ...); Rust-side names are English.
//! Every type here round-trips through serde against the shapes the
//! backend actually emits.

pub mod notify;
pub mod orders;
pub mod reviews;
pub mod status;

pub use notify::{
    EmployeeInfo, EmployeeRole, Notification, NotificationData, NotificationKind, RequiredAction,
};
pub use orders::{
    CreateOrderRequest, OrderAck, OrderComboLine, OrderDetails, OrderProductLine, OrderSummary,
    Page, Pagination, StatusHistoryEntry,
};
pub use reviews::{CreateReviewRequest, Review, UpdateReviewRequest};
pub use status::OrderStatus;
