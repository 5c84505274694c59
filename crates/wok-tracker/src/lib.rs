//! wok-tracker
//!
//! One live order, end to end: owns the notification channel, folds every
//! event through the timeline reducer, and publishes an observable
//! [`TrackerSnapshot`] (order view + phase + connection status) over a
//! `watch` channel.
//!
//! All folding happens on one task, so the view never sees concurrent
//! mutation; consumers read snapshots, they never touch the state. The
//! `confirm()` call runs on the caller's task and cannot delay event
//! delivery; a completion event may legitimately arrive before the confirm
//! call's own response, and either order works.

mod tracker;

pub use tracker::{OrderTracker, TrackerConfig, TrackerSnapshot};
