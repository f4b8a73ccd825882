//! # Domain Module
//!
//! Contains all business logic for the car detailing tracker.
//!
//! This module encapsulates the core entities, aggregation rules, and
//! services that define how detailing orders are modeled, counted, and
//! priced. It operates independently of any specific UI framework or
//! storage mechanism.
//!
//! ## Module Organization
//!
//! - **models**: Order, car, and customer entities plus the service catalog
//! - **order_service**: Order CRUD operations and demo-data seeding
//! - **order_store**: Async order snapshot with cancellable reloads
//! - **order_analytics**: Pure per-status monthly counting core
//! - **service_analytics**: Pure per-service monthly revenue core
//! - **analytics_service**: Orchestration tying storage, calendar, and the
//!   aggregation cores together
//! - **calendar**: Month interval math and analytics focus navigation
//! - **commands**: Internal command/query/result types for the services
//!
//! ## Key Rules
//!
//! - A month is the half-open interval `[start of month, start of next month)`
//! - Status breakdowns always carry one row per status, zero-filled, in
//!   declaration order
//! - Revenue breakdowns omit services that never occur and sort by revenue
//!   descending, ties broken by catalog order
//! - A stored order total is historical truth; it is cross-checked but never
//!   silently rewritten

pub mod analytics_service;
pub mod calendar;
pub mod commands;
pub mod models;
pub mod order_analytics;
pub mod order_service;
pub mod order_store;
pub mod service_analytics;

pub use analytics_service::*;
pub use calendar::*;
pub use order_analytics::*;
pub use order_service::*;
pub use order_store::*;
pub use service_analytics::*;
