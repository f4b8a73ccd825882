//! Order analytics core: monthly order counts per lifecycle status.
//!
//! The functions here are pure: they read a slice of order-like records, a
//! reference instant and a scope, and return fully materialized aggregate
//! rows. No storage, no caching, no mutation of the input. They are safe to
//! call from any thread as long as the caller treats the input as an
//! immutable snapshot.

use chrono::{DateTime, Utc};
use log::warn;
use std::collections::HashMap;

use super::calendar::CalendarService;
use super::models::order::{Order, OrderItem, OrderStatus};

/// Decouples the analytics from any concrete order representation. The
/// aggregators only ever see the fields listed here.
pub trait OrderLike {
    /// The single date used for month-bucketing.
    fn order_date(&self) -> DateTime<Utc>;
    fn order_status(&self) -> OrderStatus;
    fn owner_id(&self) -> &str;
    /// Order types without a car reference never match car scopes.
    fn car_id(&self) -> Option<&str> {
        None
    }
}

/// Order types that expose priced line items, as required for revenue
/// aggregation.
pub trait ItemizedOrderLike: OrderLike {
    fn line_items(&self) -> &[OrderItem];
}

// Adapter: the domain order model is directly usable by the analytics core.
impl OrderLike for Order {
    fn order_date(&self) -> DateTime<Utc> {
        self.date
    }

    fn order_status(&self) -> OrderStatus {
        self.status
    }

    fn owner_id(&self) -> &str {
        &self.owner_id
    }

    fn car_id(&self) -> Option<&str> {
        Some(&self.car_id)
    }
}

impl ItemizedOrderLike for Order {
    fn line_items(&self) -> &[OrderItem] {
        &self.items
    }
}

/// Scope selector narrowing analytics to all orders, one owner's orders,
/// one car's orders, or their conjunction.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderScope {
    All,
    OwnerOnly(String),
    CarOnly(String),
    OwnerAndCar { owner_id: String, car_id: String },
}

impl OrderScope {
    /// Whether the order falls inside this scope. A car scope applied to an
    /// order type without a car field silently never matches.
    pub fn matches<T: OrderLike>(&self, order: &T) -> bool {
        match self {
            OrderScope::All => true,
            OrderScope::OwnerOnly(owner_id) => order.owner_id() == owner_id,
            OrderScope::CarOnly(car_id) => order.car_id() == Some(car_id.as_str()),
            OrderScope::OwnerAndCar { owner_id, car_id } => {
                order.owner_id() == owner_id && order.car_id() == Some(car_id.as_str())
            }
        }
    }

    /// The scope as a plain predicate, for callers that filter themselves.
    pub fn to_predicate<T: OrderLike>(&self) -> impl Fn(&T) -> bool + '_ {
        move |order| self.matches(order)
    }
}

/// Order count for one lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: usize,
}

/// Count orders per status for the calendar month containing `month_of`,
/// restricted to `scope`.
///
/// Returns exactly one row per status in declaration order, zero-filled, so
/// chart legends stay stable no matter what the data looks like. The only
/// exception is an unresolvable month interval, which yields an empty list.
pub fn counts_by_status<T: OrderLike>(
    orders: &[T],
    month_of: DateTime<Utc>,
    scope: &OrderScope,
    calendar: &CalendarService,
) -> Vec<StatusCount> {
    let Some(interval) = calendar.month_interval_for(month_of) else {
        warn!(
            "📊 ANALYTICS: no month interval for reference date {}, returning empty status breakdown",
            month_of
        );
        return Vec::new();
    };

    let matches = scope.to_predicate::<T>();
    let mut counts: HashMap<OrderStatus, usize> = HashMap::with_capacity(OrderStatus::ALL.len());

    for order in orders
        .iter()
        .filter(|o| interval.contains(o.order_date()) && matches(o))
    {
        *counts.entry(order.order_status()).or_insert(0) += 1;
    }

    OrderStatus::ALL
        .iter()
        .map(|status| StatusCount {
            status: *status,
            count: counts.get(status).copied().unwrap_or(0),
        })
        .collect()
}
