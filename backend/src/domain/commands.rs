//! Domain-level command and query types.
//!
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The facade layer is responsible for mapping
//! the public DTOs defined in the `shared` crate to these internal types.

pub mod orders {
    use crate::domain::models::order::{Order, OrderItem, OrderStatus};
    use chrono::{DateTime, Utc};

    /// Input for creating a new order.
    #[derive(Debug, Clone)]
    pub struct CreateOrderCommand {
        pub owner_id: String,
        pub car_id: String,
        /// Order timestamp; current time when not provided.
        pub date: Option<DateTime<Utc>>,
        pub items: Vec<OrderItem>,
        /// Fixed total; derived from the items when not provided.
        pub total_price: Option<f64>,
        pub notes: Option<String>,
        /// Initial lifecycle status; `Scheduled` when not provided.
        pub status: Option<OrderStatus>,
    }

    /// Query parameters for listing orders.
    #[derive(Debug, Clone, Default)]
    pub struct OrderListQuery {
        pub owner_id: Option<String>,
        pub car_id: Option<String>,
    }

    /// Result of listing orders.
    #[derive(Debug, Clone)]
    pub struct OrderListResult {
        pub orders: Vec<Order>,
    }
}

pub mod analytics {
    use crate::domain::order_analytics::{OrderScope, StatusCount};
    use crate::domain::service_analytics::ServiceRevenueSlice;

    /// Query for the monthly per-status order counts.
    #[derive(Debug, Clone)]
    pub struct StatusBreakdownQuery {
        pub month: u32,
        pub year: i32,
        pub scope: OrderScope,
    }

    /// Query for the monthly per-service revenue totals.
    #[derive(Debug, Clone)]
    pub struct RevenueBreakdownQuery {
        pub month: u32,
        pub year: i32,
        pub scope: OrderScope,
    }

    /// Result of the status breakdown query.
    #[derive(Debug, Clone)]
    pub struct StatusBreakdownResult {
        pub month: u32,
        pub year: i32,
        pub counts: Vec<StatusCount>,
    }

    /// Result of the revenue breakdown query.
    #[derive(Debug, Clone)]
    pub struct RevenueBreakdownResult {
        pub month: u32,
        pub year: i32,
        pub slices: Vec<ServiceRevenueSlice>,
    }
}
