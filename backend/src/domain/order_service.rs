//! Order management service.
//!
//! CRUD-style operations over the order storage abstraction. Totals are
//! fixed at creation time: once stored, `total_price` is historical truth
//! and is never recomputed behind the caller's back.

use anyhow::Result;
use chrono::Utc;
use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::commands::orders::{CreateOrderCommand, OrderListQuery, OrderListResult};
use crate::domain::models::order::{Order, OrderStatus};
use crate::storage::{Connection, OrderStorage};

/// Service for creating and querying detailing orders.
#[derive(Clone)]
pub struct OrderService<C: Connection> {
    order_repository: C::OrderRepository,
}

impl<C: Connection> OrderService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let order_repository = connection.create_order_repository();
        Self { order_repository }
    }

    /// Create and persist a new order. The total is derived from the line
    /// items unless the command fixes it explicitly.
    pub fn create_order(&self, command: CreateOrderCommand) -> Result<Order> {
        let date = command.date.unwrap_or_else(Utc::now);
        let status = command.status.unwrap_or(OrderStatus::Scheduled);

        let mut order = Order::new(
            command.owner_id,
            command.car_id,
            date,
            command.items,
            command.notes,
            status,
        );
        order.id = Uuid::new_v4().to_string();
        if let Some(total) = command.total_price {
            order.total_price = total;
        }

        info!(
            "🧾 ORDER: creating order {} for owner {} ({} items, total {:.2})",
            order.id,
            order.owner_id,
            order.item_count(),
            order.total_price
        );

        self.order_repository.store_order(&order)?;
        Ok(order)
    }

    pub fn get_order(&self, order_id: &str) -> Result<Option<Order>> {
        self.order_repository.get_order(order_id)
    }

    /// List orders, most recent first, optionally narrowed to one owner
    /// and/or one car.
    pub fn list_orders(&self, query: OrderListQuery) -> Result<OrderListResult> {
        let mut orders = self.order_repository.list_orders()?;

        if let Some(owner_id) = &query.owner_id {
            orders.retain(|o| &o.owner_id == owner_id);
        }
        if let Some(car_id) = &query.car_id {
            orders.retain(|o| &o.car_id == car_id);
        }

        Ok(OrderListResult { orders })
    }

    /// Delete an order. Returns true if it existed.
    pub fn delete_order(&self, order_id: &str) -> Result<bool> {
        let deleted = self.order_repository.delete_order(order_id)?;
        if deleted {
            info!("🧾 ORDER: deleted order {}", order_id);
        }
        Ok(deleted)
    }

    /// Validate that each stored total matches the sum of its line items.
    /// Diagnostic only; mismatches are reported, never corrected.
    pub fn validate_order_totals(&self) -> Result<Vec<String>> {
        let orders = self.order_repository.list_orders()?;
        let mut mismatches = Vec::new();

        for order in orders {
            let computed = order.computed_total_price();
            if (order.total_price - computed).abs() > 0.001 {
                mismatches.push(format!(
                    "Order {} has total {:.2} but items sum to {:.2}",
                    order.id, order.total_price, computed
                ));
            }
        }

        Ok(mismatches)
    }

    /// Seed the repository with the built-in demo data when it is empty.
    /// Used by previews and tests; a no-op on a populated store.
    pub fn seed_mock_orders(&self) -> Result<usize> {
        if !self.order_repository.list_orders()?.is_empty() {
            return Ok(0);
        }

        let mocks = Order::mocks();
        for order in &mocks {
            self.order_repository.store_order(order)?;
        }
        info!("🧾 ORDER: seeded {} demo orders", mocks.len());
        Ok(mocks.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::order::{DetailingService, OrderItem};
    use crate::storage::csv::CsvConnection;
    use chrono::TimeZone;

    fn mock_order_items(services: &[DetailingService]) -> Vec<OrderItem> {
        services.iter().map(|s| OrderItem::new(*s)).collect()
    }

    fn test_service() -> (tempfile::TempDir, OrderService<CsvConnection>) {
        let temp_dir = tempfile::tempdir().unwrap();
        let connection = Arc::new(CsvConnection::new(temp_dir.path()).unwrap());
        (temp_dir, OrderService::new(connection))
    }

    #[test]
    fn test_create_order_derives_total() {
        let (_dir, service) = test_service();

        let order = service
            .create_order(CreateOrderCommand {
                owner_id: "user_01".to_string(),
                car_id: "car_bmw_x5".to_string(),
                date: None,
                items: mock_order_items(&[
                    DetailingService::ExteriorWash,
                    DetailingService::Waxing,
                ]),
                total_price: None,
                notes: None,
                status: None,
            })
            .unwrap();

        assert_eq!(order.total_price, 120.0);
        assert_eq!(order.status, OrderStatus::Scheduled);

        let loaded = service.get_order(&order.id).unwrap().unwrap();
        assert_eq!(loaded, order);
    }

    #[test]
    fn test_create_order_respects_fixed_total() {
        let (_dir, service) = test_service();

        let order = service
            .create_order(CreateOrderCommand {
                owner_id: "user_01".to_string(),
                car_id: "car_bmw_x5".to_string(),
                date: None,
                items: mock_order_items(&[DetailingService::Polishing]),
                total_price: Some(99.0),
                notes: None,
                status: Some(OrderStatus::Completed),
            })
            .unwrap();

        assert_eq!(order.total_price, 99.0);
        assert_eq!(order.status, OrderStatus::Completed);

        // the fixed total is flagged by the cross-check but never rewritten
        let mismatches = service.validate_order_totals().unwrap();
        assert_eq!(mismatches.len(), 1);
        let reloaded = service.get_order(&order.id).unwrap().unwrap();
        assert_eq!(reloaded.total_price, 99.0);
    }

    #[test]
    fn test_list_orders_filters() {
        let (_dir, service) = test_service();
        service.seed_mock_orders().unwrap();

        let all = service.list_orders(OrderListQuery::default()).unwrap();
        assert_eq!(all.orders.len(), 5);

        let u1 = service
            .list_orders(OrderListQuery {
                owner_id: Some("user_01".to_string()),
                car_id: None,
            })
            .unwrap();
        assert_eq!(u1.orders.len(), 2);
        assert!(u1.orders.iter().all(|o| o.owner_id == "user_01"));

        let ranger = service
            .list_orders(OrderListQuery {
                owner_id: None,
                car_id: Some("car_ford_ranger".to_string()),
            })
            .unwrap();
        assert_eq!(ranger.orders.len(), 1);

        let both = service
            .list_orders(OrderListQuery {
                owner_id: Some("user_03".to_string()),
                car_id: Some("car_ford_ranger".to_string()),
            })
            .unwrap();
        assert_eq!(both.orders.len(), 1);
    }

    #[test]
    fn test_seed_is_idempotent() {
        let (_dir, service) = test_service();
        assert_eq!(service.seed_mock_orders().unwrap(), 5);
        assert_eq!(service.seed_mock_orders().unwrap(), 0);
        assert_eq!(service.list_orders(OrderListQuery::default()).unwrap().orders.len(), 5);
    }

    #[test]
    fn test_delete_order() {
        let (_dir, service) = test_service();
        let order = service
            .create_order(CreateOrderCommand {
                owner_id: "user_02".to_string(),
                car_id: "car_audi_a6".to_string(),
                date: Some(Utc.with_ymd_and_hms(2025, 3, 12, 9, 0, 0).unwrap()),
                items: vec![],
                total_price: None,
                notes: None,
                status: None,
            })
            .unwrap();

        assert!(service.delete_order(&order.id).unwrap());
        assert!(!service.delete_order(&order.id).unwrap());
        assert!(service.get_order(&order.id).unwrap().is_none());
    }
}
