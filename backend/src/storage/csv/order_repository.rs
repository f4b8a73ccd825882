//! CSV-based order repository.
//!
//! Orders live in a single `orders.csv` file; line items are serialized as a
//! JSON column so the row layout stays flat. Writes go through a temp file
//! and an atomic rename.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::{Reader, Writer};
use log::warn;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use crate::domain::models::order::{Order, OrderItem};
use crate::storage::traits::OrderStorage;
use super::connection::CsvConnection;

/// CSV-backed order repository.
#[derive(Clone)]
pub struct OrderRepository {
    connection: CsvConnection,
}

impl OrderRepository {
    pub const HEADER: [&'static str; 8] = [
        "id",
        "owner_id",
        "car_id",
        "date",
        "status",
        "total_price",
        "notes",
        "items",
    ];

    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read all orders from the CSV file.
    fn read_orders(&self) -> Result<Vec<Order>> {
        self.connection.ensure_orders_file_exists()?;

        let file_path = self.connection.orders_file_path();
        let file = File::open(&file_path)
            .with_context(|| format!("failed to open {}", file_path.display()))?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut orders = Vec::new();
        for result in csv_reader.records() {
            let record = result?;

            let date_str = record.get(3).unwrap_or("");
            let date = DateTime::parse_from_rfc3339(date_str)
                .with_context(|| format!("invalid order date: {}", date_str))?
                .with_timezone(&Utc);

            let status = record
                .get(4)
                .unwrap_or("")
                .parse()
                .with_context(|| format!("order {} has an invalid status", record.get(0).unwrap_or("?")))?;

            let notes = match record.get(6) {
                Some("") | None => None,
                Some(n) => Some(n.to_string()),
            };

            let items: Vec<OrderItem> = match record.get(7) {
                Some("") | None => Vec::new(),
                Some(json) => serde_json::from_str(json)
                    .with_context(|| format!("order {} has malformed items", record.get(0).unwrap_or("?")))?,
            };

            orders.push(Order {
                id: record.get(0).unwrap_or("").to_string(),
                owner_id: record.get(1).unwrap_or("").to_string(),
                car_id: record.get(2).unwrap_or("").to_string(),
                date,
                items,
                total_price: record.get(5).unwrap_or("0").parse::<f64>().unwrap_or(0.0),
                notes,
                status,
            });
        }

        Ok(orders)
    }

    /// Write all orders to the CSV file via an atomic temp-file rename.
    fn write_orders(&self, orders: &[Order]) -> Result<()> {
        let file_path = self.connection.orders_file_path();
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let mut csv_writer = Writer::from_writer(BufWriter::new(file));

            csv_writer.write_record(Self::HEADER)?;
            for order in orders {
                let date = order.date.to_rfc3339();
                let total = order.total_price.to_string();
                let items_json = serde_json::to_string(&order.items)?;
                csv_writer.write_record([
                    order.id.as_str(),
                    order.owner_id.as_str(),
                    order.car_id.as_str(),
                    date.as_str(),
                    order.status.as_str(),
                    total.as_str(),
                    order.notes.as_deref().unwrap_or(""),
                    items_json.as_str(),
                ])?;
            }
            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

impl OrderStorage for OrderRepository {
    fn store_order(&self, order: &Order) -> Result<()> {
        let mut orders = self.read_orders()?;
        if orders.iter().any(|o| o.id == order.id) {
            warn!("store_order called with existing id {}, replacing", order.id);
            orders.retain(|o| o.id != order.id);
        }
        orders.push(order.clone());
        self.write_orders(&orders)
    }

    fn get_order(&self, order_id: &str) -> Result<Option<Order>> {
        let orders = self.read_orders()?;
        Ok(orders.into_iter().find(|o| o.id == order_id))
    }

    fn list_orders(&self) -> Result<Vec<Order>> {
        let mut orders = self.read_orders()?;
        orders.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(orders)
    }

    fn update_order(&self, order: &Order) -> Result<()> {
        let mut orders = self.read_orders()?;
        let slot = orders
            .iter_mut()
            .find(|o| o.id == order.id)
            .with_context(|| format!("order not found: {}", order.id))?;
        *slot = order.clone();
        self.write_orders(&orders)
    }

    fn delete_order(&self, order_id: &str) -> Result<bool> {
        let mut orders = self.read_orders()?;
        let before = orders.len();
        orders.retain(|o| o.id != order_id);
        if orders.len() == before {
            return Ok(false);
        }
        self.write_orders(&orders)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::order::{DetailingService, OrderStatus};
    use crate::storage::traits::Connection;
    use chrono::TimeZone;

    fn test_repository() -> (tempfile::TempDir, OrderRepository) {
        let temp_dir = tempfile::tempdir().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let repository = connection.create_order_repository();
        (temp_dir, repository)
    }

    fn sample_order() -> Order {
        Order::new(
            "user_01",
            "car_bmw_x5",
            Utc.with_ymd_and_hms(2025, 3, 5, 10, 0, 0).unwrap(),
            vec![
                OrderItem::new(DetailingService::ExteriorWash),
                OrderItem::with_price(DetailingService::CeramicCoating, 230.0),
            ],
            Some("Premium wax".to_string()),
            OrderStatus::Completed,
        )
    }

    #[test]
    fn test_store_and_get_round_trip() {
        let (_dir, repository) = test_repository();
        let order = sample_order();

        repository.store_order(&order).unwrap();
        let loaded = repository.get_order(&order.id).unwrap().unwrap();

        assert_eq!(loaded, order);
        assert_eq!(loaded.items.len(), 2);
        assert!(loaded.items[1].is_custom_priced());
    }

    #[test]
    fn test_get_missing_order() {
        let (_dir, repository) = test_repository();
        assert!(repository.get_order("nope").unwrap().is_none());
    }

    #[test]
    fn test_list_orders_most_recent_first() {
        let (_dir, repository) = test_repository();
        for order in Order::mocks() {
            repository.store_order(&order).unwrap();
        }

        let orders = repository.list_orders().unwrap();
        assert_eq!(orders.len(), 5);
        for pair in orders.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn test_update_order() {
        let (_dir, repository) = test_repository();
        let mut order = sample_order();
        repository.store_order(&order).unwrap();

        order.status = OrderStatus::Canceled;
        repository.update_order(&order).unwrap();

        let loaded = repository.get_order(&order.id).unwrap().unwrap();
        assert_eq!(loaded.status, OrderStatus::Canceled);
    }

    #[test]
    fn test_update_missing_order_fails() {
        let (_dir, repository) = test_repository();
        assert!(repository.update_order(&sample_order()).is_err());
    }

    #[test]
    fn test_delete_order() {
        let (_dir, repository) = test_repository();
        let order = sample_order();
        repository.store_order(&order).unwrap();

        assert!(repository.delete_order(&order.id).unwrap());
        assert!(!repository.delete_order(&order.id).unwrap());
        assert!(repository.get_order(&order.id).unwrap().is_none());
    }

    #[test]
    fn test_order_without_items_or_notes() {
        let (_dir, repository) = test_repository();
        let order = Order::new(
            "user_02",
            "car_audi_a6",
            Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap(),
            vec![],
            None,
            OrderStatus::Scheduled,
        );

        repository.store_order(&order).unwrap();
        let loaded = repository.get_order(&order.id).unwrap().unwrap();

        assert!(loaded.items.is_empty());
        assert!(loaded.notes.is_none());
        assert_eq!(loaded.total_price, 0.0);
    }
}
