//! Domain model for a detailing order and its line items.
//!
//! An order fixes the price and description of every line at the moment it
//! was placed. `total_price` is the historical source of truth for
//! accounting; `computed_total_price` exists only as an explicit cross-check
//! and is never silently substituted for the stored total.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Lifecycle state of an order. Exactly one of these at all times; there is
/// no "unknown" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Scheduled,
    InProgress,
    Completed,
    Canceled,
}

impl OrderStatus {
    /// All statuses in declaration order. Status breakdowns emit one row per
    /// entry of this array, in this order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Scheduled,
        OrderStatus::InProgress,
        OrderStatus::Completed,
        OrderStatus::Canceled,
    ];

    /// Stable position used for secondary sorting.
    pub fn sort_order(&self) -> usize {
        match self {
            OrderStatus::Scheduled => 0,
            OrderStatus::InProgress => 1,
            OrderStatus::Completed => 2,
            OrderStatus::Canceled => 3,
        }
    }

    /// Storage identifier for CSV files.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Scheduled => "scheduled",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Canceled => "canceled",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown order status: {0}")]
pub struct ParseOrderStatusError(String);

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(OrderStatus::Scheduled),
            "in_progress" => Ok(OrderStatus::InProgress),
            "completed" => Ok(OrderStatus::Completed),
            "canceled" => Ok(OrderStatus::Canceled),
            other => Err(ParseOrderStatusError(other.to_string())),
        }
    }
}

/// Identifier for a detailing service kind. Metadata (base price, default
/// description) comes from the built-in catalog; an order item fixes those
/// values at order time and may override them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetailingService {
    ExteriorWash,
    InteriorCleaning,
    Polishing,
    Waxing,
    CeramicCoating,
    EngineCleaning,
    HeadlightRestoration,
    OdorRemoval,
    DeepDetailing,
    Other,
}

/// Catalog metadata for one service kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailingServiceInfo {
    pub service: DetailingService,
    pub base_price: f64,
    pub short_description: &'static str,
}

impl DetailingService {
    /// All service kinds in catalog order. Revenue ties are broken by
    /// position in this array.
    pub const ALL: [DetailingService; 10] = [
        DetailingService::ExteriorWash,
        DetailingService::InteriorCleaning,
        DetailingService::Polishing,
        DetailingService::Waxing,
        DetailingService::CeramicCoating,
        DetailingService::EngineCleaning,
        DetailingService::HeadlightRestoration,
        DetailingService::OdorRemoval,
        DetailingService::DeepDetailing,
        DetailingService::Other,
    ];

    /// Position in the catalog, used as a deterministic tie-break key.
    pub fn catalog_index(&self) -> usize {
        match self {
            DetailingService::ExteriorWash => 0,
            DetailingService::InteriorCleaning => 1,
            DetailingService::Polishing => 2,
            DetailingService::Waxing => 3,
            DetailingService::CeramicCoating => 4,
            DetailingService::EngineCleaning => 5,
            DetailingService::HeadlightRestoration => 6,
            DetailingService::OdorRemoval => 7,
            DetailingService::DeepDetailing => 8,
            DetailingService::Other => 9,
        }
    }

    /// Default catalog metadata for this service kind.
    pub fn info(&self) -> DetailingServiceInfo {
        let (base_price, short_description) = match self {
            DetailingService::ExteriorWash => (60.0, "Gentle exterior wash with hand dry"),
            DetailingService::InteriorCleaning => (80.0, "Seats, carpets, vacuum and plastics"),
            DetailingService::Polishing => (150.0, "Body polish with gloss restoration"),
            DetailingService::Waxing => (60.0, "Protective wax coat"),
            DetailingService::CeramicCoating => (250.0, "Ceramic body coating"),
            DetailingService::EngineCleaning => (90.0, "Careful engine bay cleaning"),
            DetailingService::HeadlightRestoration => (70.0, "Headlight polish and clarity restoration"),
            DetailingService::OdorRemoval => (75.0, "Odor removal with cabin treatment"),
            DetailingService::DeepDetailing => (220.0, "Full deep detailing package"),
            DetailingService::Other => (0.0, "Custom service by agreement"),
        };
        DetailingServiceInfo {
            service: *self,
            base_price,
            short_description,
        }
    }

    /// Catalog base price; an order item may override it.
    pub fn base_price(&self) -> f64 {
        self.info().base_price
    }

    /// Storage identifier for CSV files and item JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailingService::ExteriorWash => "exterior_wash",
            DetailingService::InteriorCleaning => "interior_cleaning",
            DetailingService::Polishing => "polishing",
            DetailingService::Waxing => "waxing",
            DetailingService::CeramicCoating => "ceramic_coating",
            DetailingService::EngineCleaning => "engine_cleaning",
            DetailingService::HeadlightRestoration => "headlight_restoration",
            DetailingService::OdorRemoval => "odor_removal",
            DetailingService::DeepDetailing => "deep_detailing",
            DetailingService::Other => "other",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown detailing service: {0}")]
pub struct ParseDetailingServiceError(String);

impl FromStr for DetailingService {
    type Err = ParseDetailingServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DetailingService::ALL
            .iter()
            .find(|svc| svc.as_str() == s)
            .copied()
            .ok_or_else(|| ParseDetailingServiceError(s.to_string()))
    }
}

/// One priced service entry within an order. The price and description are
/// fixed at order time; `unit_price` may diverge from the catalog base
/// price (discount, promotion).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub service: DetailingService,
    pub unit_price: f64,
    pub custom_description: Option<String>,
}

impl OrderItem {
    /// New item at the catalog base price.
    pub fn new(service: DetailingService) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            service,
            unit_price: service.base_price(),
            custom_description: None,
        }
    }

    /// New item with an overridden price.
    pub fn with_price(service: DetailingService, unit_price: f64) -> Self {
        Self {
            unit_price,
            ..Self::new(service)
        }
    }

    /// New item with an overridden description.
    pub fn with_description(service: DetailingService, description: impl Into<String>) -> Self {
        Self {
            custom_description: Some(description.into()),
            ..Self::new(service)
        }
    }

    /// Each line item represents one unit of service rendered, so the line
    /// total is the unit price itself.
    pub fn line_total(&self) -> f64 {
        self.unit_price
    }

    pub fn display_description(&self) -> String {
        self.custom_description
            .clone()
            .unwrap_or_else(|| self.service.info().short_description.to_string())
    }

    pub fn is_custom_priced(&self) -> bool {
        self.unit_price != self.service.base_price()
    }
}

/// A detailing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub owner_id: String,
    pub car_id: String,
    pub date: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    /// Total charged for the order, fixed at order time.
    pub total_price: f64,
    pub notes: Option<String>,
    pub status: OrderStatus,
}

impl Order {
    /// New order with the total derived from its line items.
    pub fn new(
        owner_id: impl Into<String>,
        car_id: impl Into<String>,
        date: DateTime<Utc>,
        items: Vec<OrderItem>,
        notes: Option<String>,
        status: OrderStatus,
    ) -> Self {
        let total_price = items.iter().map(OrderItem::line_total).sum();
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            car_id: car_id.into(),
            date,
            items,
            total_price,
            notes,
            status,
        }
    }

    /// Recompute the total from the line items. Diagnostic cross-check only;
    /// `total_price` stays authoritative.
    pub fn computed_total_price(&self) -> f64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn has_notes(&self) -> bool {
        self.notes.as_deref().map_or(false, |n| !n.is_empty())
    }
}

impl Order {
    /// Demo orders used by the mock order source and tests. Totals always
    /// match the sum of the line items. Owner and car IDs line up with
    /// [`Customer::mocks`](super::customer::Customer::mocks) and
    /// [`Car::mocks`](super::car::Car::mocks).
    pub fn mocks() -> Vec<Order> {
        use chrono::TimeZone;
        let date = |y, m, d| Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap();

        vec![
            Order::new(
                "user_01",
                "car_bmw_x5",
                date(2025, 3, 5),
                vec![
                    OrderItem::new(DetailingService::ExteriorWash),
                    OrderItem::new(DetailingService::Waxing),
                ],
                Some("Use the premium wax".to_string()),
                OrderStatus::Completed,
            ),
            Order::new(
                "user_01",
                "car_toyota_camry",
                date(2025, 3, 20),
                vec![
                    OrderItem::new(DetailingService::InteriorCleaning),
                    OrderItem::with_description(
                        DetailingService::OdorRemoval,
                        "Cabin: extra attention to the trunk",
                    ),
                ],
                None,
                OrderStatus::Scheduled,
            ),
            Order::new(
                "user_02",
                "car_audi_a6",
                date(2025, 3, 12),
                vec![
                    OrderItem::new(DetailingService::DeepDetailing),
                    OrderItem::new(DetailingService::EngineCleaning),
                    // promotional price for the ceramic coat
                    OrderItem::with_price(DetailingService::CeramicCoating, 230.0),
                ],
                Some("Full package, ceramic discount".to_string()),
                OrderStatus::InProgress,
            ),
            Order::new(
                "user_03",
                "car_mercedes_gls450",
                date(2025, 4, 2),
                vec![
                    OrderItem::new(DetailingService::ExteriorWash),
                    OrderItem::with_description(
                        DetailingService::CeramicCoating,
                        "Ceramic, single coat (body)",
                    ),
                ],
                None,
                OrderStatus::Scheduled,
            ),
            Order::new(
                "user_03",
                "car_ford_ranger",
                date(2025, 3, 28),
                vec![
                    OrderItem::new(DetailingService::Polishing),
                    OrderItem::new(DetailingService::Waxing),
                ],
                None,
                OrderStatus::Completed,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_defaults_to_catalog_price() {
        let item = OrderItem::new(DetailingService::Polishing);
        assert_eq!(item.unit_price, 150.0);
        assert!(!item.is_custom_priced());
    }

    #[test]
    fn test_item_price_override() {
        let item = OrderItem::with_price(DetailingService::CeramicCoating, 230.0);
        assert_eq!(item.unit_price, 230.0);
        assert!(item.is_custom_priced());
        assert_eq!(item.line_total(), 230.0);
    }

    #[test]
    fn test_item_description_override() {
        let item = OrderItem::with_description(DetailingService::OdorRemoval, "Focus on the trunk");
        assert_eq!(item.display_description(), "Focus on the trunk");

        let plain = OrderItem::new(DetailingService::OdorRemoval);
        assert_eq!(plain.display_description(), "Odor removal with cabin treatment");
    }

    #[test]
    fn test_status_round_trip() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("unknown".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_service_round_trip() {
        for service in DetailingService::ALL {
            assert_eq!(service.as_str().parse::<DetailingService>().unwrap(), service);
        }
        assert!("teleportation".parse::<DetailingService>().is_err());
    }

    #[test]
    fn test_catalog_index_matches_declaration_order() {
        for (position, service) in DetailingService::ALL.iter().enumerate() {
            assert_eq!(service.catalog_index(), position);
        }
    }

    #[test]
    fn test_order_total_derived_from_items() {
        let order = Order::new(
            "user_01",
            "car_bmw_x5",
            Utc::now(),
            vec![
                OrderItem::new(DetailingService::ExteriorWash),
                OrderItem::with_price(DetailingService::Waxing, 50.0),
            ],
            None,
            OrderStatus::Scheduled,
        );
        assert_eq!(order.total_price, 110.0);
        assert_eq!(order.computed_total_price(), 110.0);
        assert_eq!(order.item_count(), 2);
    }

    #[test]
    fn test_mock_totals_match_items() {
        for order in Order::mocks() {
            assert_eq!(order.total_price, order.computed_total_price());
            assert!(!order.items.is_empty());
        }
    }
}
