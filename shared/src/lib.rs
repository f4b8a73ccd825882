use serde::{Deserialize, Serialize};
use std::fmt;
use chrono::Datelike;

/// A detailing order as exposed to presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// ID of the customer who owns this order
    pub owner_id: String,
    /// ID of the car the work was booked for
    pub car_id: String,
    /// Order timestamp with timezone (RFC 3339)
    pub date: String,
    /// Line items with the price/description fixed at order time
    pub items: Vec<OrderItem>,
    /// Total charged for the order (historical, authoritative)
    pub total_price: f64,
    /// Optional free-text note attached to the order
    pub notes: Option<String>,
    pub status: OrderStatus,
}

/// One priced service entry within an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub service: DetailingService,
    /// Price charged for this line; may diverge from the catalog default
    pub unit_price: f64,
    /// Free-text override of the service's default description
    pub custom_description: Option<String>,
}

/// Lifecycle state of an order. Exactly one of these at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Scheduled,
    InProgress,
    Completed,
    Canceled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Scheduled => "Scheduled",
            OrderStatus::InProgress => "In progress",
            OrderStatus::Completed => "Completed",
            OrderStatus::Canceled => "Canceled",
        };
        write!(f, "{}", label)
    }
}

/// Closed set of detailing service kinds offered by the shop.
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

impl fmt::Display for DetailingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DetailingService::ExteriorWash => "Exterior wash",
            DetailingService::InteriorCleaning => "Interior cleaning",
            DetailingService::Polishing => "Body polishing",
            DetailingService::Waxing => "Waxing",
            DetailingService::CeramicCoating => "Ceramic coating",
            DetailingService::EngineCleaning => "Engine cleaning",
            DetailingService::HeadlightRestoration => "Headlight restoration",
            DetailingService::OdorRemoval => "Odor removal",
            DetailingService::DeepDetailing => "Deep detailing",
            DetailingService::Other => "Other",
        };
        write!(f, "{}", label)
    }
}

/// A customer profile, as needed by the owner scope picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub display_name: String,
}

/// A registered car, as needed by the car scope picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: String,
    pub owner_id: String,
    /// Human-readable label, e.g. "BMW X5 (2021)"
    pub label: String,
    pub license_plate: Option<String>,
}

/// Narrows analytics to all orders, one owner's orders, one car's orders,
/// or their conjunction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderScope {
    All,
    OwnerOnly { owner_id: String },
    CarOnly { car_id: String },
    OwnerAndCar { owner_id: String, car_id: String },
}

impl Default for OrderScope {
    fn default() -> Self {
        OrderScope::All
    }
}

/// Request for the monthly analytics breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAnalyticsRequest {
    pub month: u32,
    pub year: i32,
    #[serde(default)]
    pub scope: OrderScope,
}

/// Order count for a single lifecycle status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: usize,
}

/// Per-status order counts for one month. Always contains one row per
/// status, zero-filled, in declaration order, so chart legends are stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub month: u32,
    pub year: i32,
    pub counts: Vec<StatusCount>,
}

/// Aggregated item count and revenue for one service kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRevenueSlice {
    pub service: DetailingService,
    pub count: usize,
    pub revenue: f64,
}

/// Per-service revenue totals for one month, sorted descending by revenue.
/// Services with no occurrences are omitted (unlike `StatusBreakdown`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRevenueBreakdown {
    pub month: u32,
    pub year: i32,
    pub slices: Vec<ServiceRevenueSlice>,
}

/// The month currently shown by the analytics screens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsFocusDate {
    pub month: u32,
    pub year: i32,
}

impl Default for AnalyticsFocusDate {
    fn default() -> Self {
        let now = chrono::Local::now();
        Self {
            month: now.month(),
            year: now.year(),
        }
    }
}

/// Request to move the analytics focus to a specific month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateAnalyticsFocusRequest {
    pub month: u32,
    pub year: i32,
}

/// Response after updating the analytics focus month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateAnalyticsFocusResponse {
    pub focus_date: AnalyticsFocusDate,
    pub success_message: String,
}
