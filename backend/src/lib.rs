//! # Car Detailing Tracker Backend
//!
//! Non-UI logic for the car detailing tracker: order management, monthly
//! analytics aggregation, and CSV persistence.
//!
//! The backend follows a layered architecture:
//!
//! - **Domain**: business rules, aggregation cores, and services
//! - **Storage**: data persistence behind the `Connection` trait
//! - **Mappers**: translation between domain types and the `shared` DTOs
//!
//! UI shells talk to the [`Backend`] facade only; domain types never cross
//! that boundary.

pub mod domain;
pub mod mappers;
pub mod storage;

use anyhow::Result;
use log::info;
use std::path::Path;
use std::sync::Arc;

use crate::domain::analytics_service::AnalyticsService;
use crate::domain::calendar::CalendarService;
use crate::domain::commands::analytics::{RevenueBreakdownQuery, StatusBreakdownQuery};
use crate::domain::commands::orders::OrderListQuery;
use crate::domain::order_service::OrderService;
use crate::domain::order_store::{OrderStore, StorageOrderSource};
use crate::domain::models::car::Car;
use crate::domain::models::customer::Customer;
use crate::mappers::{AnalyticsMapper, CarMapper, CustomerMapper, OrderMapper};
use crate::storage::csv::CsvConnection;

/// Facade over all backend services, exposing the DTO-level API the UI
/// consumes.
pub struct Backend {
    order_service: OrderService<CsvConnection>,
    analytics_service: AnalyticsService,
    calendar_service: CalendarService,
    order_store: OrderStore,
}

impl Backend {
    /// Initialize the backend with CSV storage rooted at `data_dir`.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        info!("Setting up CSV storage");
        let connection = Arc::new(CsvConnection::new(data_dir)?);

        info!("Setting up domain services");
        let order_service = OrderService::new(Arc::clone(&connection));
        let analytics_service = AnalyticsService::new();
        let calendar_service = CalendarService::new();
        let order_store = OrderStore::new(Arc::new(StorageOrderSource::<CsvConnection>::new(
            connection,
        )));

        Ok(Self {
            order_service,
            analytics_service,
            calendar_service,
            order_store,
        })
    }

    /// Seed the built-in demo orders when the store is empty. Returns the
    /// number of orders written.
    pub fn seed_demo_data(&self) -> Result<usize> {
        self.order_service.seed_mock_orders()
    }

    /// Per-status order counts for the requested month and scope.
    pub fn status_breakdown(
        &self,
        request: shared::MonthlyAnalyticsRequest,
    ) -> Result<shared::StatusBreakdown> {
        let query = StatusBreakdownQuery {
            month: request.month,
            year: request.year,
            scope: AnalyticsMapper::scope_to_domain(request.scope),
        };

        let result =
            self.analytics_service
                .status_breakdown(query, &self.order_service, &self.calendar_service)?;

        Ok(shared::StatusBreakdown {
            month: result.month,
            year: result.year,
            counts: result
                .counts
                .into_iter()
                .map(AnalyticsMapper::status_count_to_dto)
                .collect(),
        })
    }

    /// Per-service item counts and revenue for the requested month and scope.
    pub fn revenue_breakdown(
        &self,
        request: shared::MonthlyAnalyticsRequest,
    ) -> Result<shared::ServiceRevenueBreakdown> {
        let query = RevenueBreakdownQuery {
            month: request.month,
            year: request.year,
            scope: AnalyticsMapper::scope_to_domain(request.scope),
        };

        let result = self.analytics_service.revenue_breakdown(
            query,
            &self.order_service,
            &self.calendar_service,
        )?;

        Ok(shared::ServiceRevenueBreakdown {
            month: result.month,
            year: result.year,
            slices: result
                .slices
                .into_iter()
                .map(AnalyticsMapper::revenue_slice_to_dto)
                .collect(),
        })
    }

    /// List orders, most recent first, optionally narrowed to one owner
    /// and/or one car.
    pub fn list_orders(
        &self,
        owner_id: Option<String>,
        car_id: Option<String>,
    ) -> Result<Vec<shared::Order>> {
        let result = self
            .order_service
            .list_orders(OrderListQuery { owner_id, car_id })?;
        Ok(result.orders.into_iter().map(OrderMapper::to_dto).collect())
    }

    /// Customers available to the owner scope picker. Served from the
    /// built-in demo profiles until a customer store lands.
    pub fn list_customers(&self) -> Vec<shared::Customer> {
        Customer::mocks()
            .into_iter()
            .map(CustomerMapper::to_dto)
            .collect()
    }

    /// Cars available to the car scope picker, optionally narrowed to one
    /// owner. Served from the built-in demo fleet.
    pub fn list_cars(&self, owner_id: Option<&str>) -> Vec<shared::Car> {
        Car::mocks()
            .into_iter()
            .filter(|car| owner_id.map_or(true, |id| car.owner_id == id))
            .map(CarMapper::to_dto)
            .collect()
    }

    /// Month currently shown by the analytics screens.
    pub fn focus_date(&self) -> shared::AnalyticsFocusDate {
        self.calendar_service.get_focus_date()
    }

    /// Move the analytics focus to a specific month.
    pub fn set_focus_date(
        &self,
        request: shared::UpdateAnalyticsFocusRequest,
    ) -> Result<shared::UpdateAnalyticsFocusResponse> {
        let focus_date = self
            .calendar_service
            .set_focus_date(request.month, request.year)?;
        let success_message = format!(
            "Analytics focus moved to {}/{}",
            focus_date.month, focus_date.year
        );
        Ok(shared::UpdateAnalyticsFocusResponse {
            focus_date,
            success_message,
        })
    }

    /// Page the analytics focus one month back.
    pub fn navigate_previous_month(&self) -> shared::AnalyticsFocusDate {
        self.calendar_service.navigate_previous_month()
    }

    /// Page the analytics focus one month forward.
    pub fn navigate_next_month(&self) -> shared::AnalyticsFocusDate {
        self.calendar_service.navigate_next_month()
    }

    /// Refresh the async order snapshot from storage. A new call supersedes
    /// any reload still in flight.
    pub async fn reload_orders(&self) {
        self.order_store.reload().await;
    }

    /// The most recently published order snapshot, as DTOs.
    pub fn cached_orders(&self) -> Vec<shared::Order> {
        self.order_store
            .orders()
            .into_iter()
            .map(OrderMapper::to_dto)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_backend() -> (tempfile::TempDir, Backend) {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = Backend::new(temp_dir.path()).unwrap();
        backend.seed_demo_data().unwrap();
        (temp_dir, backend)
    }

    #[test]
    fn test_status_breakdown_through_facade() {
        let (_dir, backend) = seeded_backend();

        let breakdown = backend
            .status_breakdown(shared::MonthlyAnalyticsRequest {
                month: 3,
                year: 2025,
                scope: shared::OrderScope::All,
            })
            .unwrap();

        assert_eq!(breakdown.month, 3);
        assert_eq!(breakdown.counts.len(), 4);
        let total: usize = breakdown.counts.iter().map(|c| c.count).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_revenue_breakdown_through_facade() {
        let (_dir, backend) = seeded_backend();

        let breakdown = backend
            .revenue_breakdown(shared::MonthlyAnalyticsRequest {
                month: 3,
                year: 2025,
                scope: shared::OrderScope::OwnerOnly {
                    owner_id: "user_01".to_string(),
                },
            })
            .unwrap();

        assert!(!breakdown.slices.is_empty());
        for pair in breakdown.slices.windows(2) {
            assert!(pair[0].revenue >= pair[1].revenue);
        }
    }

    #[test]
    fn test_list_orders_through_facade() {
        let (_dir, backend) = seeded_backend();

        let all = backend.list_orders(None, None).unwrap();
        assert_eq!(all.len(), 5);

        let u1 = backend.list_orders(Some("user_01".to_string()), None).unwrap();
        assert_eq!(u1.len(), 2);
    }

    #[test]
    fn test_scope_pickers_agree_with_demo_orders() {
        let (_dir, backend) = seeded_backend();

        let customers = backend.list_customers();
        assert_eq!(customers.len(), 3);

        let cars = backend.list_cars(None);
        assert_eq!(cars.len(), 5);
        let u1_cars = backend.list_cars(Some("user_01"));
        assert_eq!(u1_cars.len(), 2);

        // every demo order must reference a known customer and car
        let orders = backend.list_orders(None, None).unwrap();
        for order in &orders {
            assert!(customers.iter().any(|c| c.id == order.owner_id));
            assert!(cars.iter().any(|c| c.id == order.car_id));
        }
    }

    #[test]
    fn test_focus_navigation_through_facade() {
        let (_dir, backend) = seeded_backend();

        backend
            .set_focus_date(shared::UpdateAnalyticsFocusRequest { month: 3, year: 2025 })
            .unwrap();
        let focus = backend.navigate_next_month();
        assert_eq!((focus.month, focus.year), (4, 2025));

        let focus = backend.navigate_previous_month();
        assert_eq!((focus.month, focus.year), (3, 2025));

        assert!(backend
            .set_focus_date(shared::UpdateAnalyticsFocusRequest { month: 0, year: 2025 })
            .is_err());
    }

    #[tokio::test]
    async fn test_reload_publishes_stored_orders() {
        let (_dir, backend) = seeded_backend();
        assert!(backend.cached_orders().is_empty());

        backend.reload_orders().await;

        assert_eq!(backend.cached_orders().len(), 5);
    }
}
