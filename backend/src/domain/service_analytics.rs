//! Service analytics core: monthly revenue totals per detailing service.
//!
//! Same month/scope filtering as the status analytics, but aggregating the
//! priced line items of each retained order. Pure and side-effect free.

use chrono::{DateTime, Utc};
use log::warn;
use std::cmp::Ordering;
use std::collections::HashMap;

use super::calendar::CalendarService;
use super::models::order::DetailingService;
use super::order_analytics::{ItemizedOrderLike, OrderScope};

/// Aggregated item count and revenue for one service kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRevenueSlice {
    pub service: DetailingService,
    pub count: usize,
    pub revenue: f64,
}

/// Sum item counts and revenue per service kind for the calendar month
/// containing `month_of`, restricted to `scope`.
///
/// Only services that appeared at least once are emitted; there is no
/// zero-padding here, unlike the status breakdown. A zero-priced item still
/// makes its service appear, because inclusion is count-based, not
/// revenue-based. Revenue is the plain sum of `unit_price` over the items —
/// each line item is one unit of service rendered.
///
/// The result is sorted descending by revenue; equal-revenue services fall
/// back to catalog declaration order so the output is deterministic.
pub fn revenue_by_service<T: ItemizedOrderLike>(
    orders: &[T],
    month_of: DateTime<Utc>,
    scope: &OrderScope,
    calendar: &CalendarService,
) -> Vec<ServiceRevenueSlice> {
    let Some(interval) = calendar.month_interval_for(month_of) else {
        warn!(
            "📊 ANALYTICS: no month interval for reference date {}, returning empty revenue breakdown",
            month_of
        );
        return Vec::new();
    };

    let matches = scope.to_predicate::<T>();
    let mut counts: HashMap<DetailingService, usize> =
        HashMap::with_capacity(DetailingService::ALL.len());
    let mut sums: HashMap<DetailingService, f64> =
        HashMap::with_capacity(DetailingService::ALL.len());

    for order in orders
        .iter()
        .filter(|o| interval.contains(o.order_date()) && matches(o))
    {
        for item in order.line_items() {
            *counts.entry(item.service).or_insert(0) += 1;
            *sums.entry(item.service).or_insert(0.0) += item.unit_price;
        }
    }

    let mut slices: Vec<ServiceRevenueSlice> = DetailingService::ALL
        .iter()
        .filter_map(|service| {
            let count = *counts.get(service)?;
            Some(ServiceRevenueSlice {
                service: *service,
                count,
                revenue: sums.get(service).copied().unwrap_or(0.0),
            })
        })
        .collect();

    slices.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.service.catalog_index().cmp(&b.service.catalog_index()))
    });

    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::order::{Order, OrderItem, OrderStatus};
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
    }

    fn order_with_items(date: DateTime<Utc>, owner: &str, items: Vec<OrderItem>) -> Order {
        Order::new(owner, "car_test", date, items, None, OrderStatus::Completed)
    }

    #[test]
    fn test_revenue_by_service_sums_and_sorts() {
        // two washes at 60 and one wax at 40: wash leads with 120
        let orders = vec![
            order_with_items(
                date(2025, 3, 5),
                "u1",
                vec![
                    OrderItem::with_price(DetailingService::ExteriorWash, 60.0),
                    OrderItem::with_price(DetailingService::Waxing, 40.0),
                ],
            ),
            order_with_items(
                date(2025, 3, 12),
                "u1",
                vec![OrderItem::with_price(DetailingService::ExteriorWash, 60.0)],
            ),
        ];

        let slices = revenue_by_service(
            &orders,
            date(2025, 3, 15),
            &OrderScope::All,
            &CalendarService::new(),
        );

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].service, DetailingService::ExteriorWash);
        assert_eq!(slices[0].count, 2);
        assert_eq!(slices[0].revenue, 120.0);
        assert_eq!(slices[1].service, DetailingService::Waxing);
        assert_eq!(slices[1].count, 1);
        assert_eq!(slices[1].revenue, 40.0);
    }

    #[test]
    fn test_unseen_services_are_omitted() {
        let orders = vec![order_with_items(
            date(2025, 3, 5),
            "u1",
            vec![OrderItem::new(DetailingService::Polishing)],
        )];

        let slices = revenue_by_service(
            &orders,
            date(2025, 3, 15),
            &OrderScope::All,
            &CalendarService::new(),
        );

        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].service, DetailingService::Polishing);
    }

    #[test]
    fn test_zero_price_item_still_appears() {
        // inclusion is count-based: a free line keeps its service visible
        let orders = vec![order_with_items(
            date(2025, 3, 5),
            "u1",
            vec![OrderItem::with_price(DetailingService::Other, 0.0)],
        )];

        let slices = revenue_by_service(
            &orders,
            date(2025, 3, 15),
            &OrderScope::All,
            &CalendarService::new(),
        );

        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].service, DetailingService::Other);
        assert_eq!(slices[0].count, 1);
        assert_eq!(slices[0].revenue, 0.0);
    }

    #[test]
    fn test_order_without_items_contributes_nothing() {
        let orders = vec![order_with_items(date(2025, 3, 5), "u1", vec![])];

        let slices = revenue_by_service(
            &orders,
            date(2025, 3, 15),
            &OrderScope::All,
            &CalendarService::new(),
        );

        assert!(slices.is_empty());
    }

    #[test]
    fn test_equal_revenue_falls_back_to_catalog_order() {
        let orders = vec![order_with_items(
            date(2025, 3, 5),
            "u1",
            vec![
                OrderItem::with_price(DetailingService::OdorRemoval, 75.0),
                OrderItem::with_price(DetailingService::Waxing, 75.0),
                OrderItem::with_price(DetailingService::EngineCleaning, 75.0),
            ],
        )];

        let slices = revenue_by_service(
            &orders,
            date(2025, 3, 15),
            &OrderScope::All,
            &CalendarService::new(),
        );

        let services: Vec<DetailingService> = slices.iter().map(|s| s.service).collect();
        assert_eq!(
            services,
            vec![
                DetailingService::Waxing,
                DetailingService::EngineCleaning,
                DetailingService::OdorRemoval,
            ]
        );
    }

    #[test]
    fn test_revenue_conservation_and_sort_order() {
        let orders = Order::mocks();
        let calendar = CalendarService::new();
        let march = date(2025, 3, 15);

        let slices = revenue_by_service(&orders, march, &OrderScope::All, &calendar);

        let expected: f64 = orders
            .iter()
            .filter(|o| {
                calendar.month_interval_for(march).unwrap().contains(o.date)
            })
            .flat_map(|o| o.items.iter())
            .map(|i| i.unit_price)
            .sum();
        let total: f64 = slices.iter().map(|s| s.revenue).sum();
        assert!((total - expected).abs() < 1e-9);

        for pair in slices.windows(2) {
            assert!(pair[0].revenue >= pair[1].revenue);
        }
    }

    #[test]
    fn test_scope_filters_revenue() {
        let orders = vec![
            order_with_items(
                date(2025, 3, 5),
                "u1",
                vec![OrderItem::with_price(DetailingService::ExteriorWash, 60.0)],
            ),
            order_with_items(
                date(2025, 3, 6),
                "u2",
                vec![OrderItem::with_price(DetailingService::ExteriorWash, 60.0)],
            ),
        ];

        let slices = revenue_by_service(
            &orders,
            date(2025, 3, 15),
            &OrderScope::OwnerOnly("u1".to_string()),
            &CalendarService::new(),
        );

        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].revenue, 60.0);
        assert_eq!(slices[0].count, 1);
    }

    #[test]
    fn test_empty_orders_yield_empty_breakdown() {
        let slices = revenue_by_service(
            &Vec::<Order>::new(),
            date(2025, 3, 15),
            &OrderScope::All,
            &CalendarService::new(),
        );
        assert!(slices.is_empty());
    }
}
