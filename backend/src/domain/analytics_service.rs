//! Monthly analytics orchestration.
//!
//! Pulls the order snapshot from the order service and runs the pure
//! aggregation cores over it. This is the entry point the facade (and any
//! UI shell) calls; the aggregation itself lives in `order_analytics` and
//! `service_analytics` and stays free of storage concerns.

use anyhow::Result;
use log::info;

use crate::domain::calendar::CalendarService;
use crate::domain::commands::analytics::{
    RevenueBreakdownQuery, RevenueBreakdownResult, StatusBreakdownQuery, StatusBreakdownResult,
};
use crate::domain::commands::orders::OrderListQuery;
use crate::domain::order_analytics::counts_by_status;
use crate::domain::order_service::OrderService;
use crate::domain::service_analytics::revenue_by_service;
use crate::storage::Connection;

/// Stateless service computing the monthly chart aggregates.
#[derive(Clone)]
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Per-status order counts for one month and scope.
    ///
    /// An unresolvable month yields a result with an empty `counts` list
    /// rather than an error; every resolvable month yields exactly four
    /// rows in declaration order.
    pub fn status_breakdown<C: Connection>(
        &self,
        query: StatusBreakdownQuery,
        order_service: &OrderService<C>,
        calendar: &CalendarService,
    ) -> Result<StatusBreakdownResult> {
        info!(
            "📊 ANALYTICS: status breakdown for {}/{} ({:?})",
            query.month, query.year, query.scope
        );

        let orders = order_service.list_orders(OrderListQuery::default())?.orders;

        let counts = match calendar.month_interval(query.month, query.year) {
            Some(interval) => counts_by_status(&orders, interval.start, &query.scope, calendar),
            None => Vec::new(),
        };

        info!(
            "📊 ANALYTICS: status breakdown produced {} rows from {} orders",
            counts.len(),
            orders.len()
        );

        Ok(StatusBreakdownResult {
            month: query.month,
            year: query.year,
            counts,
        })
    }

    /// Per-service item counts and revenue totals for one month and scope.
    pub fn revenue_breakdown<C: Connection>(
        &self,
        query: RevenueBreakdownQuery,
        order_service: &OrderService<C>,
        calendar: &CalendarService,
    ) -> Result<RevenueBreakdownResult> {
        info!(
            "📊 ANALYTICS: revenue breakdown for {}/{} ({:?})",
            query.month, query.year, query.scope
        );

        let orders = order_service.list_orders(OrderListQuery::default())?.orders;

        let slices = match calendar.month_interval(query.month, query.year) {
            Some(interval) => revenue_by_service(&orders, interval.start, &query.scope, calendar),
            None => Vec::new(),
        };

        info!(
            "📊 ANALYTICS: revenue breakdown produced {} slices from {} orders",
            slices.len(),
            orders.len()
        );

        Ok(RevenueBreakdownResult {
            month: query.month,
            year: query.year,
            slices,
        })
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
