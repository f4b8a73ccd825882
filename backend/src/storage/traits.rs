//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use crate::domain::models::order::Order as DomainOrder;

/// Trait defining the interface for order storage operations.
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different storage backends
/// (CSV files, a future cloud store, an in-memory test double) without
/// modification.
pub trait OrderStorage: Send + Sync {
    /// Store a new order
    fn store_order(&self, order: &DomainOrder) -> Result<()>;

    /// Retrieve a specific order by ID
    fn get_order(&self, order_id: &str) -> Result<Option<DomainOrder>>;

    /// List all orders, ordered by date descending (most recent first)
    fn list_orders(&self) -> Result<Vec<DomainOrder>>;

    /// Update an existing order
    fn update_order(&self, order: &DomainOrder) -> Result<()>;

    /// Delete a single order
    /// Returns true if the order was found and deleted, false otherwise
    fn delete_order(&self, order_id: &str) -> Result<bool>;
}

/// Trait defining the interface for storage connections.
///
/// Provides factory methods for creating repositories, so the domain layer
/// can work with any storage backend without knowing the implementation.
pub trait Connection: Send + Sync + Clone {
    /// The type of OrderStorage this connection creates
    type OrderRepository: OrderStorage + Clone;

    /// Create a new order repository for this connection
    fn create_order_repository(&self) -> Self::OrderRepository;
}
