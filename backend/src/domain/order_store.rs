//! Asynchronous order store with cancellable reloads.
//!
//! The store owns the published order snapshot the UI (and the analytics
//! facade) reads. Reloading is the only asynchronous operation in the
//! backend: it awaits an injected [`OrderSource`], and starting a new reload
//! cancels the prior one. A cancelled reload's result must never overwrite a
//! newer reload's result, so every commit re-checks the reload generation
//! under the state lock before touching the snapshot.

use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::AbortHandle;

use crate::domain::models::order::Order;
use crate::storage::{Connection, OrderStorage};

/// Injected loader the store awaits on every reload. Implementations exist
/// for the CSV storage layer and for mock/demo data; tests swap in their
/// own.
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn load_orders(&self) -> Result<Vec<Order>>;
}

/// Demo source serving the built-in mock orders, optionally with simulated
/// latency for previews.
pub struct MockOrderSource {
    orders: Vec<Order>,
    delay: Duration,
}

impl MockOrderSource {
    pub fn new() -> Self {
        Self {
            orders: Order::mocks(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new()
        }
    }
}

impl Default for MockOrderSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderSource for MockOrderSource {
    async fn load_orders(&self) -> Result<Vec<Order>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.orders.clone())
    }
}

/// Source backed by the order repository.
pub struct StorageOrderSource<C: Connection> {
    repository: C::OrderRepository,
}

impl<C: Connection> StorageOrderSource<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            repository: connection.create_order_repository(),
        }
    }
}

#[async_trait]
impl<C: Connection + 'static> OrderSource for StorageOrderSource<C> {
    async fn load_orders(&self) -> Result<Vec<Order>> {
        // CSV reads are small and synchronous; no need to offload
        self.repository.list_orders()
    }
}

struct StoreState {
    orders: Vec<Order>,
    is_loading: bool,
    error: Option<String>,
    /// Reload generation. Bumped by every reload; a load result is only
    /// committed while its generation is still current.
    epoch: u64,
}

/// Published order snapshot plus reload bookkeeping.
pub struct OrderStore {
    source: Arc<dyn OrderSource>,
    state: Arc<Mutex<StoreState>>,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl OrderStore {
    /// Create an empty store. No load is started; call [`reload`].
    ///
    /// [`reload`]: OrderStore::reload
    pub fn new(source: Arc<dyn OrderSource>) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(StoreState {
                orders: Vec::new(),
                is_loading: false,
                error: None,
                epoch: 0,
            })),
            in_flight: Mutex::new(None),
        }
    }

    /// Reload the order snapshot from the source.
    ///
    /// Cancels any reload still in flight; the cancelled reload leaves the
    /// previously published snapshot untouched. The loading flag is cleared
    /// on success and on failure; a superseded reload leaves it to its
    /// successor.
    pub async fn reload(&self) {
        let epoch = {
            let mut state = self.state.lock().unwrap();
            state.epoch += 1;
            state.is_loading = true;
            state.error = None;
            state.epoch
        };

        if let Some(prior) = self.in_flight.lock().unwrap().take() {
            prior.abort();
        }

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let handle = tokio::spawn(async move {
            let result = source.load_orders().await;

            let mut state = state.lock().unwrap();
            if state.epoch != epoch {
                // a newer reload took over while we were loading
                return;
            }
            match result {
                Ok(orders) => {
                    info!("🔄 STORE: published {} orders", orders.len());
                    state.orders = orders;
                }
                Err(e) => {
                    warn!("🔄 STORE: order load failed: {}", e);
                    state.error = Some(e.to_string());
                }
            }
            state.is_loading = false;
        });

        *self.in_flight.lock().unwrap() = Some(handle.abort_handle());

        // A JoinError here means this reload was aborted by a newer one;
        // the newer reload owns the state from that point on.
        let _ = handle.await;
    }

    /// The currently published order snapshot.
    pub fn orders(&self) -> Vec<Order> {
        self.state.lock().unwrap().orders.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().is_loading
    }

    /// Last loader failure, if the most recent completed reload failed.
    pub fn error(&self) -> Option<String> {
        self.state.lock().unwrap().error.clone()
    }
}
