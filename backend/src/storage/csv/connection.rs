//! CSV storage connection.

use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::traits::Connection;
use super::order_repository::OrderRepository;

/// CsvConnection manages file paths and ensures the CSV files exist.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory, creating the
    /// directory if it does not exist yet.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the orders CSV file.
    pub fn orders_file_path(&self) -> PathBuf {
        self.base_directory.join("orders.csv")
    }

    /// Create the orders file with its header row if it does not exist.
    pub fn ensure_orders_file_exists(&self) -> Result<()> {
        let path = self.orders_file_path();
        if !path.exists() {
            let mut writer = csv::Writer::from_path(&path)?;
            writer.write_record(OrderRepository::HEADER)?;
            writer.flush()?;
        }
        Ok(())
    }
}

impl Connection for CsvConnection {
    type OrderRepository = OrderRepository;

    fn create_order_repository(&self) -> Self::OrderRepository {
        OrderRepository::new(self.clone())
    }
}
