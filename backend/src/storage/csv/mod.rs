//! CSV storage backend.

pub mod connection;
pub mod order_repository;

pub use connection::CsvConnection;
pub use order_repository::OrderRepository;
