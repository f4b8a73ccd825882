//! Domain models shared by the services in this crate.

pub mod car;
pub mod customer;
pub mod order;
