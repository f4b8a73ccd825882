//! Domain model for a customer profile.

use serde::{Deserialize, Serialize};

/// A customer of the detailing shop. Orders and cars reference customers by
/// `id` via their `owner_id` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Customer {
    /// Demo customers matching the owner IDs used by
    /// [`Order::mocks`](super::order::Order::mocks).
    pub fn mocks() -> Vec<Customer> {
        vec![
            Customer {
                id: "user_01".to_string(),
                display_name: "Daniel Fischer".to_string(),
                email: Some("daniel.fischer@example.com".to_string()),
                phone: Some("+1 555 0101".to_string()),
            },
            Customer {
                id: "user_02".to_string(),
                display_name: "Maria Keller".to_string(),
                email: Some("maria.keller@example.com".to_string()),
                phone: None,
            },
            Customer {
                id: "user_03".to_string(),
                display_name: "Tom Albrecht".to_string(),
                email: None,
                phone: Some("+1 555 0303".to_string()),
            },
        ]
    }
}
