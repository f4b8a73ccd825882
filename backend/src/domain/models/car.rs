//! Domain model for a customer's car.

use serde::{Deserialize, Serialize};

/// Body type of a car, as picked during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyType {
    Sedan,
    Hatchback,
    Suv,
    Coupe,
    Convertible,
    Pickup,
    Minivan,
    Wagon,
    Other,
}

/// A car registered by a customer. Orders reference cars by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: String,
    pub owner_id: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub body_type: BodyType,
    pub color: Option<String>,
    pub license_plate: Option<String>,
    pub mileage: Option<u32>,
}

impl Car {
    /// Demo fleet matching the IDs used by
    /// [`Order::mocks`](super::order::Order::mocks).
    pub fn mocks() -> Vec<Car> {
        vec![
            Car {
                id: "car_bmw_x5".to_string(),
                owner_id: "user_01".to_string(),
                brand: "BMW".to_string(),
                model: "X5".to_string(),
                year: 2021,
                body_type: BodyType::Suv,
                color: Some("Black".to_string()),
                license_plate: Some("A123BC77".to_string()),
                mileage: Some(35_000),
            },
            Car {
                id: "car_toyota_camry".to_string(),
                owner_id: "user_01".to_string(),
                brand: "Toyota".to_string(),
                model: "Camry".to_string(),
                year: 2018,
                body_type: BodyType::Sedan,
                color: Some("White".to_string()),
                license_plate: Some("D555EE77".to_string()),
                mileage: Some(82_000),
            },
            Car {
                id: "car_audi_a6".to_string(),
                owner_id: "user_02".to_string(),
                brand: "Audi".to_string(),
                model: "A6".to_string(),
                year: 2020,
                body_type: BodyType::Sedan,
                color: Some("Grey".to_string()),
                license_plate: Some("E777TT99".to_string()),
                mileage: Some(27_000),
            },
            Car {
                id: "car_mercedes_gls450".to_string(),
                owner_id: "user_03".to_string(),
                brand: "Mercedes-Benz".to_string(),
                model: "GLS 450".to_string(),
                year: 2022,
                body_type: BodyType::Suv,
                color: Some("Metallic blue".to_string()),
                license_plate: Some("M123MM77".to_string()),
                mileage: Some(12_000),
            },
            Car {
                id: "car_ford_ranger".to_string(),
                owner_id: "user_03".to_string(),
                brand: "Ford".to_string(),
                model: "Ranger".to_string(),
                year: 2019,
                body_type: BodyType::Pickup,
                color: Some("Orange".to_string()),
                license_plate: Some("F999FF77".to_string()),
                mileage: Some(56_000),
            },
        ]
    }
}
