//! Mapping between the public DTOs in `shared` and the internal domain
//! types. The facade is the only caller; domain code never sees a DTO.

use crate::domain::models::car::Car as DomainCar;
use crate::domain::models::customer::Customer as DomainCustomer;
use crate::domain::models::order::{
    DetailingService as DomainDetailingService, Order as DomainOrder,
    OrderItem as DomainOrderItem, OrderStatus as DomainOrderStatus,
};
use crate::domain::order_analytics::{OrderScope as DomainOrderScope, StatusCount as DomainStatusCount};
use crate::domain::service_analytics::ServiceRevenueSlice as DomainServiceRevenueSlice;
use shared::{
    Car as SharedCar, Customer as SharedCustomer,
    DetailingService as SharedDetailingService, Order as SharedOrder,
    OrderItem as SharedOrderItem, OrderScope as SharedOrderScope,
    OrderStatus as SharedOrderStatus, ServiceRevenueSlice as SharedServiceRevenueSlice,
    StatusCount as SharedStatusCount,
};

pub struct OrderMapper;

impl OrderMapper {
    pub fn to_dto(domain: DomainOrder) -> SharedOrder {
        SharedOrder {
            id: domain.id,
            owner_id: domain.owner_id,
            car_id: domain.car_id,
            date: domain.date.to_rfc3339(),
            items: domain.items.into_iter().map(Self::item_to_dto).collect(),
            total_price: domain.total_price,
            notes: domain.notes,
            status: Self::status_to_dto(domain.status),
        }
    }

    pub fn item_to_dto(domain: DomainOrderItem) -> SharedOrderItem {
        SharedOrderItem {
            id: domain.id,
            service: Self::service_to_dto(domain.service),
            unit_price: domain.unit_price,
            custom_description: domain.custom_description,
        }
    }

    pub fn status_to_dto(domain: DomainOrderStatus) -> SharedOrderStatus {
        match domain {
            DomainOrderStatus::Scheduled => SharedOrderStatus::Scheduled,
            DomainOrderStatus::InProgress => SharedOrderStatus::InProgress,
            DomainOrderStatus::Completed => SharedOrderStatus::Completed,
            DomainOrderStatus::Canceled => SharedOrderStatus::Canceled,
        }
    }

    pub fn service_to_dto(domain: DomainDetailingService) -> SharedDetailingService {
        match domain {
            DomainDetailingService::ExteriorWash => SharedDetailingService::ExteriorWash,
            DomainDetailingService::InteriorCleaning => SharedDetailingService::InteriorCleaning,
            DomainDetailingService::Polishing => SharedDetailingService::Polishing,
            DomainDetailingService::Waxing => SharedDetailingService::Waxing,
            DomainDetailingService::CeramicCoating => SharedDetailingService::CeramicCoating,
            DomainDetailingService::EngineCleaning => SharedDetailingService::EngineCleaning,
            DomainDetailingService::HeadlightRestoration => {
                SharedDetailingService::HeadlightRestoration
            }
            DomainDetailingService::OdorRemoval => SharedDetailingService::OdorRemoval,
            DomainDetailingService::DeepDetailing => SharedDetailingService::DeepDetailing,
            DomainDetailingService::Other => SharedDetailingService::Other,
        }
    }
}

pub struct CustomerMapper;

impl CustomerMapper {
    pub fn to_dto(domain: DomainCustomer) -> SharedCustomer {
        SharedCustomer {
            id: domain.id,
            display_name: domain.display_name,
        }
    }
}

pub struct CarMapper;

impl CarMapper {
    /// The picker DTO carries a prebuilt label instead of the raw car
    /// attributes.
    pub fn to_dto(domain: DomainCar) -> SharedCar {
        SharedCar {
            label: format!("{} {} ({})", domain.brand, domain.model, domain.year),
            id: domain.id,
            owner_id: domain.owner_id,
            license_plate: domain.license_plate,
        }
    }
}

pub struct AnalyticsMapper;

impl AnalyticsMapper {
    pub fn scope_to_domain(dto: SharedOrderScope) -> DomainOrderScope {
        match dto {
            SharedOrderScope::All => DomainOrderScope::All,
            SharedOrderScope::OwnerOnly { owner_id } => DomainOrderScope::OwnerOnly(owner_id),
            SharedOrderScope::CarOnly { car_id } => DomainOrderScope::CarOnly(car_id),
            SharedOrderScope::OwnerAndCar { owner_id, car_id } => {
                DomainOrderScope::OwnerAndCar { owner_id, car_id }
            }
        }
    }

    pub fn status_count_to_dto(domain: DomainStatusCount) -> SharedStatusCount {
        SharedStatusCount {
            status: OrderMapper::status_to_dto(domain.status),
            count: domain.count,
        }
    }

    pub fn revenue_slice_to_dto(domain: DomainServiceRevenueSlice) -> SharedServiceRevenueSlice {
        SharedServiceRevenueSlice {
            service: OrderMapper::service_to_dto(domain.service),
            count: domain.count,
            revenue: domain.revenue,
        }
    }
}
