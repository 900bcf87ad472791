//! Approved repair shops

use serde::{Deserialize, Serialize};

use core_kernel::RepairShopId;

/// A repair shop approved for claim work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairShop {
    pub id: RepairShopId,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl RepairShop {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RepairShopId::new_v7(),
            name: name.into(),
            address: None,
            phone: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}
