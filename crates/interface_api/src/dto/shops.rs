//! Repair shop DTOs

use serde::{Deserialize, Serialize};

use domain_claims::RepairShop;

#[derive(Debug, Serialize, Deserialize)]
pub struct RepairShopsResponse {
    pub success: bool,
    pub repair_shops: Vec<RepairShop>,
}
