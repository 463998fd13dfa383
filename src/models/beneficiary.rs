use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::beneficiary_entity;

/// Beneficiary listing entry
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BeneficiaryResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    /// Cumulative funds received, smallest currency unit
    pub total_received: i64,
    pub bets_supported: i64,
}

impl From<beneficiary_entity::Model> for BeneficiaryResponse {
    fn from(m: beneficiary_entity::Model) -> Self {
        BeneficiaryResponse {
            id: m.id,
            name: m.name,
            description: m.description,
            is_active: m.is_active,
            total_received: m.total_received,
            bets_supported: m.bets_supported,
        }
    }
}
