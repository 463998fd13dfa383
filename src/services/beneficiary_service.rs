use crate::entities::beneficiary_entity as beneficiaries;
use crate::error::AppResult;
use crate::models::BeneficiaryResponse;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

#[derive(Clone)]
pub struct BeneficiaryService {
    pool: DatabaseConnection,
}

impl BeneficiaryService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Active beneficiaries with their cumulative totals.
    pub async fn list_active(&self) -> AppResult<Vec<BeneficiaryResponse>> {
        let list = beneficiaries::Entity::find()
            .filter(beneficiaries::Column::IsActive.eq(true))
            .order_by_asc(beneficiaries::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }
}
