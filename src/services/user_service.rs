use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::BettorStatsResponse;
use sea_orm::{DatabaseConnection, EntityTrait};

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Cumulative statistics for one bettor. The row exists from the first
    /// placed bet onward.
    pub async fn get_bettor_stats(&self, bettor_id: &str) -> AppResult<BettorStatsResponse> {
        let bettor_id = bettor_id.trim().to_lowercase();
        let user = users::Entity::find_by_id(bettor_id.clone())
            .one(&self.pool)
            .await?
            .ok_or(AppError::BettorNotFound(bettor_id))?;
        Ok(user.into())
    }
}
