use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::user_entity;

/// Cumulative bettor statistics
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BettorStatsResponse {
    pub bettor_id: String,
    pub total_wagered: i64,
    pub total_winnings: i64,
    pub total_contributed: i64,
    pub wins_count: i64,
    pub participation_count: i64,
}

impl From<user_entity::Model> for BettorStatsResponse {
    fn from(m: user_entity::Model) -> Self {
        BettorStatsResponse {
            bettor_id: m.id,
            total_wagered: m.total_wagered,
            total_winnings: m.total_winnings,
            total_contributed: m.total_contributed,
            wins_count: m.wins_count,
            participation_count: m.participation_count,
        }
    }
}
