use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cumulative per-bettor statistics, created on first bet.
/// All monetary columns are in the smallest currency unit and only ever grow.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Bettor identity, lowercase
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub total_wagered: i64,
    pub total_winnings: i64,
    /// Amount routed to beneficiaries across all bets
    pub total_contributed: i64,
    pub wins_count: i64,
    pub participation_count: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
