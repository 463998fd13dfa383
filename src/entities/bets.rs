use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bet ledger entry.
/// Notes:
/// - winning_number NULL means pending; once set the bet is settled and never
///   mutated again
/// - the three share columns are materialized at creation so that
///   beneficiary_share + house_share + pool_share == stake_amount exactly
/// - draw_id groups the bets resolved by one settlement batch
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "bets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Bettor identity, normalized to lowercase
    pub bettor_id: String,
    /// Beneficiary receiving a cut of the stake (beneficiaries.id)
    pub beneficiary_id: i64,
    /// Picked number in 0..=numbers_range
    pub chosen_number: i32,
    /// Full stake in the smallest currency unit
    pub stake_amount: i64,
    /// Slice forwarded to the beneficiary
    pub beneficiary_share: i64,
    /// Slice retained by the house
    pub house_share: i64,
    /// Slice contributed to the prize pool (stake minus the other shares)
    pub pool_share: i64,
    pub placed_at: DateTime<Utc>,
    /// Winning number of the draw that settled this bet; NULL = pending
    pub winning_number: Option<i32>,
    /// Meaningful only once settled
    pub is_winner: bool,
    /// Set only for winners
    pub prize_amount: Option<i64>,
    pub settled_at: Option<DateTime<Utc>>,
    /// Identifier of the settlement batch
    pub draw_id: Option<String>,
}

impl Model {
    pub fn is_pending(&self) -> bool {
        self.winning_number.is_none()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::entities::beneficiary_entity::Entity",
        from = "Column::BeneficiaryId",
        to = "crate::entities::beneficiary_entity::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Beneficiary,
}

impl ActiveModelBehavior for ActiveModel {}
