use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::bet_entity;

/// Place-bet request body
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PlaceBetRequest {
    /// Bettor identity (case-insensitive, normalized to lowercase)
    pub bettor_id: String,
    /// Picked number in 0..=numbers_range
    pub chosen_number: i32,
    /// Beneficiary receiving a share of the stake
    pub beneficiary_id: i64,
    /// Stake in the smallest currency unit; defaults to the configured minimum
    pub stake_amount: Option<i64>,
}

/// Place-bet response. tx_hash/block_number are synthetic placeholders kept
/// for interface compatibility with a future on-chain settlement backend.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlaceBetResponse {
    pub bet_id: i64,
    pub tx_hash: String,
    pub block_number: u64,
    pub beneficiary_share: i64,
    pub pool_share: i64,
}

/// Full bet view returned by the ticket-status endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BetResponse {
    pub id: i64,
    pub bettor_id: String,
    pub beneficiary_id: i64,
    pub chosen_number: i32,
    pub stake_amount: i64,
    pub beneficiary_share: i64,
    pub pool_share: i64,
    pub placed_at: DateTime<Utc>,
    /// NULL while the bet is pending
    pub winning_number: Option<i32>,
    pub is_winner: bool,
    pub prize_amount: Option<i64>,
    pub settled_at: Option<DateTime<Utc>>,
    pub draw_id: Option<String>,
}

impl From<bet_entity::Model> for BetResponse {
    fn from(m: bet_entity::Model) -> Self {
        BetResponse {
            id: m.id,
            bettor_id: m.bettor_id,
            beneficiary_id: m.beneficiary_id,
            chosen_number: m.chosen_number,
            stake_amount: m.stake_amount,
            beneficiary_share: m.beneficiary_share,
            pool_share: m.pool_share,
            placed_at: m.placed_at,
            winning_number: m.winning_number,
            is_winner: m.is_winner,
            prize_amount: m.prize_amount,
            settled_at: m.settled_at,
            draw_id: m.draw_id,
        }
    }
}

/// Ticket-status query string
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct TicketStatusQuery {
    pub bettor_id: String,
}

/// Ticket-status response: `pending` with the open bet, `completed` with a
/// recently settled bet, or `no_pending_tickets`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TicketStatusResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bet: Option<BetResponse>,
}

impl TicketStatusResponse {
    pub fn pending(bet: bet_entity::Model) -> Self {
        Self {
            status: "pending".to_string(),
            bet: Some(bet.into()),
        }
    }

    pub fn completed(bet: bet_entity::Model) -> Self {
        Self {
            status: "completed".to_string(),
            bet: Some(bet.into()),
        }
    }

    pub fn no_pending_tickets() -> Self {
        Self {
            status: "no_pending_tickets".to_string(),
            bet: None,
        }
    }
}
