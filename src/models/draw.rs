use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::PaginatedResponse;

/// Execute-draw request body
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ExecuteDrawRequest {
    /// Winning number override; drawn uniformly at random when omitted
    pub winning_number: Option<i32>,
    /// Only settle bets placed within the configured recent window
    pub restrict_to_recent: Option<bool>,
}

/// One winning ticket in a draw result
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawWinnerResponse {
    pub bettor_id: String,
    pub bet_id: i64,
    pub prize_amount: i64,
    /// 1 when the chosen number matched the winning number
    pub matched: i32,
}

/// Execute-draw response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawResultResponse {
    pub draw_id: String,
    pub winning_number: i32,
    pub winners: Vec<DrawWinnerResponse>,
    /// Synthetic placeholder for a future on-chain backend
    pub tx_hash: String,
    pub total_pool: i64,
    pub participant_count: u64,
}

/// Settled-draw listing query string
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DrawListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// When given, each draw includes this bettor's participation
    pub bettor_id: Option<String>,
}

/// A bettor's own bets within one settled draw
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawParticipationResponse {
    pub bet_id: i64,
    pub chosen_number: i32,
    pub stake_amount: i64,
    pub is_winner: bool,
    pub prize_amount: Option<i64>,
}

/// One settled draw reconstructed from its settlement batch
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SettledDrawResponse {
    pub draw_id: String,
    pub winning_number: i32,
    pub settled_at: DateTime<Utc>,
    pub participant_count: u64,
    pub winner_count: u64,
    pub total_pool: i64,
    pub winners: Vec<DrawWinnerResponse>,
    /// Present only when the query named a bettor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participation: Option<Vec<DrawParticipationResponse>>,
}

pub type SettledDrawPageResponse = PaginatedResponse<SettledDrawResponse>;
