use crate::config::LotteryConfig;
use crate::entities::{bet_entity as bets, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::events::{
    DrawCompletedPayload, DrawStartedPayload, EventBroadcaster, LotteryEvent, NumbersDrawnPayload,
    TicketResultPayload,
};
use crate::models::{
    DrawListQuery, DrawParticipationResponse, DrawResultResponse, DrawWinnerResponse,
    ExecuteDrawRequest, PaginatedResponse, PaginationParams, SettledDrawResponse,
};
use crate::utils::synthetic_receipt;
use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, IsolationLevel, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

/// Advisory duration announced in the draw-started event.
const ESTIMATED_DRAW_DURATION_SECS: u64 = 10;

/// Per-winner prize: the pool split evenly, rounded down. The division
/// remainder stays undistributed for this draw.
fn prize_per_winner(total_pool: i64, winner_count: usize) -> i64 {
    if winner_count == 0 {
        return 0;
    }
    total_pool / winner_count as i64
}

/// Split the candidate batch into winners and losers.
fn partition_by_number(
    candidates: Vec<bets::Model>,
    winning_number: i32,
) -> (Vec<bets::Model>, Vec<bets::Model>) {
    candidates
        .into_iter()
        .partition(|bet| bet.chosen_number == winning_number)
}

struct SettlementOutcome {
    winners: Vec<bets::Model>,
    prize_per_winner: i64,
    total_pool: i64,
    participant_count: u64,
}

/// Draw settlement engine.
#[derive(Clone)]
pub struct DrawService {
    pool: DatabaseConnection,
    config: LotteryConfig,
    broadcaster: EventBroadcaster,
}

impl DrawService {
    pub fn new(
        pool: DatabaseConnection,
        config: LotteryConfig,
        broadcaster: EventBroadcaster,
    ) -> Self {
        Self {
            pool,
            config,
            broadcaster,
        }
    }

    /// Run one draw: fix a winning number, settle every pending bet in the
    /// batch, then publish the lifecycle events in their fixed order.
    ///
    /// The whole batch update runs in a single serializable transaction and
    /// every update is keyed on `winning_number IS NULL`, so a concurrent
    /// second invocation sees zero eligible rows. An empty candidate set is
    /// not an error: the draw returns zero winners and a zero pool, which
    /// makes a failed draw safe to re-run.
    pub async fn execute_draw(&self, request: ExecuteDrawRequest) -> AppResult<DrawResultResponse> {
        let winning_number = match request.winning_number {
            Some(number) => {
                if number < 0 || number > self.config.numbers_range {
                    return Err(AppError::InvalidNumberRange {
                        number,
                        max: self.config.numbers_range,
                    });
                }
                number
            }
            None => rand::thread_rng().gen_range(0..=self.config.numbers_range),
        };

        let draw_id = Uuid::new_v4().to_string();
        let restrict = request.restrict_to_recent.unwrap_or(false);

        let outcome = self
            .settle(winning_number, restrict, &draw_id)
            .await
            .map_err(|e| match e {
                AppError::DatabaseError(err) => AppError::DrawExecutionFailed(err.to_string()),
                other => other,
            })?;

        log::info!(
            "Draw {draw_id} settled: winning_number={winning_number} participants={} winners={} pool={}",
            outcome.participant_count,
            outcome.winners.len(),
            outcome.total_pool
        );

        // Published after commit so the stream never reports state that did
        // not become durable; order within one draw is fixed
        self.broadcaster
            .publish(LotteryEvent::DrawStarted(DrawStartedPayload {
                draw_id: draw_id.clone(),
                participant_count: outcome.participant_count,
                estimated_duration_secs: ESTIMATED_DRAW_DURATION_SECS,
                timestamp: Utc::now(),
            }));
        self.broadcaster
            .publish(LotteryEvent::NumbersDrawn(NumbersDrawnPayload {
                draw_id: draw_id.clone(),
                winning_number,
                timestamp: Utc::now(),
            }));
        for winner in &outcome.winners {
            self.broadcaster
                .publish(LotteryEvent::TicketResult(TicketResultPayload {
                    draw_id: draw_id.clone(),
                    bet_id: winner.id,
                    bettor_id: winner.bettor_id.clone(),
                    winning_number,
                    is_winner: true,
                    prize_amount: outcome.prize_per_winner,
                    timestamp: Utc::now(),
                }));
        }
        self.broadcaster
            .publish(LotteryEvent::DrawCompleted(DrawCompletedPayload {
                draw_id: draw_id.clone(),
                winning_number,
                winner_count: outcome.winners.len() as u64,
                participant_count: outcome.participant_count,
                timestamp: Utc::now(),
            }));

        let receipt = synthetic_receipt();
        let winners = outcome
            .winners
            .iter()
            .map(|bet| DrawWinnerResponse {
                bettor_id: bet.bettor_id.clone(),
                bet_id: bet.id,
                prize_amount: outcome.prize_per_winner,
                matched: 1,
            })
            .collect();

        Ok(DrawResultResponse {
            draw_id,
            winning_number,
            winners,
            tx_hash: receipt.tx_hash,
            total_pool: outcome.total_pool,
            participant_count: outcome.participant_count,
        })
    }

    /// Settled draws, newest first, grouped by settlement batch.
    pub async fn list_draws(
        &self,
        query: &DrawListQuery,
    ) -> AppResult<PaginatedResponse<SettledDrawResponse>> {
        let params = PaginationParams::new(query.page, query.page_size);
        let bettor_id = query
            .bettor_id
            .as_ref()
            .map(|b| b.trim().to_lowercase())
            .filter(|b| !b.is_empty());

        let mut count_query = bets::Entity::find()
            .select_only()
            .column_as(Expr::cust("COUNT(DISTINCT draw_id)"), "total")
            .filter(bets::Column::DrawId.is_not_null());
        if let Some(bettor) = &bettor_id {
            count_query = count_query.filter(bets::Column::BettorId.eq(bettor));
        }
        let total: i64 = count_query
            .into_tuple()
            .one(&self.pool)
            .await?
            .unwrap_or(0);

        let mut grouped = bets::Entity::find()
            .select_only()
            .column(bets::Column::DrawId)
            .filter(bets::Column::DrawId.is_not_null());
        if let Some(bettor) = &bettor_id {
            grouped = grouped.filter(bets::Column::BettorId.eq(bettor));
        }
        let page_draw_ids: Vec<Option<String>> = grouped
            .group_by(bets::Column::DrawId)
            .order_by_desc(bets::Column::SettledAt.max())
            .offset(params.get_offset() as u64)
            .limit(params.get_limit() as u64)
            .into_tuple()
            .all(&self.pool)
            .await?;
        let draw_ids: Vec<String> = page_draw_ids.into_iter().flatten().collect();

        if draw_ids.is_empty() {
            return Ok(PaginatedResponse::new(
                vec![],
                params.get_page(),
                params.get_page_size(),
                total,
            ));
        }

        // One fetch for the full batches of every draw on the page; the
        // per-bettor participation view is filtered from the same rows
        let batch = bets::Entity::find()
            .filter(bets::Column::DrawId.is_in(draw_ids.clone()))
            .order_by_desc(bets::Column::PlacedAt)
            .all(&self.pool)
            .await?;

        let mut by_draw: HashMap<String, Vec<bets::Model>> = HashMap::new();
        for bet in batch {
            if let Some(id) = bet.draw_id.clone() {
                by_draw.entry(id).or_default().push(bet);
            }
        }

        let mut items = Vec::with_capacity(draw_ids.len());
        for draw_id in draw_ids {
            let Some(draw_bets) = by_draw.remove(&draw_id) else {
                continue;
            };
            let winning_number = draw_bets
                .iter()
                .find_map(|b| b.winning_number)
                .unwrap_or_default();
            let settled_at = draw_bets
                .iter()
                .filter_map(|b| b.settled_at)
                .max()
                .unwrap_or_else(Utc::now);
            let total_pool: i64 = draw_bets.iter().map(|b| b.pool_share).sum();
            let winners: Vec<DrawWinnerResponse> = draw_bets
                .iter()
                .filter(|b| b.is_winner)
                .map(|b| DrawWinnerResponse {
                    bettor_id: b.bettor_id.clone(),
                    bet_id: b.id,
                    prize_amount: b.prize_amount.unwrap_or(0),
                    matched: 1,
                })
                .collect();
            let participation = bettor_id.as_ref().map(|bettor| {
                draw_bets
                    .iter()
                    .filter(|b| &b.bettor_id == bettor)
                    .map(|b| DrawParticipationResponse {
                        bet_id: b.id,
                        chosen_number: b.chosen_number,
                        stake_amount: b.stake_amount,
                        is_winner: b.is_winner,
                        prize_amount: b.prize_amount,
                    })
                    .collect()
            });

            items.push(SettledDrawResponse {
                draw_id,
                winning_number,
                settled_at,
                participant_count: draw_bets.len() as u64,
                winner_count: winners.len() as u64,
                total_pool,
                winners,
                participation,
            });
        }

        Ok(PaginatedResponse::new(
            items,
            params.get_page(),
            params.get_page_size(),
            total,
        ))
    }

    /// Settle all pending bets against the winning number inside one
    /// serializable transaction.
    async fn settle(
        &self,
        winning_number: i32,
        restrict_to_recent: bool,
        draw_id: &str,
    ) -> AppResult<SettlementOutcome> {
        let txn = self
            .pool
            .begin_with_config(Some(IsolationLevel::Serializable), None)
            .await?;

        let mut candidates_query =
            bets::Entity::find().filter(bets::Column::WinningNumber.is_null());
        if restrict_to_recent {
            let cutoff = Utc::now() - Duration::hours(self.config.recent_window_hours);
            candidates_query = candidates_query.filter(bets::Column::PlacedAt.gte(cutoff));
        }
        let candidates = candidates_query.all(&txn).await?;

        if candidates.is_empty() {
            txn.commit().await?;
            return Ok(SettlementOutcome {
                winners: vec![],
                prize_per_winner: 0,
                total_pool: 0,
                participant_count: 0,
            });
        }

        let participant_count = candidates.len() as u64;
        // Pool resets every draw: only the current batch contributes
        let total_pool: i64 = candidates.iter().map(|b| b.pool_share).sum();
        let (winners, losers) = partition_by_number(candidates, winning_number);
        let prize = prize_per_winner(total_pool, winners.len());
        let now = Utc::now();

        if !winners.is_empty() {
            let winner_ids: Vec<i64> = winners.iter().map(|b| b.id).collect();
            bets::Entity::update_many()
                .col_expr(bets::Column::WinningNumber, Expr::value(winning_number))
                .col_expr(bets::Column::IsWinner, Expr::value(true))
                .col_expr(bets::Column::PrizeAmount, Expr::value(prize))
                .col_expr(bets::Column::SettledAt, Expr::value(now))
                .col_expr(bets::Column::DrawId, Expr::value(draw_id))
                .filter(bets::Column::Id.is_in(winner_ids))
                .filter(bets::Column::WinningNumber.is_null())
                .exec(&txn)
                .await?;

            // One credit per winning ticket, not per bettor
            for winner in &winners {
                users::Entity::update_many()
                    .col_expr(
                        users::Column::TotalWinnings,
                        Expr::col(users::Column::TotalWinnings).add(prize),
                    )
                    .col_expr(
                        users::Column::WinsCount,
                        Expr::col(users::Column::WinsCount).add(1),
                    )
                    .col_expr(users::Column::UpdatedAt, Expr::value(now))
                    .filter(users::Column::Id.eq(&winner.bettor_id))
                    .exec(&txn)
                    .await?;
            }
        }

        if !losers.is_empty() {
            let loser_ids: Vec<i64> = losers.iter().map(|b| b.id).collect();
            bets::Entity::update_many()
                .col_expr(bets::Column::WinningNumber, Expr::value(winning_number))
                .col_expr(bets::Column::IsWinner, Expr::value(false))
                .col_expr(bets::Column::SettledAt, Expr::value(now))
                .col_expr(bets::Column::DrawId, Expr::value(draw_id))
                .filter(bets::Column::Id.is_in(loser_ids))
                .filter(bets::Column::WinningNumber.is_null())
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        Ok(SettlementOutcome {
            winners,
            prize_per_winner: prize,
            total_pool,
            participant_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bet(id: i64, bettor: &str, chosen_number: i32, pool_share: i64) -> bets::Model {
        bets::Model {
            id,
            bettor_id: bettor.to_string(),
            beneficiary_id: 1,
            chosen_number,
            stake_amount: pool_share * 100 / 80,
            beneficiary_share: 0,
            house_share: 0,
            pool_share,
            placed_at: Utc::now(),
            winning_number: None,
            is_winner: false,
            prize_amount: None,
            settled_at: None,
            draw_id: None,
        }
    }

    #[test]
    fn test_prize_per_winner_zero_winners() {
        assert_eq!(prize_per_winner(1000, 0), 0);
    }

    #[test]
    fn test_prize_per_winner_single_winner_takes_full_pool() {
        assert_eq!(prize_per_winner(160, 1), 160);
    }

    #[test]
    fn test_prize_per_winner_truncates_and_never_overdistributes() {
        let prize = prize_per_winner(100, 3);
        assert_eq!(prize, 33);
        assert!(prize * 3 <= 100);

        for (pool, count) in [(1, 2), (999, 7), (80, 4)] {
            let prize = prize_per_winner(pool, count);
            assert!(prize * count as i64 <= pool);
        }
    }

    #[test]
    fn test_partition_matches_winning_number() {
        let candidates = vec![
            make_bet(1, "alice", 7, 80),
            make_bet(2, "bob", 42, 80),
            make_bet(3, "carol", 7, 80),
        ];
        let (winners, losers) = partition_by_number(candidates, 7);
        assert_eq!(winners.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(losers.iter().map(|b| b.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_two_bettors_one_match_scenario() {
        // numbers 7 and 42, draw with 7: one winner taking the whole pool
        let candidates = vec![make_bet(1, "alice", 7, 80), make_bet(2, "bob", 42, 80)];
        let total_pool: i64 = candidates.iter().map(|b| b.pool_share).sum();
        let (winners, losers) = partition_by_number(candidates, 7);

        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].bettor_id, "alice");
        assert_eq!(losers.len(), 1);
        assert_eq!(prize_per_winner(total_pool, winners.len()), 160);
    }

    #[test]
    fn test_no_winners_leaves_pool_undistributed() {
        let candidates = vec![make_bet(1, "alice", 3, 80), make_bet(2, "bob", 4, 80)];
        let total_pool: i64 = candidates.iter().map(|b| b.pool_share).sum();
        let (winners, losers) = partition_by_number(candidates, 99);

        assert!(winners.is_empty());
        assert_eq!(losers.len(), 2);
        assert_eq!(total_pool, 160);
        assert_eq!(prize_per_winner(total_pool, winners.len()), 0);
    }
}
