use crate::config::LotteryConfig;
use crate::entities::{beneficiary_entity as beneficiaries, bet_entity as bets, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::events::{EventBroadcaster, LotteryEvent, NewTicketPayload};
use crate::models::{PlaceBetRequest, PlaceBetResponse, TicketStatusResponse};
use crate::utils::synthetic_receipt;
use chrono::{Duration, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IsolationLevel,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// Fixed percentage split of a stake. The pool share is the remainder, so the
/// three parts always sum to the stake with no unit lost to rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeSplit {
    pub beneficiary: i64,
    pub house: i64,
    pub pool: i64,
}

pub fn split_stake(stake: i64, beneficiary_percent: i64, house_percent: i64) -> StakeSplit {
    // i128 intermediate: percentage products of any i64 stake cannot overflow
    let beneficiary = (stake as i128 * beneficiary_percent as i128 / 100) as i64;
    let house = (stake as i128 * house_percent as i128 / 100) as i64;
    StakeSplit {
        beneficiary,
        house,
        pool: stake - beneficiary - house,
    }
}

fn check_number_range(number: i32, max: i32) -> AppResult<()> {
    if number < 0 || number > max {
        return Err(AppError::InvalidNumberRange { number, max });
    }
    Ok(())
}

fn check_stake(stake: i64, min_bet: i64, max_bet: i64) -> AppResult<()> {
    if stake < 1 || stake < min_bet {
        return Err(AppError::StakeTooLow { stake, min_bet });
    }
    if stake > max_bet {
        return Err(AppError::StakeTooHigh { stake, max_bet });
    }
    Ok(())
}

fn normalize_bettor_id(raw: &str) -> AppResult<String> {
    let id = raw.trim().to_lowercase();
    if id.is_empty() {
        return Err(AppError::ValidationError("bettor_id must not be empty".into()));
    }
    Ok(id)
}

/// Bet validation and ledger.
#[derive(Clone)]
pub struct BetService {
    pool: DatabaseConnection,
    config: LotteryConfig,
    broadcaster: EventBroadcaster,
}

impl BetService {
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

    /// Place a bet.
    ///
    /// Flow:
    /// 1. Pure checks: number range, stake bounds
    /// 2. Inside one serializable transaction: beneficiary lookup, the
    ///    number-claim check, the pending bet insert, and the bettor and
    ///    beneficiary counter updates (all-or-nothing for the single bet)
    /// 3. After commit: publish the new-ticket event and build a synthetic
    ///    receipt
    pub async fn place_bet(&self, request: PlaceBetRequest) -> AppResult<PlaceBetResponse> {
        let bettor_id = normalize_bettor_id(&request.bettor_id)?;
        let stake = request.stake_amount.unwrap_or(self.config.min_bet);

        check_number_range(request.chosen_number, self.config.numbers_range)?;
        check_stake(stake, self.config.min_bet, self.config.max_bet)?;

        let split = split_stake(
            stake,
            self.config.beneficiary_percent,
            self.config.house_percent,
        );

        // Serializable so two bettors racing for the same number cannot both
        // pass the claim check; the loser's transaction fails and rolls back
        let txn = self
            .pool
            .begin_with_config(Some(IsolationLevel::Serializable), None)
            .await?;

        let beneficiary = beneficiaries::Entity::find_by_id(request.beneficiary_id)
            .filter(beneficiaries::Column::IsActive.eq(true))
            .one(&txn)
            .await?
            .ok_or(AppError::BeneficiaryNotFound(request.beneficiary_id))?;

        // Per-round number exclusivity is a configurable policy; the same
        // bettor may stack bets on their own number
        if self.config.enforce_unique_numbers {
            let claimed = bets::Entity::find()
                .filter(bets::Column::WinningNumber.is_null())
                .filter(bets::Column::ChosenNumber.eq(request.chosen_number))
                .filter(bets::Column::BettorId.ne(&bettor_id))
                .count(&txn)
                .await?;
            if claimed > 0 {
                return Err(AppError::NumberAlreadyTaken(request.chosen_number));
            }
        }

        let bet = bets::ActiveModel {
            bettor_id: Set(bettor_id.clone()),
            beneficiary_id: Set(beneficiary.id),
            chosen_number: Set(request.chosen_number),
            stake_amount: Set(stake),
            beneficiary_share: Set(split.beneficiary),
            house_share: Set(split.house),
            pool_share: Set(split.pool),
            placed_at: Set(Utc::now()),
            is_winner: Set(false),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        self.record_bettor_stake(&txn, &bettor_id, stake, split.beneficiary)
            .await?;

        beneficiaries::Entity::update_many()
            .col_expr(
                beneficiaries::Column::TotalReceived,
                Expr::col(beneficiaries::Column::TotalReceived).add(split.beneficiary),
            )
            .col_expr(
                beneficiaries::Column::BetsSupported,
                Expr::col(beneficiaries::Column::BetsSupported).add(1),
            )
            .col_expr(
                beneficiaries::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(beneficiaries::Column::Id.eq(beneficiary.id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        log::info!(
            "Bet {} placed: bettor={} number={} stake={}",
            bet.id,
            bettor_id,
            request.chosen_number,
            stake
        );

        self.broadcaster.publish(LotteryEvent::NewTicket(NewTicketPayload {
            bet_id: bet.id,
            bettor_id,
            chosen_number: request.chosen_number,
            beneficiary_id: beneficiary.id,
            timestamp: Utc::now(),
        }));

        let receipt = synthetic_receipt();

        Ok(PlaceBetResponse {
            bet_id: bet.id,
            tx_hash: receipt.tx_hash,
            block_number: receipt.block_number,
            beneficiary_share: split.beneficiary,
            pool_share: split.pool,
        })
    }

    /// Ticket status for a bettor: the newest pending bet wins; otherwise a
    /// bet settled within the recency window counts as "completed"; otherwise
    /// there is nothing to report. This endpoint is the source of truth the
    /// client-side poller reconciles against, push events are advisory.
    pub async fn ticket_status(&self, bettor_id: &str) -> AppResult<TicketStatusResponse> {
        let bettor_id = normalize_bettor_id(bettor_id)?;

        if let Some(pending) = bets::Entity::find()
            .filter(bets::Column::BettorId.eq(&bettor_id))
            .filter(bets::Column::WinningNumber.is_null())
            .order_by_desc(bets::Column::PlacedAt)
            .one(&self.pool)
            .await?
        {
            return Ok(TicketStatusResponse::pending(pending));
        }

        let cutoff = Utc::now() - Duration::seconds(self.config.status_recency_secs);
        if let Some(settled) = bets::Entity::find()
            .filter(bets::Column::BettorId.eq(&bettor_id))
            .filter(bets::Column::WinningNumber.is_not_null())
            .filter(bets::Column::SettledAt.gte(cutoff))
            .order_by_desc(bets::Column::SettledAt)
            .one(&self.pool)
            .await?
        {
            return Ok(TicketStatusResponse::completed(settled));
        }

        Ok(TicketStatusResponse::no_pending_tickets())
    }

    /// Create-or-increment the bettor statistics row.
    async fn record_bettor_stake(
        &self,
        txn: &sea_orm::DatabaseTransaction,
        bettor_id: &str,
        stake: i64,
        contributed: i64,
    ) -> AppResult<()> {
        let existing = users::Entity::find_by_id(bettor_id.to_string())
            .one(txn)
            .await?;

        match existing {
            Some(_) => {
                users::Entity::update_many()
                    .col_expr(
                        users::Column::TotalWagered,
                        Expr::col(users::Column::TotalWagered).add(stake),
                    )
                    .col_expr(
                        users::Column::TotalContributed,
                        Expr::col(users::Column::TotalContributed).add(contributed),
                    )
                    .col_expr(
                        users::Column::ParticipationCount,
                        Expr::col(users::Column::ParticipationCount).add(1),
                    )
                    .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
                    .filter(users::Column::Id.eq(bettor_id))
                    .exec(txn)
                    .await?;
            }
            None => {
                users::ActiveModel {
                    id: Set(bettor_id.to_string()),
                    total_wagered: Set(stake),
                    total_winnings: Set(0),
                    total_contributed: Set(contributed),
                    wins_count: Set(0),
                    participation_count: Set(1),
                    ..Default::default()
                }
                .insert(txn)
                .await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_stake_default_percentages() {
        // stake=100, beneficiary=15%, house=5% -> 15 / 5 / 80
        let split = split_stake(100, 15, 5);
        assert_eq!(split.beneficiary, 15);
        assert_eq!(split.house, 5);
        assert_eq!(split.pool, 80);
    }

    #[test]
    fn test_split_stake_conserves_every_unit() {
        for stake in [1, 7, 99, 100, 101, 12345, 1_000_000] {
            let split = split_stake(stake, 15, 5);
            assert_eq!(
                split.beneficiary + split.house + split.pool,
                stake,
                "lost currency units for stake {stake}"
            );
        }
    }

    #[test]
    fn test_split_stake_rounds_down_and_pools_the_remainder() {
        // floor(99*15/100)=14, floor(99*5/100)=4, remainder 81 goes to pool
        let split = split_stake(99, 15, 5);
        assert_eq!(split.beneficiary, 14);
        assert_eq!(split.house, 4);
        assert_eq!(split.pool, 81);
    }

    #[test]
    fn test_check_number_range() {
        assert!(check_number_range(0, 99).is_ok());
        assert!(check_number_range(99, 99).is_ok());
        assert!(matches!(
            check_number_range(100, 99),
            Err(AppError::InvalidNumberRange { number: 100, max: 99 })
        ));
        assert!(matches!(
            check_number_range(-1, 99),
            Err(AppError::InvalidNumberRange { .. })
        ));
    }

    #[test]
    fn test_split_stake_extreme_stake_does_not_overflow() {
        // Stakes near the i64 ceiling must still split exactly, with every
        // share non-negative
        for stake in [i64::MAX / 10, i64::MAX] {
            let split = split_stake(stake, 15, 5);
            assert!(split.beneficiary >= 0);
            assert!(split.house >= 0);
            assert!(split.pool >= 0);
            assert_eq!(split.beneficiary + split.house + split.pool, stake);
        }
    }

    #[test]
    fn test_check_stake() {
        assert!(check_stake(100, 100, 1_000_000).is_ok());
        assert!(check_stake(500, 100, 1_000_000).is_ok());
        assert!(matches!(
            check_stake(99, 100, 1_000_000),
            Err(AppError::StakeTooLow { stake: 99, min_bet: 100 })
        ));
        assert!(matches!(
            check_stake(0, 0, 1_000_000),
            Err(AppError::StakeTooLow { .. })
        ));
    }

    #[test]
    fn test_check_stake_rejects_above_maximum() {
        assert!(check_stake(1_000_000, 100, 1_000_000).is_ok());
        assert!(matches!(
            check_stake(1_000_001, 100, 1_000_000),
            Err(AppError::StakeTooHigh {
                stake: 1_000_001,
                max_bet: 1_000_000
            })
        ));
    }

    #[test]
    fn test_normalize_bettor_id() {
        assert_eq!(normalize_bettor_id(" Alice ").unwrap(), "alice");
        assert_eq!(normalize_bettor_id("0xAbC123").unwrap(), "0xabc123");
        assert!(normalize_bettor_id("   ").is_err());
    }
}
