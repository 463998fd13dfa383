use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;

/// Bettors (keyed by a case-insensitive external identity, stored lowercase)
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    TotalWagered,
    TotalWinnings,
    TotalContributed,
    WinsCount,
    ParticipationCount,
    CreatedAt,
    UpdatedAt,
}

/// Causes receiving a share of every stake
#[derive(DeriveIden)]
enum Beneficiaries {
    Table,
    Id,
    Name,
    Description,
    IsActive,
    TotalReceived,
    BetsSupported,
    CreatedAt,
    UpdatedAt,
}

/// One wager on one chosen number.
/// winning_number NULL = pending; non-NULL = settled (terminal).
#[derive(DeriveIden)]
enum Bets {
    Table,
    Id,
    BettorId,
    BeneficiaryId,
    ChosenNumber,
    StakeAmount,
    BeneficiaryShare,
    HouseShare,
    PoolShare,
    PlacedAt,
    WinningNumber,
    IsWinner,
    PrizeAmount,
    SettledAt,
    DrawId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// All money columns hold the smallest currency unit (integer cents).
/// The stake split is materialized at bet creation so that
/// beneficiary_share + house_share + pool_share always equals stake_amount.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Bettor cumulative statistics
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .string_len(255)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::TotalWagered)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Users::TotalWinnings)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Users::TotalContributed)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Users::WinsCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Users::ParticipationCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // Beneficiary table
        manager
            .create_table(
                Table::create()
                    .table(Beneficiaries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Beneficiaries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Beneficiaries::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Beneficiaries::Description)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Beneficiaries::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Beneficiaries::TotalReceived)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Beneficiaries::BetsSupported)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Beneficiaries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Beneficiaries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // Beneficiary names unique (seed insert relies on it)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_beneficiaries_name_unique")
                    .table(Beneficiaries::Table)
                    .col(Beneficiaries::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Bet ledger
        manager
            .create_table(
                Table::create()
                    .table(Bets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bets::BettorId).string_len(255).not_null())
                    .col(ColumnDef::new(Bets::BeneficiaryId).big_integer().not_null())
                    .col(ColumnDef::new(Bets::ChosenNumber).integer().not_null())
                    .col(ColumnDef::new(Bets::StakeAmount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Bets::BeneficiaryShare)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bets::HouseShare).big_integer().not_null())
                    .col(ColumnDef::new(Bets::PoolShare).big_integer().not_null())
                    .col(
                        ColumnDef::new(Bets::PlacedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(ColumnDef::new(Bets::WinningNumber).integer().null())
                    .col(
                        ColumnDef::new(Bets::IsWinner)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Bets::PrizeAmount).big_integer().null())
                    .col(
                        ColumnDef::new(Bets::SettledAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Bets::DrawId).string_len(64).null())
                    .to_owned(),
            )
            .await?;

        // Status queries: newest bet per bettor
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bets_bettor_placed_at")
                    .table(Bets::Table)
                    .col(Bets::BettorId)
                    .col(Bets::PlacedAt)
                    .to_owned(),
            )
            .await?;

        // Settlement scans and number-claim checks filter on winning_number IS NULL
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bets_winning_number")
                    .table(Bets::Table)
                    .col(Bets::WinningNumber)
                    .to_owned(),
            )
            .await?;

        // Settled-draw listing groups by draw_id
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bets_draw_id")
                    .table(Bets::Table)
                    .col(Bets::DrawId)
                    .to_owned(),
            )
            .await?;

        // Foreign key (no cascade, bet history must survive beneficiary changes)
        manager
            .alter_table(
                Table::alter()
                    .table(Bets::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_bets_beneficiary")
                            .from_tbl(Bets::Table)
                            .from_col(Bets::BeneficiaryId)
                            .to_tbl(Beneficiaries::Table)
                            .to_col(Beneficiaries::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Seed beneficiaries
        let conn = manager.get_connection();
        let insert_sql = r#"
INSERT INTO beneficiaries (name, description, is_active)
VALUES
 ('Clean Water Initiative', 'Well construction and water purification projects', TRUE),
 ('Open Books Foundation', 'School libraries and literacy programs', TRUE),
 ('Food Bank Network', 'Community food distribution', TRUE)
ON CONFLICT (name) DO NOTHING;
"#;
        conn.execute(Statement::from_string(
            manager.get_database_backend(),
            insert_sql.to_string(),
        ))
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop order: bets -> beneficiaries -> users
        manager
            .drop_table(Table::drop().if_exists().table(Bets::Table).to_owned())
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(Beneficiaries::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}
