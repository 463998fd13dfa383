use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Chosen number {number} is outside the valid range 0..={max}")]
    InvalidNumberRange { number: i32, max: i32 },

    #[error("Beneficiary {0} not found or inactive")]
    BeneficiaryNotFound(i64),

    #[error("Stake {stake} is below the minimum bet of {min_bet}")]
    StakeTooLow { stake: i64, min_bet: i64 },

    #[error("Stake {stake} exceeds the maximum bet of {max_bet}")]
    StakeTooHigh { stake: i64, max_bet: i64 },

    #[error("Number {0} is already taken by another pending bet")]
    NumberAlreadyTaken(i32),

    #[error("Bettor not found: {0}")]
    BettorNotFound(String),

    #[error("Draw execution failed: {0}")]
    DrawExecutionFailed(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            AppError::InvalidNumberRange { .. } => {
                log::warn!("Rejected bet: {self}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "INVALID_NUMBER_RANGE",
                    self.to_string(),
                )
            }
            AppError::BeneficiaryNotFound(_) => {
                log::warn!("Rejected bet: {self}");
                (
                    actix_web::http::StatusCode::NOT_FOUND,
                    "BENEFICIARY_NOT_FOUND",
                    self.to_string(),
                )
            }
            AppError::StakeTooLow { .. } => {
                log::warn!("Rejected bet: {self}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "STAKE_TOO_LOW",
                    self.to_string(),
                )
            }
            AppError::StakeTooHigh { .. } => {
                log::warn!("Rejected bet: {self}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "STAKE_TOO_HIGH",
                    self.to_string(),
                )
            }
            AppError::NumberAlreadyTaken(_) => {
                log::warn!("Rejected bet: {self}");
                (
                    actix_web::http::StatusCode::CONFLICT,
                    "NUMBER_ALREADY_TAKEN",
                    self.to_string(),
                )
            }
            AppError::BettorNotFound(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "BETTOR_NOT_FOUND",
                self.to_string(),
            ),
            AppError::DrawExecutionFailed(reason) => {
                // Operators get the cause; clients get a retryable generic
                log::error!("Draw execution failed: {reason}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "DRAW_EXECUTION_FAILED",
                    "Could not complete the draw, please try again".to_string(),
                )
            }
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::NotFound(msg) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                msg.clone(),
            ),
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Database error".to_string(),
                )
            }
            _ => {
                log::error!("Internal error: {self}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        }))
    }
}
