use crate::models::*;
use crate::services::UserService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/bettors/{bettor_id}",
    tag = "bettors",
    params(
        ("bettor_id" = String, Path, description = "Bettor identity (case-insensitive)")
    ),
    responses(
        (status = 200, description = "Bettor statistics", body = BettorStatsResponse),
        (status = 404, description = "Bettor has never placed a bet")
    )
)]
/// Cumulative statistics for one bettor.
pub async fn get_bettor_stats(
    service: web::Data<UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match service.get_bettor_stats(&path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn bettor_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bettors").route("/{bettor_id}", web::get().to(get_bettor_stats)),
    );
}
