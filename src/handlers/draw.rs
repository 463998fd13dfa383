use crate::models::*;
use crate::services::DrawService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/draws",
    tag = "draws",
    request_body = ExecuteDrawRequest,
    responses(
        (status = 200, description = "Draw settled", body = DrawResultResponse),
        (status = 400, description = "Winning number out of range"),
        (status = 500, description = "Draw execution failed; safe to retry")
    )
)]
/// Trigger a draw:
/// 1. Fix the winning number (supplied or random)
/// 2. Settle every pending bet in one atomic batch
/// 3. Broadcast draw-started, numbers-drawn, per-winner ticket-result and
///    draw-completed events
///
/// A draw with no pending bets succeeds with zero winners.
pub async fn execute_draw(
    service: web::Data<DrawService>,
    request: web::Json<ExecuteDrawRequest>,
) -> Result<HttpResponse> {
    match service.execute_draw(request.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/draws",
    tag = "draws",
    params(
        ("page" = Option<u32>, Query, description = "Page number (default 1)"),
        ("page_size" = Option<u32>, Query, description = "Page size (default 20)"),
        ("bettor_id" = Option<String>, Query, description = "Include this bettor's participation per draw")
    ),
    responses(
        (status = 200, description = "Settled draws, newest first", body = SettledDrawPageResponse)
    )
)]
/// Paginated history of settled draws with per-draw winner lists.
pub async fn list_draws(
    service: web::Data<DrawService>,
    query: web::Query<DrawListQuery>,
) -> Result<HttpResponse> {
    match service.list_draws(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn draw_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/draws")
            .route("", web::post().to(execute_draw))
            .route("", web::get().to(list_draws)),
    );
}
