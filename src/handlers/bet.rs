use crate::models::*;
use crate::services::BetService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/bets",
    tag = "bets",
    request_body = PlaceBetRequest,
    responses(
        (status = 200, description = "Bet placed", body = PlaceBetResponse),
        (status = 400, description = "Number out of range or stake out of bounds"),
        (status = 404, description = "Beneficiary not found or inactive"),
        (status = 409, description = "Number already taken by another pending bet")
    )
)]
/// Place a bet on a number:
/// 1. Validate number range, beneficiary, stake, and number availability
/// 2. Record the pending bet with its stake split
/// 3. Update bettor and beneficiary cumulative statistics
/// 4. Broadcast a new-ticket event and return a synthetic receipt
pub async fn place_bet(
    service: web::Data<BetService>,
    request: web::Json<PlaceBetRequest>,
) -> Result<HttpResponse> {
    match service.place_bet(request.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/bets/status",
    tag = "bets",
    params(
        ("bettor_id" = String, Query, description = "Bettor identity (case-insensitive)")
    ),
    responses(
        (status = 200, description = "Ticket status", body = TicketStatusResponse)
    )
)]
/// Current ticket status for a bettor. This is the authoritative fallback
/// for clients that missed push events: `pending` with the open bet,
/// `completed` with a recently settled bet, or `no_pending_tickets`.
pub async fn ticket_status(
    service: web::Data<BetService>,
    query: web::Query<TicketStatusQuery>,
) -> Result<HttpResponse> {
    match service.ticket_status(&query.bettor_id).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn bet_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bets")
            .route("", web::post().to(place_bet))
            .route("/status", web::get().to(ticket_status)),
    );
}
