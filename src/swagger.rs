use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::bet::place_bet,
        handlers::bet::ticket_status,
        handlers::draw::execute_draw,
        handlers::draw::list_draws,
        handlers::beneficiary::list_beneficiaries,
        handlers::user::get_bettor_stats,
        handlers::stream::events,
    ),
    components(
        schemas(
            PlaceBetRequest,
            PlaceBetResponse,
            BetResponse,
            TicketStatusQuery,
            TicketStatusResponse,
            ExecuteDrawRequest,
            DrawResultResponse,
            DrawWinnerResponse,
            DrawListQuery,
            DrawParticipationResponse,
            SettledDrawResponse,
            BeneficiaryResponse,
            BettorStatsResponse,
            ApiError,
            PaginationParams,
        )
    ),
    tags(
        (name = "bets", description = "Bet placement and ticket status API"),
        (name = "draws", description = "Draw settlement and history API"),
        (name = "beneficiaries", description = "Beneficiary listing API"),
        (name = "bettors", description = "Bettor statistics API"),
        (name = "events", description = "Server-Sent-Events result stream"),
    ),
    info(
        title = "Causelotto Backend API",
        version = "1.0.0",
        description = "Charity number-lottery REST API documentation",
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
