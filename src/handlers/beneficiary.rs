use crate::models::*;
use crate::services::BeneficiaryService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/beneficiaries",
    tag = "beneficiaries",
    responses(
        (status = 200, description = "Active beneficiaries", body = [BeneficiaryResponse])
    )
)]
/// Active beneficiaries with cumulative funds received and bets supported.
pub async fn list_beneficiaries(service: web::Data<BeneficiaryService>) -> Result<HttpResponse> {
    match service.list_active().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn beneficiary_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/beneficiaries").route("", web::get().to(list_beneficiaries)),
    );
}
