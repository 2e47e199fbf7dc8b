use actix_web::{web, HttpResponse};

use crate::database::DocumentStore;
use crate::models::{FundingTotal, InsertResponse, NewFunding};
use crate::services::funding_service;
use crate::utils::{documents_to_json, AppError};

#[utoipa::path(
    get,
    path = "/api/funding",
    tag = "Funding",
    responses((status = 200, description = "Running total; empty when nothing was funded", body = Vec<FundingTotal>))
)]
pub async fn funding_total(store: web::Data<dyn DocumentStore>) -> Result<HttpResponse, AppError> {
    log::info!("💰 GET /funding");

    let rows = funding_service::total(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(rows)))
}

#[utoipa::path(
    get,
    path = "/api/funding/{email}",
    tag = "Funding",
    params(("email" = String, Path, description = "Funder email")),
    responses((status = 200, description = "Funding records of one user"))
)]
pub async fn funding_for_email(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("💰 GET /funding/{}", path);

    let records = funding_service::list_for_email(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(records)))
}

#[utoipa::path(
    post,
    path = "/api/funding",
    tag = "Funding",
    request_body = Object,
    responses(
        (status = 200, description = "Recorded contribution", body = InsertResponse),
        (status = 400, description = "Missing email or numeric donation")
    )
)]
pub async fn create_funding(
    store: web::Data<dyn DocumentStore>,
    body: web::Json<NewFunding>,
) -> Result<HttpResponse, AppError> {
    let funding = body.into_inner();
    log::info!("💰 POST /funding - {} gave {:.2}", funding.email, funding.donation);

    let id = funding_service::record(store.get_ref(), funding).await?;
    Ok(HttpResponse::Ok().json(InsertResponse::from(id)))
}
