use actix_web::{web, HttpResponse};
use mongodb::bson::Document;

use crate::database::DocumentStore;
use crate::models::{
    CountResponse, DeleteResponse, DonationCountQuery, DonationListQuery, DonationStatusQuery,
    InsertResponse, NewDonation, PageQuery, Pagination, UpdateResponse,
};
use crate::services::donation_service;
use crate::utils::{document_to_json, documents_to_json, parse_object_id, AppError};

#[utoipa::path(
    get,
    path = "/api/donation",
    tag = "Donations",
    params(DonationListQuery),
    responses((status = 200, description = "Donation requests"))
)]
pub async fn list_donations(
    store: web::Data<dyn DocumentStore>,
    query: web::Query<DonationListQuery>,
) -> Result<HttpResponse, AppError> {
    log::info!("🩸 GET /donation - {:?}", query);

    let donations = donation_service::list_donations(store.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(donations)))
}

#[utoipa::path(
    get,
    path = "/api/donation/{id}",
    tag = "Donations",
    params(
        ("id" = String, Path, description = "24-hex document id"),
        DonationStatusQuery
    ),
    responses((status = 200, description = "The donation, or null when id and status do not both match"))
)]
pub async fn get_donation(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
    query: web::Query<DonationStatusQuery>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;
    log::info!("🩸 GET /donation/{} - status: {:?}", id, query.status);

    let donation = donation_service::find_donation(store.get_ref(), id, query.status).await?;
    Ok(HttpResponse::Ok().json(donation.map(document_to_json)))
}

#[utoipa::path(
    post,
    path = "/api/donation",
    tag = "Donations",
    request_body = Object,
    responses((status = 200, description = "Inserted donation request", body = InsertResponse))
)]
pub async fn create_donation(
    store: web::Data<dyn DocumentStore>,
    body: web::Json<NewDonation>,
) -> Result<HttpResponse, AppError> {
    let donation = body.into_inner();
    log::info!("📝 POST /donation - donor: {}", donation.donor_email);

    let id = donation_service::create_donation(store.get_ref(), donation).await?;
    Ok(HttpResponse::Ok().json(InsertResponse::from(id)))
}

#[utoipa::path(
    patch,
    path = "/api/donation/singleDonation/{id}",
    tag = "Donations",
    request_body = Object,
    params(("id" = String, Path, description = "24-hex document id")),
    responses(
        (status = 200, description = "Fields set on the donation", body = UpdateResponse),
        (status = 400, description = "Invalid id or empty change set")
    )
)]
pub async fn update_donation(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
    body: web::Json<Document>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;
    log::info!("✏️  PATCH /donation/singleDonation/{}", id);

    let outcome = donation_service::update_donation(store.get_ref(), id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UpdateResponse::from(outcome)))
}

#[utoipa::path(
    delete,
    path = "/api/donation/{id}",
    tag = "Donations",
    params(("id" = String, Path, description = "24-hex document id")),
    responses((status = 200, description = "Number of removed documents", body = DeleteResponse))
)]
pub async fn delete_donation(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;
    log::info!("🗑️ DELETE /donation/{}", id);

    let deleted = donation_service::delete_donation(store.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse::from(deleted)))
}

#[utoipa::path(
    get,
    path = "/api/donationCount",
    tag = "Donations",
    params(DonationCountQuery),
    responses((status = 200, description = "Donations by donor email", body = CountResponse))
)]
pub async fn donation_count(
    store: web::Data<dyn DocumentStore>,
    query: web::Query<DonationCountQuery>,
) -> Result<HttpResponse, AppError> {
    let count = donation_service::count_for_donor(store.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(CountResponse { count }))
}

#[utoipa::path(
    get,
    path = "/api/allDonationCount",
    tag = "Donations",
    responses((status = 200, description = "Every donation request", body = CountResponse))
)]
pub async fn all_donation_count(
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, AppError> {
    let count = donation_service::count_all(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(CountResponse { count }))
}

#[utoipa::path(
    get,
    path = "/api/allDonation/pagination",
    tag = "Donations",
    params(PageQuery),
    responses((status = 200, description = "One page of donation requests"))
)]
pub async fn paginate_donations(
    store: web::Data<dyn DocumentStore>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let pagination = Pagination::from_query(query.page, query.size)?;
    log::info!("📄 GET /allDonation/pagination - {:?}", pagination);

    let donations = donation_service::paginate_all(store.get_ref(), pagination).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(donations)))
}
