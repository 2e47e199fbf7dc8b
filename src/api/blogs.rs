use actix_web::{web, HttpResponse};
use mongodb::bson::Document;

use crate::database::DocumentStore;
use crate::models::{BlogStatusQuery, DeleteResponse, InsertResponse, NewBlog, UpdateResponse};
use crate::services::blog_service;
use crate::utils::{documents_to_json, parse_object_id, AppError};

#[utoipa::path(
    get,
    path = "/api/blogs",
    tag = "Blogs",
    responses((status = 200, description = "Every blog regardless of status"))
)]
pub async fn list_blogs(store: web::Data<dyn DocumentStore>) -> Result<HttpResponse, AppError> {
    log::info!("📰 GET /blogs");

    let blogs = blog_service::list_blogs(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(blogs)))
}

#[utoipa::path(
    get,
    path = "/api/publishedBlogs",
    tag = "Blogs",
    params(BlogStatusQuery),
    responses((status = 200, description = "Blogs with the given status"))
)]
pub async fn blogs_by_status(
    store: web::Data<dyn DocumentStore>,
    query: web::Query<BlogStatusQuery>,
) -> Result<HttpResponse, AppError> {
    log::info!("📰 GET /publishedBlogs - status: {:?}", query.status);

    let blogs = blog_service::list_by_status(store.get_ref(), query.status).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(blogs)))
}

#[utoipa::path(
    post,
    path = "/api/blogs",
    tag = "Blogs",
    request_body = Object,
    responses((status = 200, description = "Inserted blog, a draft unless blogStatus is given", body = InsertResponse))
)]
pub async fn create_blog(
    store: web::Data<dyn DocumentStore>,
    body: web::Json<NewBlog>,
) -> Result<HttpResponse, AppError> {
    let id = blog_service::create_blog(store.get_ref(), body.into_inner()).await?;
    log::info!("✅ Blog created: {}", id);
    Ok(HttpResponse::Ok().json(InsertResponse::from(id)))
}

#[utoipa::path(
    patch,
    path = "/api/blogs/singleBlog/{id}",
    tag = "Blogs",
    request_body = Object,
    params(("id" = String, Path, description = "24-hex document id")),
    responses(
        (status = 200, description = "Fields set on the blog", body = UpdateResponse),
        (status = 400, description = "Empty change set")
    )
)]
pub async fn update_blog(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
    body: web::Json<Document>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;
    log::info!("✏️  PATCH /blogs/singleBlog/{}", id);

    let outcome = blog_service::update_blog(store.get_ref(), id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UpdateResponse::from(outcome)))
}

#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    tag = "Blogs",
    params(("id" = String, Path, description = "24-hex document id")),
    responses((status = 200, description = "Number of removed documents", body = DeleteResponse))
)]
pub async fn delete_blog(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;
    log::info!("🗑️ DELETE /blogs/{}", id);

    let deleted = blog_service::delete_blog(store.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse::from(deleted)))
}
