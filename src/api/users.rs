use actix_web::{web, HttpResponse};
use mongodb::bson::Document;

use crate::database::DocumentStore;
use crate::models::{
    CountResponse, ExistsResponse, InsertResponse, NewUser, UpdateResponse, UserCountQuery,
    UserListQuery,
};
use crate::services::user_service::{self, Registration};
use crate::utils::{document_to_json, documents_to_json, parse_object_id, AppError};

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    params(UserListQuery),
    responses(
        (status = 200, description = "Matching users"),
        (status = 400, description = "Invalid pagination or status")
    )
)]
pub async fn list_users(
    store: web::Data<dyn DocumentStore>,
    query: web::Query<UserListQuery>,
) -> Result<HttpResponse, AppError> {
    log::info!("👥 GET /users - {:?}", query);

    let users = user_service::list_users(store.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(users)))
}

#[utoipa::path(
    get,
    path = "/api/users/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses((status = 200, description = "The user, or null when unknown"))
)]
pub async fn get_user(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    log::info!("👤 GET /users/{}", email);

    let user = user_service::find_by_email(store.get_ref(), &email).await?;
    Ok(HttpResponse::Ok().json(user.map(document_to_json)))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = Object,
    responses(
        (status = 200, description = "Inserted id, or a null id when the email is already registered", body = InsertResponse),
        (status = 400, description = "Body is missing an email")
    )
)]
pub async fn create_user(
    store: web::Data<dyn DocumentStore>,
    body: web::Json<NewUser>,
) -> Result<HttpResponse, AppError> {
    let user = body.into_inner();
    log::info!("📝 POST /users - email: {}", user.email);

    match user_service::register(store.get_ref(), user).await? {
        Registration::Created(id) => {
            log::info!("✅ User registered: {}", id);
            Ok(HttpResponse::Ok().json(InsertResponse::from(id)))
        }
        Registration::AlreadyExists => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "user already exists",
            "insertedId": null
        }))),
    }
}

#[utoipa::path(
    patch,
    path = "/api/users/singleUser/{id}",
    tag = "Users",
    request_body = Object,
    params(("id" = String, Path, description = "24-hex document id")),
    responses(
        (status = 200, description = "Fields set on the user", body = UpdateResponse),
        (status = 400, description = "Invalid id or empty change set")
    )
)]
pub async fn update_user(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
    body: web::Json<Document>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;
    log::info!("✏️  PATCH /users/singleUser/{}", id);

    let outcome = user_service::update_user(store.get_ref(), id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UpdateResponse::from(outcome)))
}

#[utoipa::path(
    get,
    path = "/api/existingUsers/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses((status = 200, description = "Whether the email is registered", body = ExistsResponse))
)]
pub async fn user_exists(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let exists = user_service::exists(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(ExistsResponse { exists }))
}

#[utoipa::path(
    get,
    path = "/api/userCount",
    tag = "Users",
    responses((status = 200, description = "Donors plus volunteers", body = CountResponse))
)]
pub async fn member_count(store: web::Data<dyn DocumentStore>) -> Result<HttpResponse, AppError> {
    let count = user_service::count_members(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(CountResponse { count }))
}

#[utoipa::path(
    get,
    path = "/api/allUsersCount",
    tag = "Users",
    params(UserCountQuery),
    responses((status = 200, description = "Users, optionally by status", body = CountResponse))
)]
pub async fn all_users_count(
    store: web::Data<dyn DocumentStore>,
    query: web::Query<UserCountQuery>,
) -> Result<HttpResponse, AppError> {
    let count = user_service::count_all(store.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(CountResponse { count }))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use mongodb::bson::doc;
    use serde_json::{json, Value};

    use crate::database::{memory::MemoryStore, Collection};
    use crate::test_app;

    #[actix_rt::test]
    async fn test_register_twice() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let app = test::init_service(test_app!(store)).await;

        let body = json!({ "email": "mitu@example.com", "name": "Mitu", "bloodGroup": "O-" });
        let req = test::TestRequest::post().uri("/api/users").set_json(&body).to_request();
        let first: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(first["acknowledged"], true);
        assert_eq!(first["insertedId"].as_str().unwrap().len(), 24);

        let req = test::TestRequest::post().uri("/api/users").set_json(&body).to_request();
        let second: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(second, json!({ "message": "user already exists", "insertedId": null }));
    }

    #[actix_rt::test]
    async fn test_unknown_email_is_null() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let app = test::init_service(test_app!(store)).await;

        let req = test::TestRequest::get().uri("/api/users/nobody@example.com").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert!(body.is_null());
    }

    #[actix_rt::test]
    async fn test_donor_search_over_http() {
        let store = std::sync::Arc::new(MemoryStore::new());
        store.seed(
            Collection::Users,
            vec![
                doc! { "email": "a@x.com", "role": "donor", "bloodGroup": "A+", "district": "Dhaka", "upazilla": "Savar" },
                doc! { "email": "b@x.com", "role": "donor", "bloodGroup": "B+", "district": "Dhaka", "upazilla": "Savar" },
                doc! { "email": "c@x.com", "role": "volunteer", "bloodGroup": "A+", "district": "Dhaka", "upazilla": "Savar" },
            ],
        );
        let app = test::init_service(test_app!(store)).await;

        let req = test::TestRequest::get()
            .uri("/api/users?blood=A%20positive&district=Dhaka&upazilla=Savar&role=donor")
            .to_request();
        let found: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(found.as_array().unwrap().len(), 1);
        assert_eq!(found[0]["email"], "a@x.com");

        // Missing role drops the whole search
        let req = test::TestRequest::get()
            .uri("/api/users?blood=A%20positive&district=Dhaka&upazilla=Savar")
            .to_request();
        let all: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.as_array().unwrap().len(), 3);
    }

    #[actix_rt::test]
    async fn test_patch_user_and_counts() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let ids = store.seed(
            Collection::Users,
            vec![
                doc! { "email": "a@x.com", "role": "donor", "status": "active" },
                doc! { "email": "b@x.com", "role": "admin", "status": "active" },
            ],
        );
        let app = test::init_service(test_app!(store)).await;

        let req = test::TestRequest::patch()
            .uri(&format!("/api/users/singleUser/{}", ids[0].to_hex()))
            .set_json(json!({ "status": "blocked" }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["matchedCount"], 1);
        assert_eq!(updated["modifiedCount"], 1);

        let req = test::TestRequest::get().uri("/api/allUsersCount?status=blocked").to_request();
        let blocked: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(blocked, json!({ "count": 1 }));

        let req = test::TestRequest::get().uri("/api/userCount").to_request();
        let members: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(members, json!({ "count": 1 }));

        let req = test::TestRequest::get().uri("/api/existingUsers/b@x.com").to_request();
        let exists: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(exists, json!({ "exists": true }));
    }

    #[actix_rt::test]
    async fn test_malformed_id_is_bad_request() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let app = test::init_service(test_app!(store)).await;

        let req = test::TestRequest::patch()
            .uri("/api/users/singleUser/xyz")
            .set_json(json!({ "status": "blocked" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn test_bad_status_query_is_bad_request() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let app = test::init_service(test_app!(store)).await;

        let req = test::TestRequest::get().uri("/api/users?status=sleeping").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }
}
