pub mod auth;
pub mod blogs;
pub mod donations;
pub mod funding;
pub mod health;
pub mod payments;
pub mod swagger;
pub mod users;

use actix_web::web;

use crate::middleware::AuthMiddleware;
use crate::utils::AppError;

/// Document ids in path position must be 24 hex characters.
const HEX_ID: &str = "{id:[0-9a-fA-F]{24}}";

/// Registers every route plus extractor configs that render malformed
/// bodies, query strings and paths as `AppError::InvalidRequest`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into()),
    )
    .route("/", web::get().to(health::liveness))
    .route("/health", web::get().to(health::health_check))
    .service(
        web::scope("/api")
            // Auth
            .route("/auth/access-token", web::post().to(auth::issue_token))
            .route("/auth/logout", web::post().to(auth::logout))
            .service(
                web::resource("/auth/me")
                    .wrap(AuthMiddleware)
                    .route(web::get().to(auth::me)),
            )
            // Users
            .route("/users", web::get().to(users::list_users))
            .route("/users", web::post().to(users::create_user))
            .route("/users/singleUser/{id}", web::patch().to(users::update_user))
            .route("/users/{email}", web::get().to(users::get_user))
            .route("/existingUsers/{email}", web::get().to(users::user_exists))
            .route("/userCount", web::get().to(users::member_count))
            .route("/allUsersCount", web::get().to(users::all_users_count))
            // Donation requests
            .route("/donation", web::get().to(donations::list_donations))
            .route("/donation", web::post().to(donations::create_donation))
            .route(
                "/donation/singleDonation/{id}",
                web::patch().to(donations::update_donation),
            )
            .route(&format!("/donation/{}", HEX_ID), web::get().to(donations::get_donation))
            .route(&format!("/donation/{}", HEX_ID), web::delete().to(donations::delete_donation))
            .route("/donationCount", web::get().to(donations::donation_count))
            .route("/allDonationCount", web::get().to(donations::all_donation_count))
            .route("/allDonation/pagination", web::get().to(donations::paginate_donations))
            // Blogs
            .route("/blogs", web::get().to(blogs::list_blogs))
            .route("/blogs", web::post().to(blogs::create_blog))
            .route("/publishedBlogs", web::get().to(blogs::blogs_by_status))
            .route(&format!("/blogs/singleBlog/{}", HEX_ID), web::patch().to(blogs::update_blog))
            .route(&format!("/blogs/{}", HEX_ID), web::delete().to(blogs::delete_blog))
            // Payments & funding
            .route("/create-payment-intent", web::post().to(payments::create_payment_intent))
            .route("/funding", web::get().to(funding::funding_total))
            .route("/funding", web::post().to(funding::create_funding))
            .route("/funding/{email}", web::get().to(funding::funding_for_email)),
    );
}
