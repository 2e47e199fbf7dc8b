use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BloodHub API",
        version = "1.0.0",
        description = "Backend for the BloodHub blood donation platform.\n\n**Authentication:** `POST /api/auth/access-token` sets an HTTP-only `token` cookie. Only `/api/auth/me` requires it.\n\n**Features:**\n- Donor and volunteer registry with blood group search\n- Donation requests with status tracking\n- Blog publishing\n- Stripe payment intents and funding totals"
    ),
    paths(
        // Auth
        crate::api::auth::issue_token,
        crate::api::auth::logout,
        crate::api::auth::me,

        // Health
        crate::api::health::liveness,
        crate::api::health::health_check,

        // Users
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::create_user,
        crate::api::users::update_user,
        crate::api::users::user_exists,
        crate::api::users::member_count,
        crate::api::users::all_users_count,

        // Donations
        crate::api::donations::list_donations,
        crate::api::donations::get_donation,
        crate::api::donations::create_donation,
        crate::api::donations::update_donation,
        crate::api::donations::delete_donation,
        crate::api::donations::donation_count,
        crate::api::donations::all_donation_count,
        crate::api::donations::paginate_donations,

        // Blogs
        crate::api::blogs::list_blogs,
        crate::api::blogs::blogs_by_status,
        crate::api::blogs::create_blog,
        crate::api::blogs::update_blog,
        crate::api::blogs::delete_blog,

        // Payments & funding
        crate::api::payments::create_payment_intent,
        crate::api::funding::funding_total,
        crate::api::funding::create_funding,
        crate::api::funding::funding_for_email,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::UserRole,
            crate::models::UserStatus,
            crate::models::DonationStatus,
            crate::models::BlogStatus,
            crate::models::InsertResponse,
            crate::models::UpdateResponse,
            crate::models::DeleteResponse,
            crate::models::CountResponse,
            crate::models::ExistsResponse,
            crate::models::SuccessResponse,
            crate::models::FundingTotal,
            crate::models::PaymentIntentRequest,
            crate::models::PaymentIntentResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Cookie-based session tokens."),
        (name = "Health", description = "Service and database status."),
        (name = "Users", description = "Registered donors, volunteers and admins."),
        (name = "Donations", description = "Blood donation requests."),
        (name = "Blogs", description = "Published and draft articles."),
        (name = "Payments", description = "Stripe payment intents."),
        (name = "Funding", description = "Recorded contributions and their total."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "token_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(
                    crate::services::auth_service::TOKEN_COOKIE,
                ))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/donation/{id}"));
        assert!(doc.paths.paths.contains_key("/api/create-payment-intent"));
        assert!(doc.paths.paths.contains_key("/health"));
        assert!(doc.paths.paths.contains_key("/"));

        let blog = &doc.paths.paths["/api/blogs/{id}"];
        assert!(blog.delete.is_some());
        let funding = &doc.paths.paths["/api/funding"];
        assert!(funding.get.is_some() && funding.post.is_some());
        let donation = &doc.paths.paths["/api/donation/singleDonation/{id}"];
        assert!(donation.patch.is_some());
        let users = &doc.paths.paths["/api/users"];
        assert!(users.post.is_some());

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("token_cookie"));
        assert!(components.schemas.contains_key("HealthResponse"));
    }
}
