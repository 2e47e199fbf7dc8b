use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    web, HttpResponse,
};
use serde_json::{Map, Value};

use crate::config::CookiePolicy;
use crate::models::SuccessResponse;
use crate::services::auth_service::{Claims, TokenService, TOKEN_COOKIE};
use crate::utils::AppError;

fn session_cookie(token: String, policy: &CookiePolicy) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(policy.secure)
        .same_site(policy.same_site)
        .finish()
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, "")
        .path("/")
        .http_only(true)
        .max_age(CookieDuration::ZERO)
        .same_site(SameSite::None)
        .secure(true)
        .finish()
}

/// Signs whatever identity the client posts into a one-hour session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/access-token",
    tag = "Auth",
    responses(
        (status = 200, description = "Session cookie set", body = SuccessResponse),
        (status = 400, description = "Body is not a JSON object")
    )
)]
pub async fn issue_token(
    tokens: web::Data<TokenService>,
    policy: web::Data<CookiePolicy>,
    identity: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let identity = identity.into_inner();
    let who = identity
        .get("email")
        .and_then(Value::as_str)
        .unwrap_or("anonymous")
        .to_string();
    log::info!("🔐 POST /auth/access-token - {}", who);

    let token = tokens.issue(identity)?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token, &policy))
        .json(SuccessResponse { success: true }))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses((status = 200, description = "Session cookie cleared", body = SuccessResponse))
)]
pub async fn logout() -> HttpResponse {
    log::info!("🚪 POST /auth/logout");

    HttpResponse::Ok()
        .cookie(removal_cookie())
        .json(SuccessResponse { success: true })
}

/// Decoded session, only reachable through the auth middleware.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Claims of the current session"),
        (status = 401, description = "Missing, invalid or expired session cookie")
    )
)]
pub async fn me(claims: web::ReqData<Claims>) -> HttpResponse {
    log::info!("👤 GET /auth/me - {}", claims.email().unwrap_or("unknown"));
    HttpResponse::Ok().json(claims.into_inner())
}
