use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Donor,
    Volunteer,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Donor => "donor",
            UserRole::Volunteer => "volunteer",
            UserRole::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Blocked,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Blocked => "blocked",
        }
    }
}

/// Registration body. Profile fields other than the ones typed here
/// (name, avatar, bloodGroup, district, upazilla, ...) are stored as sent.
#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(flatten)]
    pub profile: Document,
}

impl NewUser {
    pub fn into_document(self) -> Document {
        let mut doc = self.profile;
        doc.remove("_id");
        doc.insert("email", self.email);
        doc.insert("role", self.role.as_str());
        doc.insert("status", self.status.as_str());
        doc
    }
}

/// Query string of `GET /api/users`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    pub email: Option<String>,
    /// "A positive", "O negative", ...
    pub blood: Option<String>,
    pub district: Option<String>,
    pub upazilla: Option<String>,
    pub role: Option<String>,
    pub status: Option<UserStatus>,
    pub page: Option<u64>,
    pub size: Option<u64>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserCountQuery {
    pub status: Option<UserStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults_role_and_status() {
        let user: NewUser = serde_json::from_value(serde_json::json!({
            "email": "rahim@example.com",
            "name": "Rahim",
            "bloodGroup": "B+"
        }))
        .unwrap();

        let doc = user.into_document();
        assert_eq!(doc.get_str("email").unwrap(), "rahim@example.com");
        assert_eq!(doc.get_str("role").unwrap(), "donor");
        assert_eq!(doc.get_str("status").unwrap(), "active");
        assert_eq!(doc.get_str("name").unwrap(), "Rahim");
        assert_eq!(doc.get_str("bloodGroup").unwrap(), "B+");
    }

    #[test]
    fn test_new_user_requires_email() {
        let parsed = serde_json::from_value::<NewUser>(serde_json::json!({ "name": "No Mail" }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let parsed = serde_json::from_value::<NewUser>(serde_json::json!({
            "email": "a@b.com",
            "role": "superuser"
        }));
        assert!(parsed.is_err());
    }
}
