use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::database::{Collection, DocumentStore, FindOptions, UpdateOutcome};
use crate::models::{NewUser, Pagination, UserCountQuery, UserListQuery, UserRole};
use crate::utils::AppError;

pub enum Registration {
    Created(ObjectId),
    AlreadyExists,
}

/// Turns the textual blood group the client sends ("AB positive") into the
/// stored symbol ("AB+"). Anything else is passed through trimmed.
pub fn decode_blood_group(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some((group, sign)) = trimmed.rsplit_once(char::is_whitespace) else {
        return trimmed.to_string();
    };

    let symbol = if sign.eq_ignore_ascii_case("positive") {
        '+'
    } else if sign.eq_ignore_ascii_case("negative") {
        '-'
    } else {
        return trimmed.to_string();
    };

    format!("{}{}", group.trim().to_uppercase(), symbol)
}

/// Filter and window for `GET /api/users`.
///
/// Precedence: exact email, then the donor search (blood group, district,
/// upazilla and role=donor, all four or nothing), then status, then all.
pub fn build_list_filter(query: &UserListQuery) -> Result<(Document, Option<Pagination>), AppError> {
    if let Some(email) = &query.email {
        return Ok((doc! { "email": email }, None));
    }

    let pagination = Pagination::from_query(query.page, query.size)?;

    if let (Some(blood), Some(district), Some(upazilla), Some(role)) =
        (&query.blood, &query.district, &query.upazilla, &query.role)
    {
        if role == UserRole::Donor.as_str() {
            let filter = doc! {
                "bloodGroup": decode_blood_group(blood),
                "district": district,
                "upazilla": upazilla,
                "role": UserRole::Donor.as_str(),
            };
            return Ok((filter, None));
        }
    }

    if let Some(status) = query.status {
        return Ok((doc! { "status": status.as_str() }, pagination));
    }

    Ok((Document::new(), pagination))
}

pub async fn list_users(
    store: &dyn DocumentStore,
    query: &UserListQuery,
) -> Result<Vec<Document>, AppError> {
    let (filter, pagination) = build_list_filter(query)?;
    store
        .find(Collection::Users, filter, FindOptions::from(pagination))
        .await
}

pub async fn find_by_email(
    store: &dyn DocumentStore,
    email: &str,
) -> Result<Option<Document>, AppError> {
    store
        .find_one(Collection::Users, doc! { "email": email })
        .await
}

pub async fn exists(store: &dyn DocumentStore, email: &str) -> Result<bool, AppError> {
    Ok(find_by_email(store, email).await?.is_some())
}

/// Single conditional insert: the unique email index rejects the duplicate,
/// so concurrent sign-ins with the same email cannot both create a user.
pub async fn register(store: &dyn DocumentStore, user: NewUser) -> Result<Registration, AppError> {
    match store.insert_one(Collection::Users, user.into_document()).await {
        Ok(id) => Ok(Registration::Created(id)),
        Err(AppError::Conflict(_)) => Ok(Registration::AlreadyExists),
        Err(e) => Err(e),
    }
}

/// Donors and volunteers together.
pub async fn count_members(store: &dyn DocumentStore) -> Result<u64, AppError> {
    let filter = doc! {
        "role": { "$in": [UserRole::Donor.as_str(), UserRole::Volunteer.as_str()] }
    };
    store.count(Collection::Users, filter).await
}

pub async fn count_all(store: &dyn DocumentStore, query: &UserCountQuery) -> Result<u64, AppError> {
    let filter = match query.status {
        Some(status) => doc! { "status": status.as_str() },
        None => Document::new(),
    };
    store.count(Collection::Users, filter).await
}

pub async fn update_user(
    store: &dyn DocumentStore,
    id: ObjectId,
    changes: Document,
) -> Result<UpdateOutcome, AppError> {
    super::update_by_id(store, Collection::Users, id, changes).await
}
