use mongodb::bson::{DateTime as BsonDateTime, Document};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A contribution recorded after the client confirms a payment.
#[derive(Debug, Deserialize)]
pub struct NewFunding {
    pub email: String,
    /// Amount in dollars.
    pub donation: f64,
    #[serde(flatten)]
    pub details: Document,
}

impl NewFunding {
    pub fn into_document(self) -> Document {
        let mut doc = self.details;
        doc.remove("_id");
        doc.insert("email", self.email);
        doc.insert("donation", self.donation);
        if !doc.contains_key("date") {
            doc.insert("date", BsonDateTime::now());
        }
        doc
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FundingTotal {
    pub total: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentIntentRequest {
    /// Amount in dollars, e.g. `12.5`.
    pub amount: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}
