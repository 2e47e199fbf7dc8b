use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Lifecycle of a donation request. Transitions are driven by clients;
/// any status may replace any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    #[default]
    Pending,
    InProgress,
    Done,
    Canceled,
}

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "pending",
            DonationStatus::InProgress => "inprogress",
            DonationStatus::Done => "done",
            DonationStatus::Canceled => "canceled",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewDonation {
    #[serde(rename = "donorEmail")]
    pub donor_email: String,
    #[serde(default)]
    pub status: DonationStatus,
    /// Recipient, hospital, location and schedule fields.
    #[serde(flatten)]
    pub details: Document,
}

impl NewDonation {
    pub fn into_document(self) -> Document {
        let mut doc = self.details;
        doc.remove("_id");
        doc.insert("donorEmail", self.donor_email);
        doc.insert("status", self.status.as_str());
        doc
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DonationListQuery {
    pub email: Option<String>,
    pub status: Option<DonationStatus>,
    pub page: Option<u64>,
    pub size: Option<u64>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DonationStatusQuery {
    pub status: Option<DonationStatus>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DonationCountQuery {
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
}
