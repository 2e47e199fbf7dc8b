use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    #[default]
    Draft,
    Published,
}

impl BlogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlogStatus::Draft => "draft",
            BlogStatus::Published => "published",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewBlog {
    #[serde(rename = "blogStatus", default)]
    pub blog_status: BlogStatus,
    /// Title, thumbnail, rich-text content.
    #[serde(flatten)]
    pub content: Document,
}

impl NewBlog {
    pub fn into_document(self) -> Document {
        let mut doc = self.content;
        doc.remove("_id");
        doc.insert("blogStatus", self.blog_status.as_str());
        doc
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BlogStatusQuery {
    /// Defaults to `published`.
    pub status: Option<BlogStatus>,
}
