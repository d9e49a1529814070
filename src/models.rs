//! Frontend Models
//!
//! Data structures matching the Lost & Found API entities.

use serde::{Deserialize, Serialize};

/// Categories offered by the report form.
pub const CATEGORIES: &[&str] = &[
    "Electronics",
    "Accessories",
    "Documents",
    "Clothing",
    "Pets",
    "Other",
];

/// Which board an item belongs to. Assigned at creation, never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Lost,
    Found,
}

impl ItemType {
    /// Path segment used by the API (`/items/lost`, `/items/found`).
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Lost => "lost",
            ItemType::Found => "found",
        }
    }

    /// Capitalized label for headings and toasts.
    pub fn label(self) -> &'static str {
        match self {
            ItemType::Lost => "Lost",
            ItemType::Found => "Found",
        }
    }
}

/// Item data structure (matches backend).
///
/// The backend stores more than it promises (`owner_id`, `status`,
/// `created_at`, `image_embedding`); unknown fields are ignored on
/// deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub category: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub owner_name: String,
    pub owner_email: String,
    #[serde(default)]
    pub owner_phone: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// In-progress report: the Item fields minus everything the server assigns.
/// Phone is the one optional text field; blank means "not provided".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub title: String,
    pub category: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
}

impl ItemDraft {
    /// First required field that is still blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        let required = [
            (&self.title, "title"),
            (&self.category, "category"),
            (&self.description, "description"),
            (&self.location, "location"),
            (&self.date, "date"),
            (&self.owner_name, "name"),
            (&self.owner_email, "email"),
        ];
        required
            .into_iter()
            .find(|(value, _)| value.trim().is_empty())
            .map(|(_, name)| name)
    }

    /// Field name/value pairs for the multipart payload. Blank values are
    /// omitted rather than sent empty.
    pub fn form_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("title", self.title.as_str()),
            ("category", self.category.as_str()),
            ("description", self.description.as_str()),
            ("location", self.location.as_str()),
            ("date", self.date.as_str()),
            ("owner_name", self.owner_name.as_str()),
            ("owner_email", self.owner_email.as_str()),
            ("owner_phone", self.owner_phone.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}
