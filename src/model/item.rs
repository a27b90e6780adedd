use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Lost and found items share one schema; the kind only selects the
/// collection, the route prefix and log labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Lost,
    Found,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Lost => "lost",
            ItemKind::Found => "found",
        }
    }

    /// Path segment under `/api`, e.g. `lost-items`.
    pub fn route_segment(&self) -> &'static str {
        match self {
            ItemKind::Lost => "lost-items",
            ItemKind::Found => "found-items",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Lost => "Lost item",
            ItemKind::Found => "Found item",
        }
    }
}

/// Contact details of the person who reported the item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reporter {
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub roll_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub item_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    pub reporter: Reporter,
    /// User that created the record; the only principal besides admins
    /// allowed to change or delete it.
    #[serde(default)]
    pub owner: Option<ObjectId>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Item {
    pub fn is_owned_by(&self, user_id: &ObjectId) -> bool {
        self.owner.as_ref() == Some(user_id)
    }
}

/// Non-empty fields to overwrite on an existing item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemChanges {
    pub item_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub roll_number: Option<String>,
}

impl ItemChanges {
    pub fn is_empty(&self) -> bool {
        self == &ItemChanges::default()
    }

    /// `$set` body using the stored (camelCase, dotted) field paths.
    pub fn to_set_document(&self) -> bson::Document {
        let mut set = bson::Document::new();
        let fields = [
            ("itemName", &self.item_name),
            ("description", &self.description),
            ("location", &self.location),
            ("date", &self.date),
            ("reporter.email", &self.email),
            ("reporter.phone", &self.phone),
            ("reporter.department", &self.department),
            ("reporter.rollNumber", &self.roll_number),
        ];
        for (path, value) in fields {
            if let Some(v) = value {
                set.insert(path, v.clone());
            }
        }
        set
    }
}
