use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{non_blank, not_blank, optional_email};
use crate::model::item::{Item, ItemChanges, ItemKind, Reporter};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateItemRequest {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub item_name: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(alias = "gmail")]
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "not_blank"), length(max = 20))]
    pub phone: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub roll_number: Option<String>,
}

impl CreateItemRequest {
    pub fn into_item(self, owner: ObjectId) -> Item {
        Item {
            id: None,
            item_name: self.item_name.trim().to_string(),
            description: non_blank(self.description),
            location: non_blank(self.location),
            date: non_blank(self.date),
            reporter: Reporter {
                email: self.email.trim().to_string(),
                phone: self.phone.trim().to_string(),
                department: non_blank(self.department),
                roll_number: non_blank(self.roll_number),
            },
            owner: Some(owner),
            created_at: None,
            updated_at: None,
        }
    }
}

/// Partial update. Absent or blank fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateItemRequest {
    #[validate(length(max = 200))]
    pub item_name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    #[serde(alias = "gmail")]
    #[validate(custom(function = "optional_email"))]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    pub department: Option<String>,
    pub roll_number: Option<String>,
}

impl From<UpdateItemRequest> for ItemChanges {
    fn from(req: UpdateItemRequest) -> Self {
        ItemChanges {
            item_name: non_blank(req.item_name),
            description: non_blank(req.description),
            location: non_blank(req.location),
            date: non_blank(req.date),
            email: non_blank(req.email),
            phone: non_blank(req.phone),
            department: non_blank(req.department),
            roll_number: non_blank(req.roll_number),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: String,
    pub kind: ItemKind,
    pub item_name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub email: String,
    pub phone: String,
    pub department: Option<String>,
    pub roll_number: Option<String>,
    pub owner: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl ItemResponse {
    pub fn new(kind: ItemKind, item: Item) -> Self {
        ItemResponse {
            id: item.id.map(|id| id.to_hex()).unwrap_or_default(),
            kind,
            item_name: item.item_name,
            description: item.description,
            location: item.location,
            date: item.date,
            email: item.reporter.email,
            phone: item.reporter.phone,
            department: item.reporter.department,
            roll_number: item.reporter.roll_number,
            owner: item.owner.map(|id| id.to_hex()),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}
