use serde::{Deserialize, Serialize};

use crate::core::{
    model::{Coordinate, Id},
    store::Record,
};

/// Avatar used when an employee is created without one.
pub const DEFAULT_AVATAR_URL: &str = "https://randomuser.me/api/portraits/men/99.jpg";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default = "Id::generate")]
    pub id: Id,
    pub name: String,
    pub role: String,
    #[serde(default = "default_avatar")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office_id: Option<Id>,
}

fn default_avatar() -> String {
    DEFAULT_AVATAR_URL.to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub role: String,
    pub image_url: String,
    pub location: Option<Coordinate>,
    pub office_id: Option<Id>,
}

impl Record for Employee {
    const KIND: &'static str = "employee";
    type Draft = NewEmployee;

    fn id(&self) -> &Id {
        &self.id
    }

    fn from_draft(id: Id, draft: NewEmployee) -> Self {
        Employee {
            id,
            name: draft.name,
            role: draft.role,
            image_url: draft.image_url,
            location: draft.location,
            office_id: draft.office_id,
        }
    }
}
