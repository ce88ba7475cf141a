use serde::{Deserialize, Serialize};

use crate::core::{
    model::{Coordinate, Id},
    store::Record,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Office {
    #[serde(default = "Id::generate")]
    pub id: Id,
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    pub guard_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOffice {
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    pub guard_count: u32,
}

impl Office {
    /// Case-insensitive substring match against name or address.
    pub fn matches(&self, needle_lowercase: &str) -> bool {
        self.name.to_lowercase().contains(needle_lowercase)
            || self.address.to_lowercase().contains(needle_lowercase)
    }

    pub fn popup_text(&self) -> String {
        format!(
            "{}\n{}\nGuards: {}",
            self.name, self.address, self.guard_count
        )
    }
}

impl Record for Office {
    const KIND: &'static str = "office";
    type Draft = NewOffice;

    fn id(&self) -> &Id {
        &self.id
    }

    fn from_draft(id: Id, draft: NewOffice) -> Self {
        Office {
            id,
            name: draft.name,
            address: draft.address,
            location: draft.location,
            guard_count: draft.guard_count,
        }
    }
}
