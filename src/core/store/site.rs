use serde::{Deserialize, Serialize};

use crate::core::model::Id;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteInfo {
    pub id: Id,
    pub name: String,
    pub address: String,
    pub supervisors: u32,
    pub employees: u32,
}

/// Editable part of [`SiteInfo`]; the id is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteInfoUpdate {
    pub name: String,
    pub address: String,
    pub supervisors: u32,
    pub employees: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentStats {
    /// Free text such as `0/0`.
    pub assigned: String,
    pub sites: u32,
}
