use serde::{Deserialize, Serialize};
use time::Date;

use crate::core::{model::Id, store::Record};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// A shift an employee did not show up for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceRecord {
    #[serde(default = "Id::generate")]
    pub id: Id,
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Free text such as `4:00 PM - 12:00 AM`.
    pub time_range: String,
    /// Site name as typed; not linked to an office.
    pub site: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAbsenceRecord {
    pub date: Date,
    pub time_range: String,
    pub site: String,
}

impl Record for AbsenceRecord {
    const KIND: &'static str = "absence record";
    type Draft = NewAbsenceRecord;

    fn id(&self) -> &Id {
        &self.id
    }

    fn from_draft(id: Id, draft: NewAbsenceRecord) -> Self {
        AbsenceRecord {
            id,
            date: draft.date,
            time_range: draft.time_range,
            site: draft.site,
        }
    }
}
