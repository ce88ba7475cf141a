//! String-backed models behind the dashboard's edit dialogs.
//!
//! Each form is prefilled from an existing record when editing, or blank
//! when adding, and turns into a typed draft through `to_draft`.

use std::str::FromStr;

use thiserror::Error;
use time::{Date, macros::format_description};

use crate::core::{
    model::{Coordinate, Id},
    store::{
        AbsenceRecord, CurrentStats, DEFAULT_AVATAR_URL, Employee, NewAbsenceRecord, NewEmployee,
        NewOffice, Office, SiteInfo, SiteInfoUpdate,
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} is out of range")]
    OutOfRange { field: &'static str },
    #[error("date must look like YYYY-MM-DD, got {0:?}")]
    InvalidDate(String),
}

fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    if value.trim().is_empty() {
        Err(FormError::Missing(field))
    } else {
        Ok(value.trim().to_string())
    }
}

fn number<T: FromStr>(field: &'static str, value: &str) -> Result<T, FormError> {
    let value = required(field, value)?;
    value
        .parse()
        .map_err(|_| FormError::InvalidNumber { field, value })
}

fn coordinate(latitude: &str, longitude: &str) -> Result<Coordinate, FormError> {
    let lat: f64 = number("latitude", latitude)?;
    let lng: f64 = number("longitude", longitude)?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(FormError::OutOfRange { field: "latitude" });
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(FormError::OutOfRange { field: "longitude" });
    }
    Ok(Coordinate::new(lat, lng))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfficeForm {
    pub name: String,
    pub address: String,
    pub latitude: String,
    pub longitude: String,
    pub guard_count: String,
}

impl OfficeForm {
    pub fn blank() -> Self {
        Self {
            guard_count: "0".to_string(),
            ..Self::default()
        }
    }

    pub fn to_draft(&self) -> Result<NewOffice, FormError> {
        Ok(NewOffice {
            name: required("name", &self.name)?,
            address: required("address", &self.address)?,
            location: coordinate(&self.latitude, &self.longitude)?,
            guard_count: number("number of guards", &self.guard_count)?,
        })
    }
}

impl From<&Office> for OfficeForm {
    fn from(office: &Office) -> Self {
        Self {
            name: office.name.clone(),
            address: office.address.clone(),
            latitude: office.location.latitude.to_string(),
            longitude: office.location.longitude.to_string(),
            guard_count: office.guard_count.to_string(),
        }
    }
}

/// Position and office assignment are optional; leaving both coordinate
/// fields blank means "no known position".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub name: String,
    pub role: String,
    pub image_url: String,
    pub latitude: String,
    pub longitude: String,
    pub office_id: Option<Id>,
}

impl EmployeeForm {
    pub fn blank() -> Self {
        Self {
            image_url: DEFAULT_AVATAR_URL.to_string(),
            ..Self::default()
        }
    }

    pub fn to_draft(&self) -> Result<NewEmployee, FormError> {
        let location = match (self.latitude.trim(), self.longitude.trim()) {
            ("", "") => None,
            (lat, lng) => Some(coordinate(lat, lng)?),
        };
        let image_url = match self.image_url.trim() {
            "" => DEFAULT_AVATAR_URL.to_string(),
            url => url.to_string(),
        };
        Ok(NewEmployee {
            name: required("name", &self.name)?,
            role: required("role", &self.role)?,
            image_url,
            location,
            office_id: self.office_id.clone(),
        })
    }
}

impl From<&Employee> for EmployeeForm {
    fn from(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            role: employee.role.clone(),
            image_url: employee.image_url.clone(),
            latitude: employee
                .location
                .map(|at| at.latitude.to_string())
                .unwrap_or_default(),
            longitude: employee
                .location
                .map(|at| at.longitude.to_string())
                .unwrap_or_default(),
            office_id: employee.office_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbsenceForm {
    pub date: String,
    pub time_range: String,
    pub site: String,
}

impl AbsenceForm {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn to_draft(&self) -> Result<NewAbsenceRecord, FormError> {
        let raw = required("date", &self.date)?;
        let date = Date::parse(&raw, format_description!("[year]-[month]-[day]"))
            .map_err(|_| FormError::InvalidDate(raw))?;
        Ok(NewAbsenceRecord {
            date,
            time_range: required("time", &self.time_range)?,
            site: required("site", &self.site)?,
        })
    }
}

impl From<&AbsenceRecord> for AbsenceForm {
    fn from(record: &AbsenceRecord) -> Self {
        let date = record
            .date
            .format(format_description!("[year]-[month]-[day]"))
            .unwrap_or_default();
        Self {
            date,
            time_range: record.time_range.clone(),
            site: record.site.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteInfoForm {
    pub name: String,
    pub address: String,
    pub supervisors: String,
    pub employees: String,
}

impl SiteInfoForm {
    pub fn to_update(&self) -> Result<SiteInfoUpdate, FormError> {
        Ok(SiteInfoUpdate {
            name: required("site name", &self.name)?,
            address: required("site address", &self.address)?,
            supervisors: number("supervisors", &self.supervisors)?,
            employees: number("employees", &self.employees)?,
        })
    }
}

impl From<&SiteInfo> for SiteInfoForm {
    fn from(site: &SiteInfo) -> Self {
        Self {
            name: site.name.clone(),
            address: site.address.clone(),
            supervisors: site.supervisors.to_string(),
            employees: site.employees.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentStatsForm {
    pub assigned: String,
    pub sites: String,
}

impl CurrentStatsForm {
    pub fn to_stats(&self) -> Result<CurrentStats, FormError> {
        Ok(CurrentStats {
            assigned: required("currently assigned", &self.assigned)?,
            sites: number("sites", &self.sites)?,
        })
    }
}

impl From<&CurrentStats> for CurrentStatsForm {
    fn from(stats: &CurrentStats) -> Self {
        Self {
            assigned: stats.assigned.clone(),
            sites: stats.sites.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn office_form_parses_numbers() {
        let form = OfficeForm {
            name: "Pune Yard".into(),
            address: "Hinjewadi, Pune".into(),
            latitude: "18.5913".into(),
            longitude: "73.7389".into(),
            guard_count: "6".into(),
        };
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.guard_count, 6);
        assert_eq!(draft.location, Coordinate::new(18.5913, 73.7389));
    }

    #[test]
    fn office_form_reports_the_offending_field() {
        let mut form = OfficeForm::blank();
        assert_eq!(form.to_draft(), Err(FormError::Missing("name")));

        form.name = "X".into();
        form.address = "Y".into();
        form.latitude = "north".into();
        form.longitude = "1".into();
        assert!(matches!(
            form.to_draft(),
            Err(FormError::InvalidNumber { field: "latitude", .. })
        ));

        form.latitude = "91".into();
        assert_eq!(
            form.to_draft(),
            Err(FormError::OutOfRange { field: "latitude" })
        );
    }

    #[test]
    fn employee_form_without_position() {
        let form = EmployeeForm {
            name: "Ravi".into(),
            role: "Guard".into(),
            ..EmployeeForm::blank()
        };
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.location, None);
        assert_eq!(draft.image_url, DEFAULT_AVATAR_URL);
    }

    #[test]
    fn absence_form_round_trips_dates() {
        let form = AbsenceForm {
            date: "2025-04-02".into(),
            time_range: "4:00 PM - 12:00 AM".into(),
            site: "pune".into(),
        };
        let draft = form.to_draft().unwrap();
        let record = AbsenceRecord {
            id: Id::new("absent2"),
            date: draft.date,
            time_range: draft.time_range,
            site: draft.site,
        };
        assert_eq!(AbsenceForm::from(&record), form);

        let bad = AbsenceForm {
            date: "02/04/2025".into(),
            ..form
        };
        assert!(matches!(bad.to_draft(), Err(FormError::InvalidDate(_))));
    }

    #[test]
    fn stats_form_requires_numeric_sites() {
        let form = CurrentStatsForm {
            assigned: "3/5".into(),
            sites: "many".into(),
        };
        assert!(matches!(
            form.to_stats(),
            Err(FormError::InvalidNumber { field: "sites", .. })
        ));
    }
}
