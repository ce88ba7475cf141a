mod absence;
mod employee;
mod office;
mod ride;
mod site;

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, info};

use crate::core::{
    geo::{self, GeofenceStatus},
    model::{Coordinate, Id},
    seed::Seed,
};

pub use absence::{AbsenceRecord, NewAbsenceRecord};
pub use employee::{DEFAULT_AVATAR_URL, Employee, NewEmployee};
pub use office::{NewOffice, Office};
pub use ride::{BatteryLevel, LiveRide, RideStatus};
pub use site::{CurrentStats, SiteInfo, SiteInfoUpdate};

/// Zoom level used whenever the dashboard centres the map on something.
pub const FOCUS_ZOOM: u8 = 14;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Id },
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: Id },
    #[error("invalid {kind} {id}: {reason}")]
    InvalidRecord {
        kind: &'static str,
        id: Id,
        reason: String,
    },
}

/// A record kept in a [`Collection`].
pub trait Record: Clone {
    const KIND: &'static str;
    type Draft;
    fn id(&self) -> &Id;
    fn from_draft(id: Id, draft: Self::Draft) -> Self;
}

/// Something the store can ask to centre on a coordinate.
pub trait PanTo {
    fn pan_to(&mut self, at: Coordinate, zoom: u8);
}

/// Records in insertion order. Every id ever handed out is remembered so
/// a deleted id is never issued again.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
    issued: HashSet<Id>,
}

impl<T: Record> Collection<T> {
    pub fn from_records(records: Vec<T>) -> Result<Self, StoreError> {
        let mut issued = HashSet::with_capacity(records.len());
        for record in &records {
            if !issued.insert(record.id().clone()) {
                return Err(StoreError::DuplicateId {
                    kind: T::KIND,
                    id: record.id().clone(),
                });
            }
        }
        Ok(Self {
            items: records,
            issued,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: &Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.get(id).is_some()
    }

    pub fn add(&mut self, draft: T::Draft) -> Id {
        let id = loop {
            let candidate = Id::generate();
            if self.issued.insert(candidate.clone()) {
                break candidate;
            }
        };
        self.items.push(T::from_draft(id.clone(), draft));
        debug!(kind = T::KIND, %id, "added");
        id
    }

    pub fn update(&mut self, id: &Id, draft: T::Draft) -> Result<(), StoreError> {
        let slot = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: T::KIND,
                id: id.clone(),
            })?;
        *slot = T::from_draft(id.clone(), draft);
        debug!(kind = T::KIND, %id, "updated");
        Ok(())
    }

    pub fn delete(&mut self, id: &Id) -> Result<T, StoreError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: T::KIND,
                id: id.clone(),
            })?;
        debug!(kind = T::KIND, %id, "deleted");
        Ok(self.items.remove(index))
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank term, nothing selected.
    Cleared,
    /// Exactly one office matched; it is now selected.
    Selected(Id),
    /// No match or several; selection cleared.
    Unresolved { matches: usize },
}

/// All dashboard data plus the selection and search state layered on top.
#[derive(Debug, Clone)]
pub struct DashboardStore {
    offices: Collection<Office>,
    employees: Collection<Employee>,
    absences: Collection<AbsenceRecord>,
    live_rides: Vec<LiveRide>,
    site_info: SiteInfo,
    current_stats: CurrentStats,
    selected_office: Option<Id>,
    search_term: String,
    show_live_rides: bool,
}

impl DashboardStore {
    pub fn from_seed(seed: Seed) -> Result<Self, StoreError> {
        for ride in &seed.live_rides {
            ride.validate()?;
        }
        let mut ride_ids = HashSet::new();
        for ride in &seed.live_rides {
            if !ride_ids.insert(ride.id.clone()) {
                return Err(StoreError::DuplicateId {
                    kind: "live ride",
                    id: ride.id.clone(),
                });
            }
        }
        let store = Self {
            offices: Collection::from_records(seed.offices)?,
            employees: Collection::from_records(seed.employees)?,
            absences: Collection::from_records(seed.absences)?,
            live_rides: seed.live_rides,
            site_info: seed.site_info,
            current_stats: seed.current_stats,
            selected_office: None,
            search_term: String::new(),
            show_live_rides: false,
        };
        info!(
            offices = store.offices.len(),
            employees = store.employees.len(),
            absences = store.absences.len(),
            rides = store.live_rides.len(),
            "dashboard store loaded"
        );
        Ok(store)
    }

    pub fn offices(&self) -> &Collection<Office> {
        &self.offices
    }

    pub fn employees(&self) -> &Collection<Employee> {
        &self.employees
    }

    pub fn absences(&self) -> &Collection<AbsenceRecord> {
        &self.absences
    }

    pub fn live_rides(&self) -> &[LiveRide] {
        &self.live_rides
    }

    pub fn site_info(&self) -> &SiteInfo {
        &self.site_info
    }

    pub fn current_stats(&self) -> &CurrentStats {
        &self.current_stats
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn show_live_rides(&self) -> bool {
        self.show_live_rides
    }

    pub fn add_office(&mut self, office: NewOffice) -> Id {
        self.offices.add(office)
    }

    pub fn update_office(&mut self, id: &Id, office: NewOffice) -> Result<(), StoreError> {
        self.offices.update(id, office)
    }

    pub fn delete_office(&mut self, id: &Id) -> Result<Office, StoreError> {
        let removed = self.offices.delete(id)?;
        if self.selected_office.as_ref() == Some(id) {
            debug!(%id, "selected office deleted, clearing selection");
            self.selected_office = None;
        }
        Ok(removed)
    }

    pub fn add_employee(&mut self, employee: NewEmployee) -> Id {
        self.employees.add(employee)
    }

    pub fn update_employee(&mut self, id: &Id, employee: NewEmployee) -> Result<(), StoreError> {
        self.employees.update(id, employee)
    }

    pub fn delete_employee(&mut self, id: &Id) -> Result<Employee, StoreError> {
        self.employees.delete(id)
    }

    pub fn add_absence(&mut self, absence: NewAbsenceRecord) -> Id {
        self.absences.add(absence)
    }

    pub fn update_absence(
        &mut self,
        id: &Id,
        absence: NewAbsenceRecord,
    ) -> Result<(), StoreError> {
        self.absences.update(id, absence)
    }

    pub fn delete_absence(&mut self, id: &Id) -> Result<AbsenceRecord, StoreError> {
        self.absences.delete(id)
    }

    pub fn update_site_info(&mut self, update: SiteInfoUpdate) {
        self.site_info = SiteInfo {
            id: self.site_info.id.clone(),
            name: update.name,
            address: update.address,
            supervisors: update.supervisors,
            employees: update.employees,
        };
        info!(site = %self.site_info.id, "site information saved");
    }

    pub fn update_current_stats(&mut self, stats: CurrentStats) {
        self.current_stats = stats;
        info!(
            assigned = %self.current_stats.assigned,
            sites = self.current_stats.sites,
            "current stats saved"
        );
    }

    pub fn toggle_live_rides(&mut self) -> bool {
        self.show_live_rides = !self.show_live_rides;
        self.show_live_rides
    }

    /// Resolves the selection against the live collection.
    pub fn selected_office(&self) -> Option<&Office> {
        self.selected_office
            .as_ref()
            .and_then(|id| self.offices.get(id))
    }

    pub fn select_office(&mut self, id: &Id) -> Result<(), StoreError> {
        if !self.offices.contains(id) {
            return Err(StoreError::NotFound {
                kind: "office",
                id: id.clone(),
            });
        }
        self.selected_office = Some(id.clone());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected_office = None;
    }

    pub fn matching_offices(&self, term: &str) -> Vec<&Office> {
        let needle = term.to_lowercase();
        self.offices
            .iter()
            .filter(|office| office.matches(&needle))
            .collect()
    }

    /// Stores `term` and selects the office it uniquely identifies, panning
    /// `map` to it. Anything other than a single match clears the selection.
    pub fn search(&mut self, term: &str, map: &mut impl PanTo) -> SearchOutcome {
        self.search_term = term.to_string();
        if term.trim().is_empty() {
            self.selected_office = None;
            return SearchOutcome::Cleared;
        }

        let matches: Vec<(Id, Coordinate)> = self
            .matching_offices(term)
            .into_iter()
            .map(|office| (office.id.clone(), office.location))
            .collect();
        match matches.as_slice() {
            [(id, location)] => {
                map.pan_to(*location, FOCUS_ZOOM);
                self.selected_office = Some(id.clone());
                debug!(term, %id, "search resolved to a single office");
                SearchOutcome::Selected(id.clone())
            }
            _ => {
                self.selected_office = None;
                debug!(term, matches = matches.len(), "search did not resolve");
                SearchOutcome::Unresolved {
                    matches: matches.len(),
                }
            }
        }
    }

    pub fn focus_office(&mut self, id: &Id, map: &mut impl PanTo) -> Result<(), StoreError> {
        let location = self
            .offices
            .get(id)
            .map(|office| office.location)
            .ok_or_else(|| StoreError::NotFound {
                kind: "office",
                id: id.clone(),
            })?;
        map.pan_to(location, FOCUS_ZOOM);
        self.selected_office = Some(id.clone());
        Ok(())
    }

    /// Pans to an employee's last known position. Returns `false` when the
    /// employee has no position; the office selection is left untouched.
    pub fn focus_employee(&self, id: &Id, map: &mut impl PanTo) -> Result<bool, StoreError> {
        let employee = self.employees.get(id).ok_or_else(|| StoreError::NotFound {
            kind: "employee",
            id: id.clone(),
        })?;
        match employee.location {
            Some(location) => {
                map.pan_to(location, FOCUS_ZOOM);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn assigned_office(&self, employee: &Employee) -> Option<&Office> {
        employee
            .office_id
            .as_ref()
            .and_then(|office_id| self.offices.get(office_id))
    }

    /// `None` when the employee has no known position.
    pub fn geofence_status(&self, employee: &Employee) -> Option<GeofenceStatus> {
        let position = employee.location?;
        let office = self.assigned_office(employee).map(|office| office.location);
        Some(geo::classify(position, office))
    }
}
