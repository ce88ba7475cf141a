//! Initial dataset the dashboard store is built from.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use time::macros::date;

use crate::core::{
    model::{Coordinate, Id},
    store::{
        AbsenceRecord, CurrentStats, Employee, LiveRide, Office, RideStatus, SiteInfo,
    },
};

/// Every collection is optional in the JSON form and defaults to empty.
/// Records without an `id` get a fresh one while loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seed {
    #[serde(default)]
    pub offices: Vec<Office>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub absences: Vec<AbsenceRecord>,
    #[serde(default)]
    pub live_rides: Vec<LiveRide>,
    #[serde(default)]
    pub site_info: SiteInfo,
    #[serde(default)]
    pub current_stats: CurrentStats,
}

impl Seed {
    pub fn empty() -> Self {
        Self {
            offices: Vec::new(),
            employees: Vec::new(),
            absences: Vec::new(),
            live_rides: Vec::new(),
            site_info: SiteInfo::default(),
            current_stats: CurrentStats::default(),
        }
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse seed dataset")
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("In seed file {}", path.display()))
    }
}

impl Default for Seed {
    /// The demo dataset: five offices across India, guards near them, a
    /// couple of rides.
    fn default() -> Self {
        let office = |id: &str, name: &str, address: &str, lat: f64, lng: f64, guards: u32| Office {
            id: Id::new(id),
            name: name.to_string(),
            address: address.to_string(),
            location: Coordinate::new(lat, lng),
            guard_count: guards,
        };
        let employee = |id: &str,
                        name: &str,
                        role: &str,
                        image: &str,
                        at: (f64, f64),
                        office_id: &str| Employee {
            id: Id::new(id),
            name: name.to_string(),
            role: role.to_string(),
            image_url: image.to_string(),
            location: Some(Coordinate::new(at.0, at.1)),
            office_id: Some(Id::new(office_id)),
        };
        let absence = |id: Option<&str>, date, time_range: &str, site: &str| AbsenceRecord {
            id: id.map(Id::new).unwrap_or_else(Id::generate),
            date,
            time_range: time_range.to_string(),
            site: site.to_string(),
        };

        Self {
            offices: vec![
                office("office1", "Hyderabad HQ", "Plot No. 123, HITEC City, Hyderabad", 17.4475, 78.3731, 15),
                office("office2", "Bangalore Branch", "MG Road, Bangalore", 12.9716, 77.5946, 10),
                office("office3", "Chennai Sector", "Anna Salai, Chennai", 13.0827, 80.2707, 8),
                office("office4", "Delhi Main Office", "Connaught Place, New Delhi", 28.6139, 77.2090, 20),
                office("office5", "Mumbai West", "Bandra, Mumbai", 19.0760, 72.8777, 12),
            ],
            employees: vec![
                employee("1", "Ema", "Guard", "https://randomuser.me/api/portraits/women/1.jpg", (17.4480, 78.3740), "office1"),
                employee("2", "Guard Man 1", "Guard", "https://randomuser.me/api/portraits/men/1.jpg", (12.9720, 77.5950), "office2"),
                employee("3", "Jane Doe", "Supervisor", "https://randomuser.me/api/portraits/women/2.jpg", (17.4460, 78.3720), "office1"),
                employee("4", "John Smith", "Guard", "https://randomuser.me/api/portraits/men/2.jpg", (13.0830, 80.2710), "office3"),
                employee("5", "Alex", "Guard", "https://randomuser.me/api/portraits/men/3.jpg", (28.6145, 77.2095), "office4"),
            ],
            absences: vec![
                absence(Some("absent1"), date!(2025 - 03 - 31), "4:00 PM - 12:00 AM", "smr vinay fountain"),
                absence(Some("absent2"), date!(2025 - 04 - 02), "4:00 PM - 12:00 AM", "pune"),
                absence(None, date!(2025 - 04 - 03), "11:00 AM - 4:00 PM", "Matrix Hospitals"),
                absence(None, date!(2025 - 04 - 04), "4:00 PM - 12:00 AM", "pune"),
                absence(None, date!(2025 - 04 - 05), "4:00 PM - 12:00 AM", "pune"),
            ],
            live_rides: vec![
                LiveRide {
                    id: Id::new("ride1"),
                    status: RideStatus::InProgress,
                    vehicle: "Top Power TRK".to_string(),
                    driver: "Driver 2".to_string(),
                    destination: "Matrix Hospital Mehdipatnam".to_string(),
                    material: "Cement".to_string(),
                    speed: Some(0.35),
                    battery_percent: Some(86),
                },
                LiveRide {
                    id: Id::new("ride2"),
                    status: RideStatus::NotStarted,
                    vehicle: "TEST MODEL".to_string(),
                    driver: "Pro Driver - 2".to_string(),
                    destination: "Warehouse mill 3".to_string(),
                    material: "Cement".to_string(),
                    speed: None,
                    battery_percent: None,
                },
            ],
            site_info: SiteInfo {
                id: Id::new("637ae5bb-d145-4c0f-94cf-9980431deb1f"),
                name: "New Check Road".to_string(),
                address: "Some Address, Some City".to_string(),
                supervisors: 0,
                employees: 2,
            },
            current_stats: CurrentStats {
                assigned: "0/0".to_string(),
                sites: 32,
            },
        }
    }
}
