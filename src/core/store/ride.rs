use serde::{Deserialize, Serialize};

use crate::core::{model::Id, store::StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RideStatus {
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "not started")]
    NotStarted,
    #[serde(rename = "completed")]
    Completed,
    #[serde(other)]
    Other,
}

impl RideStatus {
    pub fn label(self) -> &'static str {
        match self {
            RideStatus::InProgress => "in progress",
            RideStatus::NotStarted => "not started",
            RideStatus::Completed => "completed",
            RideStatus::Other => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveRide {
    #[serde(default = "Id::generate")]
    pub id: Id,
    pub status: RideStatus,
    pub vehicle: String,
    pub driver: String,
    pub destination: String,
    pub material: String,
    /// km/h, `None` when the vehicle is not reporting.
    pub speed: Option<f64>,
    pub battery_percent: Option<u8>,
}

impl LiveRide {
    pub fn validate(&self) -> Result<(), StoreError> {
        if let Some(speed) = self.speed
            && !(speed.is_finite() && speed >= 0.0)
        {
            return Err(StoreError::InvalidRecord {
                kind: "live ride",
                id: self.id.clone(),
                reason: format!("speed must be a non-negative number, got {speed}"),
            });
        }
        if let Some(battery) = self.battery_percent
            && battery > 100
        {
            return Err(StoreError::InvalidRecord {
                kind: "live ride",
                id: self.id.clone(),
                reason: format!("battery must be within 0-100, got {battery}"),
            });
        }
        Ok(())
    }

    /// `Ride` followed by the last four characters of the id.
    pub fn short_label(&self) -> String {
        let chars: Vec<char> = self.id.as_str().chars().collect();
        let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
        format!("Ride {tail}")
    }

    pub fn speed_display(&self) -> String {
        match self.speed {
            Some(speed) => format!("{speed} km/h"),
            None => "N/A".to_string(),
        }
    }

    pub fn battery_level(&self) -> Option<BatteryLevel> {
        self.battery_percent.map(|battery| match battery {
            0..20 => BatteryLevel::Low,
            20..50 => BatteryLevel::Medium,
            _ => BatteryLevel::High,
        })
    }

    pub fn battery_display(&self) -> String {
        match self.battery_percent {
            Some(battery) => format!("{battery}%"),
            None => "N/A".to_string(),
        }
    }
}
