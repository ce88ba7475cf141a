use std::collections::BTreeMap;
use std::future::Future;
use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use patrolboard::core::{
    auth::{AuthEvent, AuthFlow, OTP_LENGTH, PendingAction},
    avatar::{AvatarError, AvatarFetcher},
    map::{Circle, Layer, LayerId, MapSurface, Marker},
    model::{Coordinate, Id},
    seed::Seed,
    store::{DashboardStore, Employee, NewAbsenceRecord, NewEmployee, NewOffice, Office, PanTo},
};
use tempfile::NamedTempFile;
use time::macros::date;

/// Location of the demo "Hyderabad HQ" office.
pub const HYDERABAD: Coordinate = Coordinate::new(17.4475, 78.3731);
pub const PUNE: Coordinate = Coordinate::new(18.5913, 73.7389);

/// Store built from the built-in demo dataset.
pub fn create_test_store() -> DashboardStore {
    DashboardStore::from_seed(Seed::default()).expect("Demo dataset must load")
}

pub fn make_office(id: &str, name: &str, at: Coordinate) -> Office {
    Office {
        id: Id::new(id),
        name: name.to_string(),
        address: format!("{name} address"),
        location: at,
        guard_count: 3,
    }
}

pub fn make_employee(id: &str, name: &str, at: Option<Coordinate>, office: Option<&str>) -> Employee {
    Employee {
        id: Id::new(id),
        name: name.to_string(),
        role: "Guard".to_string(),
        image_url: format!("https://example.test/{id}.jpg"),
        location: at,
        office_id: office.map(Id::new),
    }
}

pub fn make_new_office(name: &str, address: &str, at: Coordinate) -> NewOffice {
    NewOffice {
        name: name.to_string(),
        address: address.to_string(),
        location: at,
        guard_count: 6,
    }
}

pub fn make_new_employee(name: &str, at: Option<Coordinate>, office: Option<&str>) -> NewEmployee {
    NewEmployee {
        name: name.to_string(),
        role: "Guard".to_string(),
        image_url: "https://example.test/new.jpg".to_string(),
        location: at,
        office_id: office.map(Id::new),
    }
}

pub fn make_new_absence(site: &str) -> NewAbsenceRecord {
    NewAbsenceRecord {
        date: date!(2025 - 04 - 10),
        time_range: "11:00 AM - 4:00 PM".to_string(),
        site: site.to_string(),
    }
}

/// Writes `seed` as JSON to a temp file that lives as long as the handle.
pub fn create_seed_file(seed: &Seed) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("Failed to create temp seed file");
    let json = serde_json::to_string_pretty(seed).expect("Failed to serialize seed");
    std::fs::write(file.path(), json).expect("Failed to write seed file");
    file
}

pub fn create_json_file(json: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("Failed to create temp seed file");
    std::fs::write(file.path(), json).expect("Failed to write seed file");
    file
}

/// PNG bytes of a solid red image.
pub fn make_test_png(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_fn(width, height, |_, _| Rgb([255u8, 0u8, 0u8]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("Failed to encode test image");
    bytes
}

/// A map surface that records every call and keeps the live layers.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next: LayerId,
    pub live: BTreeMap<LayerId, Layer>,
    pub removed: Vec<LayerId>,
    pub views: Vec<(Coordinate, u8)>,
}

impl RecordingSurface {
    pub fn markers(&self) -> Vec<&Marker> {
        self.live
            .values()
            .filter_map(|layer| match layer {
                Layer::Marker(marker) => Some(marker),
                Layer::Circle(_) => None,
            })
            .collect()
    }

    pub fn circles(&self) -> Vec<&Circle> {
        self.live
            .values()
            .filter_map(|layer| match layer {
                Layer::Circle(circle) => Some(circle),
                Layer::Marker(_) => None,
            })
            .collect()
    }

    pub fn marker_named(&self, label: &str) -> Option<&Marker> {
        self.markers().into_iter().find(|marker| marker.label == label)
    }
}

impl MapSurface for RecordingSurface {
    fn add_marker(&mut self, marker: Marker) -> LayerId {
        self.next += 1;
        self.live.insert(self.next, Layer::Marker(marker));
        self.next
    }

    fn add_circle(&mut self, circle: Circle) -> LayerId {
        self.next += 1;
        self.live.insert(self.next, Layer::Circle(circle));
        self.next
    }

    fn remove_layer(&mut self, layer: LayerId) {
        self.live.remove(&layer);
        self.removed.push(layer);
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.views.push((center, zoom));
    }
}

/// Records the pans a store operation asks for.
#[derive(Debug, Default)]
pub struct PanRecorder {
    pub pans: Vec<(Coordinate, u8)>,
}

impl PanTo for PanRecorder {
    fn pan_to(&mut self, at: Coordinate, zoom: u8) {
        self.pans.push((at, zoom));
    }
}

/// Serves a canned response for every avatar source.
#[derive(Debug, Clone)]
pub struct FakeFetcher {
    pub response: Result<Vec<u8>, u16>,
}

impl AvatarFetcher for FakeFetcher {
    fn fetch(&self, _source: &str) -> impl Future<Output = Result<Vec<u8>, AvatarError>> + Send {
        let response = self.response.clone().map_err(AvatarError::Status);
        async move { response }
    }
}

/// Types `code` into the verification slots, one digit per slot.
pub fn enter_otp(flow: &mut AuthFlow, code: &str) -> anyhow::Result<()> {
    for index in 0..OTP_LENGTH {
        let value = code.chars().nth(index).map(String::from).unwrap_or_default();
        flow.handle(AuthEvent::OtpDigitChanged { index, value })?;
    }
    Ok(())
}

/// Walks a fresh flow to the verification screen without waiting on a
/// backend, resolving each request by hand.
pub fn reach_otp_screen(flow: &mut AuthFlow, phone: &str) -> anyhow::Result<()> {
    flow.handle(AuthEvent::ForgotPassword)?;
    flow.handle(AuthEvent::PhoneChanged(phone.to_string()))?;
    flow.handle(AuthEvent::Submit)?;
    flow.handle(AuthEvent::Resolved(PendingAction::SendOtp {
        phone: phone.to_string(),
    }))?;
    Ok(())
}

pub fn reach_new_password_screen(flow: &mut AuthFlow) -> anyhow::Result<()> {
    reach_otp_screen(flow, "9998887776")?;
    enter_otp(flow, "1234")?;
    flow.handle(AuthEvent::Submit)?;
    flow.handle(AuthEvent::Resolved(PendingAction::VerifyOtp))?;
    Ok(())
}
