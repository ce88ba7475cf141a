//! Marker and geofence bookkeeping on top of an abstract map surface.
//!
//! [`MapView`] owns every layer it places and rebuilds them from scratch on
//! each [`MapView::sync`]. The surface itself only needs to place markers
//! and circles, remove them again, and move its viewport.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, trace};

use crate::core::{
    geo::{self, GEOFENCE_RADIUS_M, GeofenceStatus},
    model::{Color, Coordinate, Id},
    store::{Employee, Office, PanTo},
};

pub type LayerId = u64;

/// Centre of India, where the map opens.
pub const INITIAL_CENTER: Coordinate = Coordinate::new(20.5937, 78.9629);
pub const INITIAL_ZOOM: u8 = 5;
pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 18;

#[derive(Debug, Clone, PartialEq)]
pub enum MarkerKind {
    Office,
    Guard { avatar_url: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    pub kind: MarkerKind,
    pub color: Color,
    pub label: String,
    pub popup: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Coordinate,
    pub radius_m: f64,
    pub color: Color,
}

/// The mapping capability the dashboard draws on.
pub trait MapSurface {
    fn add_marker(&mut self, marker: Marker) -> LayerId;
    fn add_circle(&mut self, circle: Circle) -> LayerId;
    /// Removing an unknown layer is a no-op.
    fn remove_layer(&mut self, layer: LayerId);
    fn set_view(&mut self, center: Coordinate, zoom: u8);
}

impl<S: MapSurface + ?Sized> MapSurface for &mut S {
    fn add_marker(&mut self, marker: Marker) -> LayerId {
        (**self).add_marker(marker)
    }

    fn add_circle(&mut self, circle: Circle) -> LayerId {
        (**self).add_circle(circle)
    }

    fn remove_layer(&mut self, layer: LayerId) {
        (**self).remove_layer(layer)
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        (**self).set_view(center, zoom)
    }
}

/// Geofence classification of one guard, as of the last sync.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardPlacement {
    pub employee_id: Id,
    pub name: String,
    pub office_name: Option<String>,
    pub status: GeofenceStatus,
}

pub struct MapView<S: MapSurface> {
    surface: S,
    layers: Vec<LayerId>,
    office_markers: HashMap<LayerId, Id>,
    guards: Vec<GuardPlacement>,
}

impl<S: MapSurface> MapView<S> {
    pub fn new(mut surface: S) -> Self {
        surface.set_view(INITIAL_CENTER, INITIAL_ZOOM);
        Self {
            surface,
            layers: Vec::new(),
            office_markers: HashMap::new(),
            guards: Vec::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn guards(&self) -> &[GuardPlacement] {
        &self.guards
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Removes every layer this view placed. Safe to call repeatedly.
    pub fn clear(&mut self) {
        for layer in self.layers.drain(..) {
            self.surface.remove_layer(layer);
        }
        self.office_markers.clear();
        self.guards.clear();
    }

    /// Redraws offices, their geofences and every employee with a known
    /// position.
    pub fn sync<'a>(
        &mut self,
        offices: impl IntoIterator<Item = &'a Office>,
        employees: impl IntoIterator<Item = &'a Employee>,
    ) {
        self.clear();

        let offices: Vec<&Office> = offices.into_iter().collect();
        for office in &offices {
            let marker = self.surface.add_marker(Marker {
                position: office.location,
                kind: MarkerKind::Office,
                color: Color::BLUE,
                label: office.name.clone(),
                popup: Some(office.popup_text()),
            });
            let circle = self.surface.add_circle(Circle {
                center: office.location,
                radius_m: GEOFENCE_RADIUS_M,
                color: Color::BLUE,
            });
            self.office_markers.insert(marker, office.id.clone());
            self.layers.extend([marker, circle]);
        }

        for employee in employees {
            let Some(position) = employee.location else {
                continue;
            };
            let office = employee
                .office_id
                .as_ref()
                .and_then(|id| offices.iter().find(|office| &office.id == id));
            let status = geo::classify(position, office.map(|office| office.location));
            let outside = status.is_outside();

            let mut popup = format!(
                "Guard: {}\nOffice: {}",
                employee.name,
                office.map_or("N/A", |office| office.name.as_str())
            );
            if outside {
                popup.push_str("\nOutside Geofence!");
            }
            let marker = self.surface.add_marker(Marker {
                position,
                kind: MarkerKind::Guard {
                    avatar_url: employee.image_url.clone(),
                },
                color: if outside { Color::RED } else { Color::GREEN },
                label: employee.name.clone(),
                popup: Some(popup),
            });
            self.layers.push(marker);
            trace!(employee = %employee.id, ?status, "placed guard");
            self.guards.push(GuardPlacement {
                employee_id: employee.id.clone(),
                name: employee.name.clone(),
                office_name: office.map(|office| office.name.clone()),
                status,
            });
        }

        debug!(
            offices = offices.len(),
            guards = self.guards.len(),
            outside = self.guards.iter().filter(|g| g.status.is_outside()).count(),
            "map synced"
        );
    }

    /// Resolves a clicked layer to the office it marks, if any.
    pub fn marker_clicked(&self, layer: LayerId) -> Option<&Id> {
        self.office_markers.get(&layer)
    }

    /// Pan/zoom capability handed to whoever drives the map.
    pub fn handle(&mut self) -> MapHandle<'_, S> {
        MapHandle { view: self }
    }

    /// Tears down every layer; the view can be synced again afterwards.
    pub fn unmount(&mut self) {
        debug!(layers = self.layers.len(), "unmounting map view");
        self.clear();
    }
}

impl<S: MapSurface> Drop for MapView<S> {
    fn drop(&mut self) {
        self.clear();
    }
}

pub struct MapHandle<'a, S: MapSurface> {
    view: &'a mut MapView<S>,
}

impl<S: MapSurface> MapHandle<'_, S> {
    pub fn pan_to(&mut self, center: Coordinate, zoom: u8) {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        debug!(lat = center.latitude, lng = center.longitude, zoom, "pan to");
        self.view.surface.set_view(center, zoom);
    }
}

impl<S: MapSurface> PanTo for MapHandle<'_, S> {
    fn pan_to(&mut self, at: Coordinate, zoom: u8) {
        MapHandle::pan_to(self, at, zoom);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Marker(Marker),
    Circle(Circle),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coordinate,
    pub zoom: u8,
}

/// Size of one Web-Mercator tile in pixels.
const TILE_SIZE: f64 = 256.0;
/// Web-Mercator is undefined at the poles; latitudes are clamped to this.
pub const MAX_LATITUDE: f64 = 85.05112878;
/// Clicks within this many pixels of a marker hit it.
pub const HIT_RADIUS_PX: f64 = 14.0;

/// An in-memory [`MapSurface`]: the layers currently placed plus the
/// viewport, with the projection needed to draw them.
#[derive(Debug, Clone)]
pub struct Scene {
    layers: BTreeMap<LayerId, Layer>,
    next_layer: LayerId,
    viewport: Viewport,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            layers: BTreeMap::new(),
            next_layer: 1,
            viewport: Viewport {
                center: INITIAL_CENTER,
                zoom: INITIAL_ZOOM,
            },
        }
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn markers(&self) -> impl Iterator<Item = (LayerId, &Marker)> {
        self.layers.iter().filter_map(|(id, layer)| match layer {
            Layer::Marker(marker) => Some((*id, marker)),
            Layer::Circle(_) => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &Circle> {
        self.layers.values().filter_map(|layer| match layer {
            Layer::Circle(circle) => Some(circle),
            Layer::Marker(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom = (self.viewport.zoom + 1).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom = self.viewport.zoom.saturating_sub(1).max(MIN_ZOOM);
    }

    fn world_px(&self, at: Coordinate) -> (f64, f64) {
        let scale = TILE_SIZE * 2f64.powi(self.viewport.zoom as i32);
        let lat = at.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = (at.longitude + 180.0) / 360.0 * scale;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) / 2.0 * scale;
        (x, y)
    }

    /// Projects `at` onto a canvas of `width` x `height` pixels centred on
    /// the viewport.
    pub fn project(&self, at: Coordinate, width: f64, height: f64) -> (f64, f64) {
        let (cx, cy) = self.world_px(self.viewport.center);
        let (x, y) = self.world_px(at);
        (x - cx + width / 2.0, y - cy + height / 2.0)
    }

    /// Ground distance in meters converted to pixels at the given latitude.
    pub fn meters_to_px(&self, meters: f64, latitude: f64) -> f64 {
        let latitude = latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let meters_per_px = 2.0 * std::f64::consts::PI * geo::EARTH_RADIUS_M
            * latitude.to_radians().cos()
            / (TILE_SIZE * 2f64.powi(self.viewport.zoom as i32));
        meters / meters_per_px
    }

    /// Canvas centre and pixel radius of `circle`, or `None` when it lies
    /// entirely off a `width` x `height` canvas. The radius never exceeds
    /// the canvas diagonal.
    pub fn circle_on_canvas(
        &self,
        circle: &Circle,
        width: f64,
        height: f64,
    ) -> Option<((f64, f64), f64)> {
        let (x, y) = self.project(circle.center, width, height);
        let radius = self.meters_to_px(circle.radius_m, circle.center.latitude);
        if x + radius < 0.0 || x - radius > width || y + radius < 0.0 || y - radius > height {
            return None;
        }
        Some(((x, y), radius.min(width.hypot(height))))
    }

    /// Topmost marker under the canvas point `(x, y)`.
    pub fn hit_test(&self, x: f64, y: f64, width: f64, height: f64) -> Option<LayerId> {
        self.markers()
            .filter(|(_, marker)| {
                let (mx, my) = self.project(marker.position, width, height);
                (mx - x).hypot(my - y) <= HIT_RADIUS_PX
            })
            .map(|(id, _)| id)
            .last()
    }
}

impl MapSurface for Scene {
    fn add_marker(&mut self, marker: Marker) -> LayerId {
        let id = self.next_layer;
        self.next_layer += 1;
        self.layers.insert(id, Layer::Marker(marker));
        id
    }

    fn add_circle(&mut self, circle: Circle) -> LayerId {
        let id = self.next_layer;
        self.next_layer += 1;
        self.layers.insert(id, Layer::Circle(circle));
        id
    }

    fn remove_layer(&mut self, layer: LayerId) {
        self.layers.remove(&layer);
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.viewport = Viewport { center, zoom };
    }
}
