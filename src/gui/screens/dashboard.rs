use std::collections::{BTreeSet, HashMap};
use std::fmt;

use anyhow::Context;
use iced::{
    Alignment::Center,
    Element, Length, Point, Task,
    widget::{
        button, canvas, column, container, image, mouse_area, pick_list, row, scrollable, text,
        text_input,
    },
};
use tracing::{debug, error, info};

use crate::{
    core::{
        avatar::{Avatar, AvatarLoader, DefaultFetcher},
        forms::{
            AbsenceForm, CurrentStatsForm, EmployeeForm, FormError, OfficeForm, SiteInfoForm,
        },
        geo::{GEOFENCE_RADIUS_M, GeofenceStatus},
        map::{MapView, Scene},
        model::Id,
        store::{BatteryLevel, DashboardStore, Employee, LiveRide, Office, SearchOutcome},
    },
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
        widgets::{
            ERROR_COLOR, NOTICE_COLOR, accent_card, card, error_text, labeled_input, layout,
            map::{MAP_HEIGHT, MAP_WIDTH, MapCanvas},
            section,
        },
    },
};

/// A field of whichever edit dialog is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Address,
    Latitude,
    Longitude,
    GuardCount,
    Role,
    ImageUrl,
    Date,
    TimeRange,
    Site,
    Supervisors,
    Employees,
    Assigned,
    Sites,
}

/// Entry of the office picker in the employee dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct OfficeChoice {
    id: Option<Id>,
    name: String,
}

impl fmt::Display for OfficeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone)]
pub enum DashboardMessage {
    SearchChanged(String),
    MapCursorMoved(Point),
    MapPressed,
    ZoomIn,
    ZoomOut,
    FocusOffice(Id),
    FocusEmployee(Id),
    CloseSelection,
    ToggleLiveRides,
    AddOffice,
    EditOffice(Id),
    DeleteOffice(Id),
    AddEmployee,
    EditEmployee(Id),
    DeleteEmployee(Id),
    AddAbsence,
    EditAbsence(Id),
    DeleteAbsence(Id),
    EditSiteInfo,
    EditCurrentStats,
    FieldChanged(Field, String),
    OfficeAssigned(OfficeChoice),
    SaveModal,
    CancelModal,
    AvatarLoaded { url: String, handle: image::Handle },
    GoBack,
}

#[derive(Debug, Clone)]
pub enum DashboardParentMessage {
    GoBack,
}

/// The edit dialog currently shown. `editing` is `None` when adding.
#[derive(Debug, Clone)]
enum Modal {
    Office {
        editing: Option<Id>,
        form: OfficeForm,
        error: Option<FormError>,
    },
    Employee {
        editing: Option<Id>,
        form: EmployeeForm,
        error: Option<FormError>,
    },
    Absence {
        editing: Option<Id>,
        form: AbsenceForm,
        error: Option<FormError>,
    },
    SiteInfo {
        form: SiteInfoForm,
        error: Option<FormError>,
    },
    CurrentStats {
        form: CurrentStatsForm,
        error: Option<FormError>,
    },
}

impl Modal {
    fn title(&self) -> &'static str {
        match self {
            Modal::Office { editing: None, .. } => "Add Office",
            Modal::Office { .. } => "Edit Office",
            Modal::Employee { editing: None, .. } => "Add Employee",
            Modal::Employee { .. } => "Edit Employee",
            Modal::Absence { editing: None, .. } => "Add Absence Record",
            Modal::Absence { .. } => "Edit Absence Record",
            Modal::SiteInfo { .. } => "Edit Site Information",
            Modal::CurrentStats { .. } => "Edit Current Stats",
        }
    }

    fn set_field(&mut self, field: Field, value: String) {
        let slot = match (self, field) {
            (Modal::Office { form, .. }, Field::Name) => &mut form.name,
            (Modal::Office { form, .. }, Field::Address) => &mut form.address,
            (Modal::Office { form, .. }, Field::Latitude) => &mut form.latitude,
            (Modal::Office { form, .. }, Field::Longitude) => &mut form.longitude,
            (Modal::Office { form, .. }, Field::GuardCount) => &mut form.guard_count,
            (Modal::Employee { form, .. }, Field::Name) => &mut form.name,
            (Modal::Employee { form, .. }, Field::Role) => &mut form.role,
            (Modal::Employee { form, .. }, Field::ImageUrl) => &mut form.image_url,
            (Modal::Employee { form, .. }, Field::Latitude) => &mut form.latitude,
            (Modal::Employee { form, .. }, Field::Longitude) => &mut form.longitude,
            (Modal::Absence { form, .. }, Field::Date) => &mut form.date,
            (Modal::Absence { form, .. }, Field::TimeRange) => &mut form.time_range,
            (Modal::Absence { form, .. }, Field::Site) => &mut form.site,
            (Modal::SiteInfo { form, .. }, Field::Name) => &mut form.name,
            (Modal::SiteInfo { form, .. }, Field::Address) => &mut form.address,
            (Modal::SiteInfo { form, .. }, Field::Supervisors) => &mut form.supervisors,
            (Modal::SiteInfo { form, .. }, Field::Employees) => &mut form.employees,
            (Modal::CurrentStats { form, .. }, Field::Assigned) => &mut form.assigned,
            (Modal::CurrentStats { form, .. }, Field::Sites) => &mut form.sites,
            (_, field) => {
                debug!(?field, "field does not belong to the open dialog");
                return;
            }
        };
        *slot = value;
    }
}

/// What a successful save changed.
enum Saved {
    Map,
    Avatar(String),
    Panel,
}

pub struct DashboardScreen {
    store: DashboardStore,
    map: MapView<Scene>,
    modal: Option<Modal>,
    cursor: Option<Point>,
    popup: Option<String>,
    avatars: HashMap<String, image::Handle>,
    placeholder: image::Handle,
    loader: AvatarLoader<DefaultFetcher>,
    allow_back: bool,
}

fn avatar_handle(avatar: Avatar) -> image::Handle {
    image::Handle::from_rgba(avatar.width, avatar.height, avatar.pixels)
}

impl DashboardScreen {
    pub fn new(state: &AppState) -> anyhow::Result<(Self, Task<DashboardMessage>)> {
        let store = DashboardStore::from_seed(state.config.seed.clone())
            .context("Seed dataset rejected")?;
        let mut map = MapView::new(Scene::new());
        map.sync(store.offices(), store.employees());

        let screen = Self {
            store,
            map,
            modal: None,
            cursor: None,
            popup: None,
            avatars: HashMap::new(),
            placeholder: avatar_handle(Avatar::placeholder()),
            loader: AvatarLoader::new(DefaultFetcher::default()),
            allow_back: state.config.allow_back,
        };
        let urls: BTreeSet<String> = screen
            .store
            .employees()
            .iter()
            .map(|employee| employee.image_url.clone())
            .collect();
        let task = Task::batch(urls.into_iter().map(|url| screen.load_avatar(url)));
        Ok((screen, task))
    }

    fn load_avatar(&self, url: String) -> Task<DashboardMessage> {
        let loader = self.loader.clone();
        Task::perform(
            async move {
                let avatar = loader.load(&url).await;
                (url, avatar)
            },
            |(url, avatar)| DashboardMessage::AvatarLoaded {
                url,
                handle: avatar_handle(avatar),
            },
        )
    }

    fn resync_map(&mut self) {
        self.map.sync(self.store.offices(), self.store.employees());
    }

    fn map_pressed(&mut self) {
        let Some(cursor) = self.cursor else {
            return;
        };
        let scene = self.map.surface();
        let Some(layer) = scene.hit_test(
            cursor.x as f64,
            cursor.y as f64,
            MAP_WIDTH as f64,
            MAP_HEIGHT as f64,
        ) else {
            self.popup = None;
            return;
        };
        self.popup = scene
            .markers()
            .find(|(id, _)| *id == layer)
            .and_then(|(_, marker)| marker.popup.clone());
        if let Some(office) = self.map.marker_clicked(layer).cloned() {
            debug!(%office, "office marker clicked");
            if let Err(e) = self.store.select_office(&office) {
                error!("Marker refers to a missing office: {e}");
            }
        }
    }

    fn save_modal(&mut self) -> Result<Saved, FormError> {
        let Some(modal) = &self.modal else {
            return Ok(Saved::Panel);
        };
        let result = match modal {
            Modal::Office { editing, form, .. } => {
                let draft = form.to_draft()?;
                let result = match editing {
                    Some(id) => self.store.update_office(id, draft),
                    None => {
                        self.store.add_office(draft);
                        Ok(())
                    }
                };
                result.map(|()| Saved::Map)
            }
            Modal::Employee { editing, form, .. } => {
                let draft = form.to_draft()?;
                let url = draft.image_url.clone();
                let result = match editing {
                    Some(id) => self.store.update_employee(id, draft),
                    None => {
                        self.store.add_employee(draft);
                        Ok(())
                    }
                };
                result.map(|()| Saved::Avatar(url))
            }
            Modal::Absence { editing, form, .. } => {
                let draft = form.to_draft()?;
                let result = match editing {
                    Some(id) => self.store.update_absence(id, draft),
                    None => {
                        self.store.add_absence(draft);
                        Ok(())
                    }
                };
                result.map(|()| Saved::Panel)
            }
            Modal::SiteInfo { form, .. } => {
                self.store.update_site_info(form.to_update()?);
                Ok(Saved::Panel)
            }
            Modal::CurrentStats { form, .. } => {
                self.store.update_current_stats(form.to_stats()?);
                Ok(Saved::Panel)
            }
        };
        // The record vanished while the dialog was open; nothing to save into.
        Ok(result.unwrap_or_else(|e| {
            error!("Save failed: {e}");
            Saved::Panel
        }))
    }

    fn header(&self) -> Element<'_, ScreenMessage<Self>> {
        let mut header = row![
            text("Admin Dashboard").size(28).width(Length::Fill),
            text_input("Search offices by name or address", self.store.search_term())
                .on_input(|term| msg(DashboardMessage::SearchChanged(term)))
                .width(Length::Fixed(360.0))
                .padding(8),
        ]
        .spacing(16)
        .align_y(Center);
        if self.allow_back {
            header = header.push(
                button("Back")
                    .style(button::secondary)
                    .on_press(msg(DashboardMessage::GoBack)),
            );
        }
        header.into()
    }

    fn map_column(&self) -> Element<'_, ScreenMessage<Self>> {
        let map = mouse_area(
            canvas(MapCanvas {
                scene: self.map.surface(),
            })
            .width(Length::Fixed(MAP_WIDTH))
            .height(Length::Fixed(MAP_HEIGHT)),
        )
        .on_move(|point| msg(DashboardMessage::MapCursorMoved(point)))
        .on_press(msg(DashboardMessage::MapPressed));

        let viewport = self.map.surface().viewport();
        let controls = row![
            button("+").on_press(msg(DashboardMessage::ZoomIn)),
            button("-").on_press(msg(DashboardMessage::ZoomOut)),
            text(format!("{} | Zoom {}", viewport.center, viewport.zoom)).size(12),
        ]
        .spacing(8)
        .align_y(Center);

        let mut col = column![map, controls].spacing(8);
        if let Some(popup) = &self.popup {
            col = col.push(card(text(popup.as_str())));
        }
        if let Some(office) = self.store.selected_office() {
            col = col.push(self.selected_office_panel(office));
        }
        col.into()
    }

    fn selected_office_panel<'a>(&'a self, office: &'a Office) -> Element<'a, ScreenMessage<Self>> {
        accent_card(
            column![
                row![
                    text(office.name.as_str()).size(20).width(Length::Fill),
                    button("Close")
                        .style(button::text)
                        .on_press(msg(DashboardMessage::CloseSelection)),
                ]
                .align_y(Center),
                text(office.address.as_str()),
                text(format!("Guards: {}", office.guard_count)),
                text(office.location.to_string()),
                text(format!(
                    "Geofence Status: Active ({}m radius)",
                    GEOFENCE_RADIUS_M
                )),
            ]
            .spacing(4),
        )
    }

    fn stats_cards(&self) -> Element<'_, ScreenMessage<Self>> {
        let stats = self.store.current_stats();
        let site = self.store.site_info();
        row![
            card(
                column![
                    text("Current Stats").size(16),
                    text(format!("Currently Assigned: {}", stats.assigned)),
                    text(format!("Sites: {}", stats.sites)),
                    button("Edit").on_press(msg(DashboardMessage::EditCurrentStats)),
                ]
                .spacing(4)
            ),
            card(
                column![
                    text(site.name.as_str()).size(16),
                    text(site.address.as_str()),
                    text(format!(
                        "Supervisors: {}  Employees: {}",
                        site.supervisors, site.employees
                    )),
                    button("Edit").on_press(msg(DashboardMessage::EditSiteInfo)),
                ]
                .spacing(4)
            ),
        ]
        .spacing(12)
        .into()
    }

    fn offices_section(&self) -> Element<'_, ScreenMessage<Self>> {
        let list = self.store.offices().iter().fold(column![].spacing(8), |list, office| {
            list.push(card(
                column![
                    text(office.name.as_str()).size(16),
                    text(office.address.as_str()).size(13),
                    text(format!("Guards: {}", office.guard_count)).size(13),
                    row![
                        button("Focus on Map")
                            .on_press(msg(DashboardMessage::FocusOffice(office.id.clone()))),
                        button("Edit")
                            .style(button::secondary)
                            .on_press(msg(DashboardMessage::EditOffice(office.id.clone()))),
                        button("Delete")
                            .style(button::danger)
                            .on_press(msg(DashboardMessage::DeleteOffice(office.id.clone()))),
                    ]
                    .spacing(8),
                ]
                .spacing(4),
            ))
        });
        section(
            "Offices",
            Some(button("Add Office").on_press(msg(DashboardMessage::AddOffice)).into()),
            list,
        )
    }

    fn employee_card<'a>(&'a self, employee: &'a Employee) -> Element<'a, ScreenMessage<Self>> {
        let avatar = self
            .avatars
            .get(&employee.image_url)
            .unwrap_or(&self.placeholder)
            .clone();
        let office = self
            .store
            .assigned_office(employee)
            .map_or("N/A", |office| office.name.as_str());

        let mut details = column![
            text(employee.name.as_str()).size(16),
            text(employee.role.as_str()).size(13),
            text(format!("Office: {office}")).size(13),
        ]
        .spacing(2);
        if let Some(location) = employee.location {
            details = details.push(text(location.to_string()).size(13));
        }
        details = match self.store.geofence_status(employee) {
            None => details.push(text("Location unknown").size(13)),
            Some(GeofenceStatus::Unassigned) => details,
            Some(GeofenceStatus::Inside { distance_m }) => details.push(
                text(format!("Inside geofence ({distance_m:.0} m)"))
                    .size(13)
                    .color(NOTICE_COLOR),
            ),
            Some(GeofenceStatus::Outside { distance_m }) => details.push(
                text(format!("Outside Geofence! ({distance_m:.0} m)"))
                    .size(13)
                    .color(ERROR_COLOR),
            ),
        };

        let mut actions = row![].spacing(8);
        if employee.location.is_some() {
            actions = actions.push(
                button("Focus on Map")
                    .on_press(msg(DashboardMessage::FocusEmployee(employee.id.clone()))),
            );
        }
        actions = actions
            .push(
                button("Edit")
                    .style(button::secondary)
                    .on_press(msg(DashboardMessage::EditEmployee(employee.id.clone()))),
            )
            .push(
                button("Delete")
                    .style(button::danger)
                    .on_press(msg(DashboardMessage::DeleteEmployee(employee.id.clone()))),
            );

        card(
            column![
                row![image(avatar).width(40).height(40), details]
                    .spacing(12)
                    .align_y(Center),
                actions,
            ]
            .spacing(8),
        )
    }

    fn employees_section(&self) -> Element<'_, ScreenMessage<Self>> {
        let list = self
            .store
            .employees()
            .iter()
            .fold(column![].spacing(8), |list, employee| {
                list.push(self.employee_card(employee))
            });
        section(
            "Employees",
            Some(button("Add Employee").on_press(msg(DashboardMessage::AddEmployee)).into()),
            list,
        )
    }

    fn absences_section(&self) -> Element<'_, ScreenMessage<Self>> {
        let list = self.store.absences().iter().fold(column![].spacing(8), |list, record| {
            list.push(card(
                row![
                    column![
                        text(record.date.to_string()).size(14),
                        text(record.time_range.as_str()).size(13),
                        text(record.site.as_str()).size(13),
                    ]
                    .width(Length::Fill),
                    button("Edit")
                        .style(button::secondary)
                        .on_press(msg(DashboardMessage::EditAbsence(record.id.clone()))),
                    button("Delete")
                        .style(button::danger)
                        .on_press(msg(DashboardMessage::DeleteAbsence(record.id.clone()))),
                ]
                .spacing(8)
                .align_y(Center),
            ))
        });
        section(
            "Absence Records",
            Some(button("Add Record").on_press(msg(DashboardMessage::AddAbsence)).into()),
            list,
        )
    }

    fn ride_card(ride: &LiveRide) -> Element<'_, ScreenMessage<Self>> {
        let battery = text(format!("Battery: {}", ride.battery_display())).size(13);
        let battery = match ride.battery_level() {
            Some(BatteryLevel::Low) => battery.color(ERROR_COLOR),
            Some(BatteryLevel::High) => battery.color(NOTICE_COLOR),
            Some(BatteryLevel::Medium) | None => battery,
        };
        card(
            column![
                row![
                    text(ride.short_label()).size(16).width(Length::Fill),
                    text(ride.status.label()).size(13),
                ],
                text(format!("{} / {}", ride.vehicle, ride.driver)).size(13),
                text(format!("To: {}", ride.destination)).size(13),
                text(format!("Material: {}", ride.material)).size(13),
                row![
                    text(format!("Speed: {}", ride.speed_display())).size(13),
                    battery,
                ]
                .spacing(16),
            ]
            .spacing(2),
        )
    }

    fn rides_section(&self) -> Element<'_, ScreenMessage<Self>> {
        let toggle = button(if self.store.show_live_rides() {
            "Hide Rides"
        } else {
            "Show Rides"
        })
        .on_press(msg(DashboardMessage::ToggleLiveRides));

        let body: Element<'_, ScreenMessage<Self>> = if self.store.show_live_rides() {
            self.store
                .live_rides()
                .iter()
                .fold(column![].spacing(8), |list, ride| list.push(Self::ride_card(ride)))
                .into()
        } else {
            text(format!("{} rides", self.store.live_rides().len()))
                .size(13)
                .into()
        };
        section("Live Rides", Some(toggle.into()), body)
    }

    fn modal_view<'a>(&'a self, modal: &'a Modal) -> Element<'a, ScreenMessage<Self>> {
        let input = |label: &'static str, value: &str, field: Field| {
            labeled_input(label, value, move |value| {
                msg(DashboardMessage::FieldChanged(field, value))
            })
        };

        let (fields, error): (Element<'a, ScreenMessage<Self>>, &Option<FormError>) = match modal {
            Modal::Office { form, error, .. } => (
                column![
                    input("Name", &form.name, Field::Name),
                    input("Address", &form.address, Field::Address),
                    input("Latitude", &form.latitude, Field::Latitude),
                    input("Longitude", &form.longitude, Field::Longitude),
                    input("Number of Guards", &form.guard_count, Field::GuardCount),
                ]
                .spacing(8)
                .into(),
                error,
            ),
            Modal::Employee { form, error, .. } => {
                let mut choices = vec![OfficeChoice {
                    id: None,
                    name: "No office".to_string(),
                }];
                choices.extend(self.store.offices().iter().map(|office| OfficeChoice {
                    id: Some(office.id.clone()),
                    name: office.name.clone(),
                }));
                let selected = choices
                    .iter()
                    .find(|choice| choice.id == form.office_id)
                    .cloned();
                (
                    column![
                        input("Name", &form.name, Field::Name),
                        input("Role", &form.role, Field::Role),
                        input("Image URL", &form.image_url, Field::ImageUrl),
                        input("Latitude", &form.latitude, Field::Latitude),
                        input("Longitude", &form.longitude, Field::Longitude),
                        text("Office").size(14),
                        pick_list(choices, selected, |choice| {
                            msg(DashboardMessage::OfficeAssigned(choice))
                        }),
                    ]
                    .spacing(8)
                    .into(),
                    error,
                )
            }
            Modal::Absence { form, error, .. } => (
                column![
                    input("Date (YYYY-MM-DD)", &form.date, Field::Date),
                    input("Time", &form.time_range, Field::TimeRange),
                    input("Site", &form.site, Field::Site),
                ]
                .spacing(8)
                .into(),
                error,
            ),
            Modal::SiteInfo { form, error } => (
                column![
                    input("Site Name", &form.name, Field::Name),
                    input("Site Address", &form.address, Field::Address),
                    input("Supervisors", &form.supervisors, Field::Supervisors),
                    input("Employees", &form.employees, Field::Employees),
                ]
                .spacing(8)
                .into(),
                error,
            ),
            Modal::CurrentStats { form, error } => (
                column![
                    input("Currently Assigned", &form.assigned, Field::Assigned),
                    input("Sites", &form.sites, Field::Sites),
                ]
                .spacing(8)
                .into(),
                error,
            ),
        };

        let mut body = column![text(modal.title()).size(24), fields].spacing(16);
        if let Some(e) = error {
            body = body.push(error_text(e));
        }
        body = body.push(
            row![
                button("Save").on_press(msg(DashboardMessage::SaveModal)),
                button("Cancel")
                    .style(button::secondary)
                    .on_press(msg(DashboardMessage::CancelModal)),
            ]
            .spacing(8),
        );

        container(card(body))
            .max_width(480.0)
            .center_x(Length::Fill)
            .padding(32)
            .into()
    }
}

fn msg(message: DashboardMessage) -> ScreenMessage<DashboardScreen> {
    ScreenMessage::ScreenMessage(message)
}

impl Screen for DashboardScreen {
    type Message = DashboardMessage;
    type ParentMessage = DashboardParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        if let Some(modal) = &self.modal {
            return column![self.header(), self.modal_view(modal)]
                .padding(16)
                .spacing(16)
                .into();
        }

        let panels = scrollable(
            column![
                self.stats_cards(),
                self.offices_section(),
                self.employees_section(),
                self.absences_section(),
                self.rides_section(),
            ]
            .spacing(24)
            .padding(4),
        );
        layout(self.header(), self.map_column(), panels)
    }

    fn update(&mut self, message: Self::Message, _state: &mut AppState) -> Task<ScreenMessage<Self>> {
        match message {
            DashboardMessage::SearchChanged(term) => {
                let outcome = self.store.search(&term, &mut self.map.handle());
                if let SearchOutcome::Selected(id) = &outcome {
                    self.popup = self.store.offices().get(id).map(Office::popup_text);
                }
            }
            DashboardMessage::MapCursorMoved(point) => self.cursor = Some(point),
            DashboardMessage::MapPressed => self.map_pressed(),
            DashboardMessage::ZoomIn => self.map.surface_mut().zoom_in(),
            DashboardMessage::ZoomOut => self.map.surface_mut().zoom_out(),
            DashboardMessage::FocusOffice(id) => {
                if let Err(e) = self.store.focus_office(&id, &mut self.map.handle()) {
                    error!("Cannot focus office: {e}");
                }
            }
            DashboardMessage::FocusEmployee(id) => {
                match self.store.focus_employee(&id, &mut self.map.handle()) {
                    Ok(true) => {}
                    Ok(false) => debug!(%id, "employee has no known position"),
                    Err(e) => error!("Cannot focus employee: {e}"),
                }
            }
            DashboardMessage::CloseSelection => {
                self.store.clear_selection();
                self.popup = None;
            }
            DashboardMessage::ToggleLiveRides => {
                self.store.toggle_live_rides();
            }
            DashboardMessage::AddOffice => {
                self.modal = Some(Modal::Office {
                    editing: None,
                    form: OfficeForm::blank(),
                    error: None,
                });
            }
            DashboardMessage::EditOffice(id) => {
                self.modal = self.store.offices().get(&id).map(|office| Modal::Office {
                    editing: Some(id.clone()),
                    form: OfficeForm::from(office),
                    error: None,
                });
            }
            DashboardMessage::DeleteOffice(id) => match self.store.delete_office(&id) {
                Ok(office) => {
                    info!(office = %office.name, "office deleted");
                    self.popup = None;
                    self.resync_map();
                }
                Err(e) => error!("Delete failed: {e}"),
            },
            DashboardMessage::AddEmployee => {
                self.modal = Some(Modal::Employee {
                    editing: None,
                    form: EmployeeForm::blank(),
                    error: None,
                });
            }
            DashboardMessage::EditEmployee(id) => {
                self.modal = self.store.employees().get(&id).map(|employee| Modal::Employee {
                    editing: Some(id.clone()),
                    form: EmployeeForm::from(employee),
                    error: None,
                });
            }
            DashboardMessage::DeleteEmployee(id) => match self.store.delete_employee(&id) {
                Ok(employee) => {
                    info!(employee = %employee.name, "employee deleted");
                    self.resync_map();
                }
                Err(e) => error!("Delete failed: {e}"),
            },
            DashboardMessage::AddAbsence => {
                self.modal = Some(Modal::Absence {
                    editing: None,
                    form: AbsenceForm::blank(),
                    error: None,
                });
            }
            DashboardMessage::EditAbsence(id) => {
                self.modal = self.store.absences().get(&id).map(|record| Modal::Absence {
                    editing: Some(id.clone()),
                    form: AbsenceForm::from(record),
                    error: None,
                });
            }
            DashboardMessage::DeleteAbsence(id) => {
                if let Err(e) = self.store.delete_absence(&id) {
                    error!("Delete failed: {e}");
                }
            }
            DashboardMessage::EditSiteInfo => {
                self.modal = Some(Modal::SiteInfo {
                    form: SiteInfoForm::from(self.store.site_info()),
                    error: None,
                });
            }
            DashboardMessage::EditCurrentStats => {
                self.modal = Some(Modal::CurrentStats {
                    form: CurrentStatsForm::from(self.store.current_stats()),
                    error: None,
                });
            }
            DashboardMessage::FieldChanged(field, value) => {
                if let Some(modal) = &mut self.modal {
                    modal.set_field(field, value);
                }
            }
            DashboardMessage::OfficeAssigned(choice) => {
                if let Some(Modal::Employee { form, .. }) = &mut self.modal {
                    form.office_id = choice.id;
                }
            }
            DashboardMessage::SaveModal => match self.save_modal() {
                Ok(saved) => {
                    self.modal = None;
                    match saved {
                        Saved::Map => self.resync_map(),
                        Saved::Avatar(url) => {
                            self.resync_map();
                            if !self.avatars.contains_key(&url) {
                                return self.load_avatar(url).map(ScreenMessage::ScreenMessage);
                            }
                        }
                        Saved::Panel => {}
                    }
                }
                Err(e) => {
                    debug!(error = %e, "form rejected");
                    if let Some(
                        Modal::Office { error, .. }
                        | Modal::Employee { error, .. }
                        | Modal::Absence { error, .. }
                        | Modal::SiteInfo { error, .. }
                        | Modal::CurrentStats { error, .. },
                    ) = &mut self.modal
                    {
                        *error = Some(e);
                    }
                }
            },
            DashboardMessage::CancelModal => self.modal = None,
            DashboardMessage::AvatarLoaded { url, handle } => {
                self.avatars.insert(url, handle);
            }
            DashboardMessage::GoBack => {
                self.map.unmount();
                return Task::done(ScreenMessage::ParentMessage(DashboardParentMessage::GoBack));
            }
        }
        Task::none()
    }
}
