mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from patrolboard for tests
pub use patrolboard::core::{
    auth::{
        AuthBackend, AuthEffect, AuthError, AuthEvent, AuthFlow, AuthScreen,
        PASSWORD_CHANGED_NOTICE, PendingAction, RESEND_COUNTDOWN_SECS, SIMULATED_LATENCY,
        SimulatedBackend,
    },
    avatar::{AVATAR_SIZE, Avatar, AvatarError, AvatarFetcher, AvatarLoader, DefaultFetcher},
    geo::{self, GEOFENCE_RADIUS_M, GeofenceStatus},
    map::{Circle, INITIAL_CENTER, INITIAL_ZOOM, Layer, LayerId, MapSurface, MapView, Marker, MarkerKind, Scene},
    model::{Color, Coordinate, Id},
    seed::Seed,
    store::{
        AbsenceRecord, CurrentStats, DEFAULT_AVATAR_URL, DashboardStore, Employee, FOCUS_ZOOM,
        NewAbsenceRecord, NewEmployee, NewOffice, Office, PanTo, SearchOutcome, SiteInfoUpdate,
        StoreError,
    },
};
