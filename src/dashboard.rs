use crate::views::ViewKind;
use serde::Serialize;
use thiserror::Error;

const ROUTE_PREFIX: &str = "/dashboard/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Admin,
    Driver,
    Parent,
    Student,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("no dashboard at {0}")]
    UnknownRoute(String),
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Driver, Role::Parent, Role::Student];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Driver => "driver",
            Role::Parent => "parent",
            Role::Student => "student",
        }
    }

    pub fn path(self) -> String {
        format!("{}{}", ROUTE_PREFIX, self.as_str())
    }

    pub fn title(self) -> &'static str {
        match self {
            Role::Admin => "Admin Dashboard",
            Role::Driver => "Driver Dashboard",
            Role::Parent => "Parent Dashboard",
            Role::Student => "Student Dashboard",
        }
    }

    pub fn views(self) -> &'static [ViewKind] {
        match self {
            Role::Admin => &[
                ViewKind::StudentRoster,
                ViewKind::TripHistory,
                ViewKind::Notifications,
            ],
            Role::Driver => &[ViewKind::CheckIns, ViewKind::RouteStops],
            Role::Parent | Role::Student => &[ViewKind::TripHistory, ViewKind::Notifications],
        }
    }

    pub fn shows_weather(self) -> bool {
        !matches!(self, Role::Admin)
    }
}

/// Maps a dashboard path to its role. Query strings and fragments are
/// ignored; one trailing slash is tolerated.
pub fn resolve(path: &str) -> Result<Role, NavError> {
    let trimmed = path.trim();
    let bare = trimmed
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let bare = bare.strip_suffix('/').unwrap_or(bare);
    let Some(segment) = bare.strip_prefix(ROUTE_PREFIX) else {
        return Err(NavError::UnknownRoute(trimmed.to_string()));
    };
    Role::ALL
        .into_iter()
        .find(|r| r.as_str() == segment)
        .ok_or_else(|| NavError::UnknownRoute(trimmed.to_string()))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEntry {
    pub path: String,
    pub role: Role,
    pub title: &'static str,
    pub views: &'static [ViewKind],
    pub weather: bool,
}

impl From<Role> for RouteEntry {
    fn from(role: Role) -> Self {
        RouteEntry {
            path: role.path(),
            role,
            title: role.title(),
            views: role.views(),
            weather: role.shows_weather(),
        }
    }
}

pub fn routes() -> Vec<RouteEntry> {
    Role::ALL.into_iter().map(RouteEntry::from).collect()
}
