//! Navigation targets, addressed by the same paths as the web admin router.

use crate::api::{EntityId, EntityKind};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Unknown route: {0}")]
    Unknown(String),
    #[error("Invalid id in route {path}: {id}")]
    InvalidId { path: String, id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Categories,
    NewCategory,
    EditCategory(EntityId),
    Series,
    NewSeries,
    EditSeries(EntityId),
}

impl Route {
    /// List route for an entity kind; forms navigate here after save or cancel.
    pub fn list_for(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Category => Self::Categories,
            EntityKind::Series => Self::Series,
        }
    }

    /// Form route for an entity kind. `None` means create mode.
    pub fn form_for(kind: EntityKind, id: Option<EntityId>) -> Self {
        match (kind, id) {
            (EntityKind::Category, None) => Self::NewCategory,
            (EntityKind::Category, Some(id)) => Self::EditCategory(id),
            (EntityKind::Series, None) => Self::NewSeries,
            (EntityKind::Series, Some(id)) => Self::EditSeries(id),
        }
    }

    pub fn kind(self) -> EntityKind {
        match self {
            Self::Categories | Self::NewCategory | Self::EditCategory(_) => EntityKind::Category,
            Self::Series | Self::NewSeries | Self::EditSeries(_) => EntityKind::Series,
        }
    }

    pub fn path(self) -> String {
        match self {
            Self::Categories => "/categories".to_string(),
            Self::NewCategory => "/categories/new".to_string(),
            Self::EditCategory(id) => format!("/categories/edit/{id}"),
            Self::Series => "/series".to_string(),
            Self::NewSeries => "/series/new".to_string(),
            Self::EditSeries(id) => format!("/series/edit/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        let parse_id = |raw: &str| {
            raw.parse::<EntityId>().map_err(|_| RouteError::InvalidId {
                path: s.to_string(),
                id: raw.to_string(),
            })
        };

        match segments.as_slice() {
            [] | ["categories"] => Ok(Self::Categories),
            ["categories", "new"] => Ok(Self::NewCategory),
            ["categories", "edit", id] => parse_id(id).map(Self::EditCategory),
            ["series"] => Ok(Self::Series),
            ["series", "new"] => Ok(Self::NewSeries),
            ["series", "edit", id] => parse_id(id).map(Self::EditSeries),
            _ => Err(RouteError::Unknown(s.to_string())),
        }
    }
}
