//! Domain models for the catalog search service

pub mod entities;
pub mod page;
pub mod record;

pub use page::Page;
pub use record::Record;

use crate::db::search::schema::EntitySchema;

/// Entity types exposed through the generic search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Solution,
    Revision,
    User,
    Role,
    Catalog,
    Peer,
    Task,
    Artifact,
    PublishRequest,
}

impl EntityKind {
    pub const ALL: [EntityKind; 9] = [
        EntityKind::Solution,
        EntityKind::Revision,
        EntityKind::User,
        EntityKind::Role,
        EntityKind::Catalog,
        EntityKind::Peer,
        EntityKind::Task,
        EntityKind::Artifact,
        EntityKind::PublishRequest,
    ];

    pub fn schema(self) -> &'static EntitySchema {
        match self {
            EntityKind::Solution => &entities::solution::SCHEMA,
            EntityKind::Revision => &entities::revision::SCHEMA,
            EntityKind::User => &entities::user::SCHEMA,
            EntityKind::Role => &entities::role::SCHEMA,
            EntityKind::Catalog => &entities::catalog::SCHEMA,
            EntityKind::Peer => &entities::peer::SCHEMA,
            EntityKind::Task => &entities::task::SCHEMA,
            EntityKind::Artifact => &entities::artifact::SCHEMA,
            EntityKind::PublishRequest => &entities::publish_request::SCHEMA,
        }
    }

    /// URL path segment, e.g. `solutions`.
    pub fn as_path(self) -> &'static str {
        match self {
            EntityKind::Solution => "solutions",
            EntityKind::Revision => "revisions",
            EntityKind::User => "users",
            EntityKind::Role => "roles",
            EntityKind::Catalog => "catalogs",
            EntityKind::Peer => "peers",
            EntityKind::Task => "tasks",
            EntityKind::Artifact => "artifacts",
            EntityKind::PublishRequest => "publish-requests",
        }
    }

    pub fn from_path(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_path() == segment)
    }
}
