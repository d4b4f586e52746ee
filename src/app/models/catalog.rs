//! # Content Catalogue
//!
//! In-memory data store: content records, user accounts, the logged-in
//! session, comments and the site announcement. Seeded from embedded JSON.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const SEED_JSON: &str = include_str!("seed.json");

/// One downloadable build of a content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub ver: String,
    pub date: String,
    pub size: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
}

/// Read-only reference record for a catalogued title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: u32,
    pub title: String,
    pub cover: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub versions: Vec<Version>,
    #[serde(default)]
    pub media: Vec<MediaItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    pub password: String,
    pub nickname: String,
}

/// The logged-in user; absence means logged out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
    pub email: String,
}

impl From<&UserRecord> for SessionUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            name: record.nickname.clone(),
            email: record.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub user: String,
    pub text: String,
    #[serde(default)]
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub show: bool,
    pub title: String,
    pub content: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("an account for '{0}' already exists")]
    DuplicateEmail(String),
}

#[derive(Debug, Clone, Deserialize)]
struct SeedData {
    registered_users: Vec<UserRecord>,
    resources: Vec<ContentItem>,
    comments: Vec<Comment>,
    announcement: Announcement,
}

#[derive(Debug, Clone)]
pub struct ContentCatalog {
    resources: Vec<ContentItem>,
    registered_users: Vec<UserRecord>,
    user: Option<SessionUser>,
    comments: Vec<Comment>,
    announcement: Announcement,
}

impl ContentCatalog {
    /// Catalogue populated with the bundled demo data
    pub fn seeded() -> Result<Self> {
        Self::from_json(SEED_JSON).context("Failed to parse bundled catalogue seed")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let seed: SeedData = serde_json::from_str(json)?;
        tracing::debug!(
            "Catalogue loaded: {} resources, {} users",
            seed.resources.len(),
            seed.registered_users.len()
        );
        Ok(Self {
            resources: seed.resources,
            registered_users: seed.registered_users,
            user: None,
            comments: seed.comments,
            announcement: seed.announcement,
        })
    }

    pub fn resources(&self) -> &[ContentItem] {
        &self.resources
    }

    pub fn find_item(&self, id: u32) -> Option<&ContentItem> {
        self.resources.iter().find(|item| item.id == id)
    }

    pub fn registered_users(&self) -> &[UserRecord] {
        &self.registered_users
    }

    pub fn find_user(&self, email: &str) -> Option<&UserRecord> {
        self.registered_users.iter().find(|user| user.email == email)
    }

    /// Append a new account, rejecting an email that already has one
    pub fn register_user(&mut self, record: UserRecord) -> Result<(), CatalogError> {
        if self.find_user(&record.email).is_some() {
            return Err(CatalogError::DuplicateEmail(record.email));
        }
        tracing::info!("Registered new account '{}'", record.email);
        self.registered_users.push(record);
        Ok(())
    }

    pub fn session(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn set_session(&mut self, user: Option<SessionUser>) {
        self.user = user;
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn announcement(&self) -> &Announcement {
        &self.announcement
    }

    pub fn dismiss_announcement(&mut self) {
        self.announcement.show = false;
    }
}
