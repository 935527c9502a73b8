#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use clicktag::application::services::{AuthService, RedirectService, SoftwareService};
use clicktag::domain::entities::{LinkStatus, TrackedLink};
use clicktag::domain::repositories::{LinkRepository, MetadataRepository, SOFTWARE_META_KEY};
use clicktag::domain::software_map::SoftwareMap;
use clicktag::error::StorageError;
use clicktag::state::AppState;

pub const TEST_TOKEN: &str = "test-admin-token";
pub const TEST_SIGNING_SECRET: &str = "test-signing-secret";

/// In-memory link store so the suite runs without a database.
pub struct InMemoryLinkStore {
    links: Mutex<Vec<TrackedLink>>,
    table_exists: bool,
}

impl InMemoryLinkStore {
    pub fn new() -> Self {
        Self {
            links: Mutex::new(Vec::new()),
            table_exists: true,
        }
    }

    /// A store whose backing table is "missing": every lookup errors.
    pub fn missing_table() -> Self {
        Self {
            links: Mutex::new(Vec::new()),
            table_exists: false,
        }
    }

    pub fn insert(&self, link: TrackedLink) {
        self.links.lock().unwrap().push(link);
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkStore {
    async fn find_enabled_by_slug(&self, slug: &str) -> Result<Option<TrackedLink>, StorageError> {
        if !self.table_exists {
            return Err(StorageError::TableMissing("links".to_string()));
        }
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.slug == slug && l.is_enabled())
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TrackedLink>, StorageError> {
        if !self.table_exists {
            return Err(StorageError::TableMissing("links".to_string()));
        }
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }

    async fn table_exists(&self) -> Result<bool, StorageError> {
        Ok(self.table_exists)
    }
}

/// In-memory metadata store.
pub struct InMemoryMetadataStore {
    values: Mutex<HashMap<(i64, String), String>>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl MetadataRepository for InMemoryMetadataStore {
    async fn get(&self, entity_id: i64, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .values
            .lock()
            .unwrap()
            .get(&(entity_id, key.to_string()))
            .cloned())
    }

    async fn set(&self, entity_id: i64, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .lock()
            .unwrap()
            .insert((entity_id, key.to_string()), value.to_string());
        Ok(())
    }

    async fn delete(&self, entity_id: i64, key: &str) -> Result<(), StorageError> {
        self.values
            .lock()
            .unwrap()
            .remove(&(entity_id, key.to_string()));
        Ok(())
    }
}

/// Handles to the stores behind a test state.
pub struct TestStore {
    pub links: Arc<InMemoryLinkStore>,
    pub metadata: Arc<InMemoryMetadataStore>,
}

impl TestStore {
    pub fn seed_link(&self, id: i64, slug: &str, target_url: &str) {
        self.links.insert(TrackedLink::new(
            id,
            slug.to_string(),
            target_url.to_string(),
            LinkStatus::Enabled,
            None,
            Utc::now(),
        ));
    }

    pub fn seed_link_with(
        &self,
        id: i64,
        slug: &str,
        target_url: &str,
        status: LinkStatus,
        content_id: Option<i64>,
    ) {
        self.links.insert(TrackedLink::new(
            id,
            slug.to_string(),
            target_url.to_string(),
            status,
            content_id,
            Utc::now(),
        ));
    }

    pub async fn seed_software(&self, entity_id: i64, software: &str) {
        self.metadata
            .set(entity_id, SOFTWARE_META_KEY, software)
            .await
            .unwrap();
    }
}

pub fn create_test_state() -> (AppState, TestStore) {
    create_test_state_with(Arc::new(InMemoryLinkStore::new()))
}

pub fn create_test_state_with(links: Arc<InMemoryLinkStore>) -> (AppState, TestStore) {
    let metadata = Arc::new(InMemoryMetadataStore::new());
    let software_map = Arc::new(SoftwareMap::with_defaults());

    let redirect_service = Arc::new(RedirectService::new(
        links.clone(),
        metadata.clone(),
        software_map.clone(),
    ));
    let software_service = Arc::new(SoftwareService::new(
        links.clone(),
        metadata.clone(),
        software_map,
    ));
    let auth_service = Arc::new(AuthService::new(TEST_TOKEN, TEST_SIGNING_SECRET));

    let state = AppState {
        redirect_service,
        software_service,
        auth_service,
        link_repository: links.clone(),
        log_file: None,
    };

    (
        state,
        TestStore {
            links,
            metadata,
        },
    )
}
