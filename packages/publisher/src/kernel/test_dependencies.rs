// TestDependencies - mock implementations for testing
//
// Provides fake services that can be injected into PublisherDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use bluesky_client::{BlueskyError, CreateRecordResponse, PostRecord, Session};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{BaseBlueskyService, BasePluginStore, PublisherDeps};
use crate::config::Credentials;

// =============================================================================
// Mock Bluesky Service
// =============================================================================

/// Arguments captured from a create_post call
#[derive(Debug, Clone)]
pub struct CreatePostCall {
    pub pds_url: String,
    pub session: Session,
    pub post: PostRecord,
}

pub struct MockBlueskyService {
    session_status: Mutex<Option<u16>>,
    post_status: Mutex<Option<u16>>,
    session_calls: Arc<Mutex<Vec<Credentials>>>,
    post_calls: Arc<Mutex<Vec<CreatePostCall>>>,
}

impl MockBlueskyService {
    /// Service that accepts every login and every post
    pub fn new() -> Self {
        Self {
            session_status: Mutex::new(None),
            post_status: Mutex::new(None),
            session_calls: Arc::new(Mutex::new(Vec::new())),
            post_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reject createSession with the given HTTP status
    pub fn reject_sessions(self, status: u16) -> Self {
        *self.session_status.lock().unwrap() = Some(status);
        self
    }

    /// Reject createRecord with the given HTTP status
    pub fn reject_posts(self, status: u16) -> Self {
        *self.post_status.lock().unwrap() = Some(status);
        self
    }

    /// Let createRecord succeed again
    pub fn accept_posts(&self) {
        *self.post_status.lock().unwrap() = None;
    }

    pub fn session_calls(&self) -> Vec<Credentials> {
        self.session_calls.lock().unwrap().clone()
    }

    pub fn post_calls(&self) -> Vec<CreatePostCall> {
        self.post_calls.lock().unwrap().clone()
    }

    /// Total XRPC calls made
    pub fn network_calls(&self) -> usize {
        self.session_calls.lock().unwrap().len() + self.post_calls.lock().unwrap().len()
    }
}

impl Default for MockBlueskyService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseBlueskyService for MockBlueskyService {
    async fn create_session(&self, credentials: &Credentials) -> Result<Session, BlueskyError> {
        self.session_calls.lock().unwrap().push(credentials.clone());

        if let Some(status) = *self.session_status.lock().unwrap() {
            return Err(BlueskyError::Api {
                status,
                message: "AuthenticationRequired: Invalid identifier or password".to_string(),
            });
        }

        Ok(Session {
            access_jwt: format!("jwt-for-{}", credentials.handle),
            refresh_jwt: None,
            did: "did:plc:mock".to_string(),
            handle: Some(credentials.handle.clone()),
        })
    }

    async fn create_post(
        &self,
        pds_url: &str,
        session: &Session,
        post: &PostRecord,
    ) -> Result<CreateRecordResponse, BlueskyError> {
        let mut calls = self.post_calls.lock().unwrap();
        calls.push(CreatePostCall {
            pds_url: pds_url.to_string(),
            session: session.clone(),
            post: post.clone(),
        });

        if let Some(status) = *self.post_status.lock().unwrap() {
            return Err(BlueskyError::Api {
                status,
                message: "InternalServerError".to_string(),
            });
        }

        Ok(CreateRecordResponse {
            uri: format!("at://{}/app.bsky.feed.post/mock{}", session.did, calls.len()),
            cid: format!("bafymock{}", calls.len()),
        })
    }
}

// =============================================================================
// In-memory Plugin Store
// =============================================================================

pub struct MemoryPluginStore {
    data: Arc<Mutex<HashMap<String, Map<String, Value>>>>,
    get_calls: Arc<Mutex<usize>>,
    save_calls: Arc<Mutex<usize>>,
    fail_reads: Mutex<bool>,
    fail_saves: Mutex<bool>,
}

impl MemoryPluginStore {
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
            get_calls: Arc::new(Mutex::new(0)),
            save_calls: Arc::new(Mutex::new(0)),
            fail_reads: Mutex::new(false),
            fail_saves: Mutex::new(false),
        }
    }

    /// Seed a namespace with data
    pub fn with_data(self, namespace: &str, data: Value) -> Self {
        if let Value::Object(map) = data {
            self.data.lock().unwrap().insert(namespace.to_string(), map);
        }
        self
    }

    /// Make every get_data call fail
    pub fn failing_reads(self) -> Self {
        *self.fail_reads.lock().unwrap() = true;
        self
    }

    /// Make every save_data call fail
    pub fn failing_saves(self) -> Self {
        *self.fail_saves.lock().unwrap() = true;
        self
    }

    /// Current contents of a namespace
    pub fn snapshot(&self, namespace: &str) -> Map<String, Value> {
        self.data
            .lock()
            .unwrap()
            .get(namespace)
            .cloned()
            .unwrap_or_default()
    }

    pub fn get_calls(&self) -> usize {
        *self.get_calls.lock().unwrap()
    }

    pub fn save_calls(&self) -> usize {
        *self.save_calls.lock().unwrap()
    }
}

impl Default for MemoryPluginStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePluginStore for MemoryPluginStore {
    async fn get_data(&self, namespace: &str) -> Result<Map<String, Value>> {
        *self.get_calls.lock().unwrap() += 1;
        if *self.fail_reads.lock().unwrap() {
            anyhow::bail!("store unavailable");
        }
        Ok(self.snapshot(namespace))
    }

    async fn save_data(&self, namespace: &str, data: Map<String, Value>) -> Result<()> {
        *self.save_calls.lock().unwrap() += 1;
        if *self.fail_saves.lock().unwrap() {
            anyhow::bail!("disk full");
        }
        self.data
            .lock()
            .unwrap()
            .insert(namespace.to_string(), data);
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

pub struct TestDependencies {
    pub bluesky: Arc<MockBlueskyService>,
    pub store: Arc<MemoryPluginStore>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            bluesky: Arc::new(MockBlueskyService::new()),
            store: Arc::new(MemoryPluginStore::new()),
        }
    }

    /// Set a mock Bluesky service
    pub fn mock_bluesky(mut self, bluesky: MockBlueskyService) -> Self {
        self.bluesky = Arc::new(bluesky);
        self
    }

    /// Set an in-memory store
    pub fn mock_store(mut self, store: MemoryPluginStore) -> Self {
        self.store = Arc::new(store);
        self
    }

    /// Build PublisherDeps sharing these fakes
    pub fn deps(&self) -> PublisherDeps {
        PublisherDeps::new(self.bluesky.clone(), self.store.clone())
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
