//! In-memory collaborators with call counters.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bank_auth::token::{AeadTokenMaker, Payload, TokenMaker};
use bank_auth::{AuthError, CredentialAuthority, Session, SessionStore, StoreError};
use bank_core::types::SessionId;
use chrono::Duration;

pub const TEST_KEY: &str = "0123456789abcdef0123456789abcdef";

/// Session store backed by a map, counting every call.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<SessionId, Session>>,
    pub creates: AtomicUsize,
    pub gets: AtomicUsize,
    /// When set, every call fails with a backend error.
    pub fail: AtomicBool,
    /// When set, a session is blocked right after it has been read.
    pub block_after_read: AtomicBool,
}

impl MemorySessionStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Insert a session directly, bypassing the counters.
    pub fn insert(&self, session: Session) {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id, session);
    }

    pub fn snapshot(&self, id: SessionId) -> Option<Session> {
        self.sessions.lock().unwrap().get(&id).cloned()
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, session: &Session) -> Result<(), StoreError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.insert(session.clone());
        Ok(())
    }

    async fn get(&self, id: SessionId) -> Result<Session, StoreError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions.get_mut(&id).ok_or(StoreError::NotFound)?;
        let snapshot = session.clone();
        if self.block_after_read.load(Ordering::SeqCst) {
            session.is_blocked = true;
        }
        Ok(snapshot)
    }

    async fn block(&self, id: SessionId) -> Result<(), StoreError> {
        self.check_failure()?;
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions.get_mut(&id).ok_or(StoreError::NotFound)?;
        session.is_blocked = true;
        Ok(())
    }
}

/// Token maker that counts verify calls on top of the AEAD scheme.
pub struct CountingMaker {
    inner: AeadTokenMaker,
    pub verifies: AtomicUsize,
}

impl CountingMaker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: AeadTokenMaker::new(TEST_KEY).expect("test key is 32 bytes"),
            verifies: AtomicUsize::new(0),
        })
    }

    pub fn verifies(&self) -> usize {
        self.verifies.load(Ordering::SeqCst)
    }
}

impl TokenMaker for CountingMaker {
    fn issue(&self, subject: &str, ttl: Duration) -> Result<(String, Payload), AuthError> {
        self.inner.issue(subject, ttl)
    }

    fn verify(&self, token: &str) -> Result<Payload, AuthError> {
        self.verifies.fetch_add(1, Ordering::SeqCst);
        self.inner.verify(token)
    }
}

pub fn authority() -> CredentialAuthority {
    authority_with(Arc::new(
        AeadTokenMaker::new(TEST_KEY).expect("test key is 32 bytes"),
    ))
}

pub fn authority_with(maker: Arc<dyn TokenMaker>) -> CredentialAuthority {
    CredentialAuthority::new(maker, Duration::minutes(15), Duration::days(1))
}
