#![forbid(unsafe_code)]

use ck_core::{Employee, SessionDraft};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the engine knows about one signed-in user between requests.
///
/// Owned by exactly one caller and handed to engine operations by reference;
/// dropping it discards any unsaved draft.
#[derive(Clone, Debug)]
pub struct Session {
    id: SessionId,
    employee: Employee,
    pub draft: SessionDraft,
}

impl Session {
    pub fn new(id: SessionId, employee: Employee) -> Self {
        Self {
            id,
            employee,
            draft: SessionDraft::default(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn employee(&self) -> &Employee {
        &self.employee
    }
}

/// Sessions of a host that serves several browsers at once.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
    next_seq: u64,
}

impl SessionRegistry {
    pub fn insert(&mut self, employee: Employee) -> SessionId {
        self.next_seq += 1;
        let id = SessionId::new(format!("s{}-{}", self.next_seq, employee.id));
        self.sessions
            .insert(id.clone(), Session::new(id.clone(), employee));
        id
    }

    pub fn get(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    /// Logout: the session and its draft are gone.
    pub fn remove(&mut self, id: &SessionId) -> Option<Session> {
        self.sessions.remove(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
