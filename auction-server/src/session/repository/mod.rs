use {
    super::entities,
    crate::kernel::entities::{
        SessionToken,
        Username,
    },
    dashmap::DashMap,
    std::collections::HashMap,
};

mod add_session;
mod get_session;
mod get_user;
mod remove_expired_sessions;
mod remove_session;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub users:    HashMap<Username, entities::User>,
    pub sessions: DashMap<SessionToken, entities::Session>,
}

#[derive(Debug)]
pub struct Repository {
    pub in_memory_store: InMemoryStore,
}

impl Repository {
    pub fn new(users: Vec<entities::User>) -> Self {
        Self {
            in_memory_store: InMemoryStore {
                users:    users
                    .into_iter()
                    .map(|user| (user.username.clone(), user))
                    .collect(),
                sessions: DashMap::new(),
            },
        }
    }
}
