use {
    super::Repository,
    crate::session::entities,
};

impl Repository {
    pub fn remove_session(&self, token: &str) -> Option<entities::Session> {
        self.in_memory_store
            .sessions
            .remove(token)
            .map(|(_, session)| session)
    }
}
