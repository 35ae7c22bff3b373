use {
    super::Repository,
    crate::session::entities,
};

impl Repository {
    pub fn get_session(&self, token: &str) -> Option<entities::Session> {
        self.in_memory_store
            .sessions
            .get(token)
            .map(|session| session.value().clone())
    }
}
