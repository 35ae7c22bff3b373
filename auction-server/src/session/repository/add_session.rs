use {
    super::Repository,
    crate::session::entities,
};

impl Repository {
    pub fn add_session(&self, session: entities::Session) {
        self.in_memory_store
            .sessions
            .insert(session.token.clone(), session);
    }
}
