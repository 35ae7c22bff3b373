use {
    super::Repository,
    time::OffsetDateTime,
};

impl Repository {
    /// Drops every session expired at `now` and returns how many were dropped.
    pub fn remove_expired_sessions(&self, now: OffsetDateTime) -> usize {
        let before = self.in_memory_store.sessions.len();
        self.in_memory_store
            .sessions
            .retain(|_, session| !session.is_expired(now));
        before.saturating_sub(self.in_memory_store.sessions.len())
    }
}
