use {
    super::Service,
    time::OffsetDateTime,
};

impl Service {
    pub fn remove_expired_sessions(&self) {
        let removed = self
            .repo
            .remove_expired_sessions(OffsetDateTime::now_utc());
        if removed > 0 {
            tracing::info!(removed, "Removed expired sessions");
        }
    }
}
