use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    pub fn get_round_lock(&self) -> entities::RoundLock {
        self.in_memory_store.round_lock.clone()
    }
}
