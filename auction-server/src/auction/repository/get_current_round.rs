use {
    super::Repository,
    crate::kernel::entities::RoundNumber,
};

impl Repository {
    pub async fn get_current_round(&self) -> RoundNumber {
        *self.in_memory_store.current_round.read().await
    }
}
