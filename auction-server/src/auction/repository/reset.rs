use {
    super::Repository,
    crate::kernel::entities::RoundNumber,
};

impl Repository {
    pub async fn reset(&self, first_round: RoundNumber) {
        let mut current_round = self.in_memory_store.current_round.write().await;
        self.in_memory_store.bids.write().await.clear();
        self.in_memory_store.results.write().await.clear();
        *current_round = first_round;
    }
}
