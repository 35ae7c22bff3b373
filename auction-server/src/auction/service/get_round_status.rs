use {
    super::Service,
    crate::auction::entities,
};

impl Service {
    pub async fn get_round_status(&self) -> entities::RoundStatus {
        let lock = self.repo.get_round_lock();
        let _guard = lock.lock().await;

        let round = self.repo.get_current_round().await;
        let bid_count = self.repo.get_bids().await.len();
        entities::RoundStatus { round, bid_count }
    }
}
