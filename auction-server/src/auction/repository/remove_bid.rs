use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    pub async fn remove_bid(&self, team: &str) -> Option<entities::Bid> {
        let mut bids = self.in_memory_store.bids.write().await;
        let index = bids.iter().position(|bid| bid.team == team)?;
        Some(bids.remove(index))
    }
}
