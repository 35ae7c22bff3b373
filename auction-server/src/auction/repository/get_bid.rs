use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    pub async fn get_bid(&self, team: &str) -> Option<entities::Bid> {
        self.in_memory_store
            .bids
            .read()
            .await
            .iter()
            .find(|bid| bid.team == team)
            .cloned()
    }
}
