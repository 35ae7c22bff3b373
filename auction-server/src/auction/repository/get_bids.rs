use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    pub async fn get_bids(&self) -> Vec<entities::Bid> {
        self.in_memory_store.bids.read().await.clone()
    }
}
