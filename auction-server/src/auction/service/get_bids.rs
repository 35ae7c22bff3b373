use {
    super::Service,
    crate::auction::entities,
};

impl Service {
    /// Every sealed bid of the open round in submission order.
    pub async fn get_bids(&self) -> Vec<entities::Bid> {
        self.repo.get_bids().await
    }
}
