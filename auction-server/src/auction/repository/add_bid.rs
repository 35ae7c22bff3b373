use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    /// Stores the bid, replacing the earlier bid of the same team.
    /// Returns the replaced bid.
    pub async fn add_bid(&self, bid: entities::Bid) -> Option<entities::Bid> {
        let mut bids = self.in_memory_store.bids.write().await;
        let replaced = bids
            .iter()
            .position(|existing| existing.team == bid.team)
            .map(|index| bids.remove(index));
        bids.push(bid);
        replaced
    }
}
