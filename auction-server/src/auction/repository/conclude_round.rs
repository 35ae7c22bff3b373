use {
    super::Repository,
    crate::{
        auction::entities,
        kernel::entities::RoundNumber,
    },
};

impl Repository {
    /// Records the result, drops the sealed bids and opens the next round.
    /// Returns the number of the new round.
    pub async fn conclude_round(&self, result: entities::RoundResult) -> RoundNumber {
        let mut current_round = self.in_memory_store.current_round.write().await;
        self.in_memory_store.bids.write().await.clear();
        self.in_memory_store.results.write().await.push(result);
        *current_round += 1;
        *current_round
    }
}
