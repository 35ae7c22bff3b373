use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
        kernel::entities::TeamName,
    },
};

#[derive(Debug, Clone)]
pub struct WithdrawBidInput {
    pub team: TeamName,
}

impl Service {
    /// Removes the sealed bid of the team from the open round.
    #[tracing::instrument(skip_all, fields(team = %input.team), err(level = tracing::Level::TRACE))]
    pub async fn withdraw_bid(&self, input: WithdrawBidInput) -> Result<entities::Bid, RestError> {
        let lock = self.repo.get_round_lock();
        let _guard = lock.lock().await;
        let bid = self
            .repo
            .remove_bid(&input.team)
            .await
            .ok_or(RestError::BidNotFound)?;
        tracing::info!(bid_id = %bid.id, "Bid withdrawn");
        Ok(bid)
    }
}
