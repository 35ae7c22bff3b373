use {
    super::Service,
    crate::{
        auction::entities,
        kernel::entities::TeamName,
    },
};

#[derive(Debug, Clone)]
pub struct GetBidInput {
    pub team: TeamName,
}

impl Service {
    /// The sealed bid of the team in the open round, if it placed one.
    pub async fn get_bid(&self, input: GetBidInput) -> Option<entities::Bid> {
        self.repo.get_bid(&input.team).await
    }
}
