use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
        team::service::get_team::GetTeamInput,
    },
};

#[derive(Debug, Clone)]
pub struct VerifyBidInput {
    pub bid_create: entities::BidCreate,
}

impl Service {
    /// Checks that the module exists and is not owned by the team yet,
    /// that the amount reaches the minimum bid, and that the team can pay for it.
    pub async fn verify_bid(&self, input: VerifyBidInput) -> Result<(), RestError> {
        let bid = input.bid_create;
        let module = self.module_service.get_module(&bid.module)?;
        let team = self
            .team_ledger
            .get_team(GetTeamInput {
                team: bid.team.clone(),
            })
            .await?;

        if team.owns_module(&module.id) {
            return Err(RestError::ModuleAlreadyOwned(module.id));
        }
        if bid.amount < module.min_bid {
            return Err(RestError::BidTooLow {
                min_bid: module.min_bid,
            });
        }
        if !team.can_afford(bid.amount) {
            return Err(RestError::InsufficientCredits {
                credits: team.credits,
                amount:  bid.amount,
            });
        }
        Ok(())
    }
}
