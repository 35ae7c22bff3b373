use {
    super::{
        verification::VerifyBidInput,
        Service,
    },
    crate::{
        api::RestError,
        auction::entities,
        per_metrics::BIDS_PLACED_TOTAL,
    },
    axum_prometheus::metrics,
};

pub struct HandleBidInput {
    pub bid_create: entities::BidCreate,
}

impl Service {
    /// Places the sealed bid of a team in the open round.
    /// An earlier bid of the team in the same round is replaced.
    #[tracing::instrument(
        skip_all,
        fields(
            team = %input.bid_create.team,
            module = %input.bid_create.module,
            amount = input.bid_create.amount,
            bid_id,
            round,
        ),
        err(level = tracing::Level::TRACE)
    )]
    pub async fn handle_bid(&self, input: HandleBidInput) -> Result<entities::Bid, RestError> {
        let lock = self.repo.get_round_lock();
        let _guard = lock.lock().await;

        if let Err(err) = self
            .verify_bid(VerifyBidInput {
                bid_create: input.bid_create.clone(),
            })
            .await
        {
            metrics::counter!(BIDS_PLACED_TOTAL, &[("result", "rejected")]).increment(1);
            return Err(err);
        }

        let round = self.repo.get_current_round().await;
        let bid = entities::Bid::new(input.bid_create, round);
        tracing::Span::current().record("bid_id", bid.id.to_string());
        tracing::Span::current().record("round", round);

        let result = match self.repo.add_bid(bid.clone()).await {
            Some(replaced) => {
                tracing::info!(replaced_bid_id = %replaced.id, "Bid replaced");
                "replaced"
            }
            None => {
                tracing::info!("Bid placed");
                "accepted"
            }
        };
        metrics::counter!(BIDS_PLACED_TOTAL, &[("result", result)]).increment(1);
        Ok(bid)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            auction::service::MockTeamLedger,
            kernel::test_utils::{
                TEAM_1,
                TEAM_2,
            },
            team::entities::Team,
        },
    };

    fn bid_input(team: &str, module: &str, amount: u64) -> HandleBidInput {
        HandleBidInput {
            bid_create: entities::BidCreate {
                team: team.to_string(),
                module: module.to_string(),
                amount,
            },
        }
    }

    fn ledger_with_credits(credits: u64) -> MockTeamLedger {
        let mut ledger = MockTeamLedger::new();
        ledger
            .expect_get_team()
            .returning(move |input| Ok(Team::new(input.team, credits)));
        ledger
    }

    #[tokio::test]
    async fn test_handle_bid_stores_bid_in_current_round() {
        let (service, _) = Service::new_with_mocks(ledger_with_credits(100));
        let bid = service
            .handle_bid(bid_input(TEAM_1, "gaussian_blur", 30))
            .await
            .unwrap();
        assert_eq!(bid.round, 1);
        assert_eq!(bid.team, TEAM_1);
        assert_eq!(bid.amount, 30);
        assert_eq!(service.repo.get_bids().await, vec![bid]);
    }

    #[tokio::test]
    async fn test_rebid_replaces_earlier_bid() {
        let (service, _) = Service::new_with_mocks(ledger_with_credits(100));
        let first = service
            .handle_bid(bid_input(TEAM_1, "gaussian_blur", 30))
            .await
            .unwrap();
        service
            .handle_bid(bid_input(TEAM_2, "grayscale", 10))
            .await
            .unwrap();
        let second = service
            .handle_bid(bid_input(TEAM_1, "edge_detection", 25))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        let bids = service.repo.get_bids().await;
        assert_eq!(bids.len(), 2);
        assert_eq!(bids[0].team, TEAM_2);
        assert_eq!(bids[1], second);
    }

    #[tokio::test]
    async fn test_rejected_bid_keeps_earlier_bid() {
        let (service, _) = Service::new_with_mocks(ledger_with_credits(40));
        let first = service
            .handle_bid(bid_input(TEAM_1, "gaussian_blur", 30))
            .await
            .unwrap();
        let result = service
            .handle_bid(bid_input(TEAM_1, "gaussian_blur", 41))
            .await;
        assert!(matches!(
            result,
            Err(RestError::InsufficientCredits { .. })
        ));
        assert_eq!(service.repo.get_bids().await, vec![first]);
    }
}
