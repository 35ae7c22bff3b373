use {
    super::Service,
    crate::{
        api::{
            ws::UpdateEvent,
            RestError,
        },
        auction::entities,
        per_metrics::ROUNDS_RESOLVED_TOTAL,
        team::service::award_module::AwardModuleInput,
    },
    axum_prometheus::metrics,
};

impl Service {
    /// Resolves the open round: the highest sealed bid wins, its team pays the bid
    /// and receives the module, and the next round opens.
    /// A round without bids stays open and nothing is recorded.
    #[tracing::instrument(skip_all, fields(round, winner), err)]
    pub async fn resolve_round(&self) -> Result<entities::RoundResolution, RestError> {
        let lock = self.repo.get_round_lock();
        let _guard = lock.lock().await;

        let round = self.repo.get_current_round().await;
        tracing::Span::current().record("round", round);
        let bids = self.repo.get_bids().await;

        let Some(winner) = entities::select_winner(&bids) else {
            tracing::info!("Round resolved without bids");
            metrics::counter!(ROUNDS_RESOLVED_TOTAL, &[("outcome", "no_bids")]).increment(1);
            return Ok(entities::RoundResolution {
                result:        entities::RoundResult::new(round, entities::RoundOutcome::NoBids),
                current_round: round,
            });
        };
        tracing::Span::current().record("winner", winner.team.as_str());

        self.team_ledger
            .award_module(AwardModuleInput {
                team:   winner.team.clone(),
                module: winner.module.clone(),
                price:  winner.amount,
            })
            .await
            .map_err(|err| {
                tracing::error!(
                    error = %err,
                    bid_id = %winner.id,
                    "Failed to charge the winning team"
                );
                err
            })?;

        let result = entities::RoundResult::new(round, winner.into());
        let current_round = self.repo.conclude_round(result.clone()).await;
        tracing::info!(
            module = %winner.module,
            amount = winner.amount,
            bid_count = bids.len(),
            "Round resolved"
        );
        metrics::counter!(ROUNDS_RESOLVED_TOTAL, &[("outcome", "won")]).increment(1);
        self.broadcast(UpdateEvent::RoundResolved(result.clone().into()));

        Ok(entities::RoundResolution {
            result,
            current_round,
        })
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            auction::service::{
                handle_bid::HandleBidInput,
                MockTeamLedger,
            },
            kernel::test_utils::{
                TEAM_1,
                TEAM_2,
            },
            team::{
                entities::Team,
                service::{
                    get_team::GetTeamInput,
                    Service as TeamService,
                },
            },
        },
        pipeline_auction_api_types::round as api_round,
    };

    async fn place_bid(service: &Service, team: &str, module: &str, amount: u64) {
        service
            .handle_bid(HandleBidInput {
                bid_create: entities::BidCreate {
                    team: team.to_string(),
                    module: module.to_string(),
                    amount,
                },
            })
            .await
            .unwrap();
    }

    async fn team(team_service: &TeamService, name: &str) -> Team {
        team_service
            .get_team(GetTeamInput {
                team: name.to_string(),
            })
            .await
            .unwrap()
    }

    fn ledger_with_credits(credits: u64) -> MockTeamLedger {
        let mut ledger = MockTeamLedger::new();
        ledger
            .expect_get_team()
            .returning(move |input| Ok(Team::new(input.team, credits)));
        ledger
    }

    #[tokio::test]
    async fn test_resolve_without_bids_keeps_round_open() {
        let mut ledger = MockTeamLedger::new();
        ledger.expect_award_module().never();
        let (service, mut receiver) = Service::new_with_mocks(ledger);

        let resolution = service.resolve_round().await.unwrap();
        assert_eq!(resolution.result.outcome, entities::RoundOutcome::NoBids);
        assert_eq!(resolution.result.round, 1);
        assert_eq!(resolution.current_round, 1);
        assert_eq!(service.get_round_status().await.round, 1);
        assert!(service.get_results().await.is_empty());
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_resolve_charges_highest_bidder() {
        let mut ledger = ledger_with_credits(100);
        ledger
            .expect_award_module()
            .withf(|input| {
                *input
                    == AwardModuleInput {
                        team:   TEAM_2.to_string(),
                        module: "edge_detection".to_string(),
                        price:  40,
                    }
            })
            .times(1)
            .returning(|input| Ok(Team::with_pipeline(&input.team, 60, &["edge_detection"])));
        let (service, mut receiver) = Service::new_with_mocks(ledger);

        place_bid(&service, TEAM_1, "gaussian_blur", 30).await;
        place_bid(&service, TEAM_2, "edge_detection", 40).await;
        let resolution = service.resolve_round().await.unwrap();

        let expected_outcome = entities::RoundOutcome::Won {
            team:   TEAM_2.to_string(),
            module: "edge_detection".to_string(),
            amount: 40,
        };
        assert_eq!(resolution.result.round, 1);
        assert_eq!(resolution.result.outcome, expected_outcome);
        assert_eq!(resolution.current_round, 2);
        assert!(service.get_bids().await.is_empty());
        assert_eq!(service.get_results().await, vec![resolution.result.clone()]);

        match receiver.try_recv().unwrap() {
            UpdateEvent::RoundResolved(result) => {
                assert_eq!(result.round, 1);
                assert_eq!(
                    result.outcome,
                    api_round::RoundOutcome::Won {
                        team:   TEAM_2.to_string(),
                        module: "edge_detection".to_string(),
                        amount: 40,
                    }
                );
            }
            update => panic!("Unexpected update {:?}", update),
        }
    }

    #[tokio::test]
    async fn test_resolve_tie_goes_to_first_bid() {
        let mut ledger = ledger_with_credits(100);
        ledger
            .expect_award_module()
            .withf(|input| input.team == TEAM_2)
            .times(1)
            .returning(|input| Ok(Team::new(input.team, 75)));
        let (service, _) = Service::new_with_mocks(ledger);

        place_bid(&service, TEAM_2, "gaussian_blur", 25).await;
        place_bid(&service, TEAM_1, "grayscale", 25).await;
        let resolution = service.resolve_round().await.unwrap();
        assert!(matches!(
            resolution.result.outcome,
            entities::RoundOutcome::Won { team, .. } if team == TEAM_2
        ));
    }

    #[tokio::test]
    async fn test_failed_charge_leaves_round_untouched() {
        let mut ledger = ledger_with_credits(100);
        ledger.expect_award_module().times(1).returning(|input| {
            Err(RestError::InsufficientCredits {
                credits: 10,
                amount:  input.price,
            })
        });
        let (service, mut receiver) = Service::new_with_mocks(ledger);

        place_bid(&service, TEAM_1, "gaussian_blur", 30).await;
        assert!(matches!(
            service.resolve_round().await,
            Err(RestError::InsufficientCredits { .. })
        ));
        assert_eq!(service.get_round_status().await.round, 1);
        assert_eq!(service.get_bids().await.len(), 1);
        assert!(service.get_results().await.is_empty());
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_rounds_move_credits_and_pipelines() {
        let (service, team_service, _) = Service::new_for_test();

        place_bid(&service, TEAM_1, "gaussian_blur", 30).await;
        place_bid(&service, TEAM_2, "gaussian_blur", 35).await;
        service.resolve_round().await.unwrap();

        let loser = team(&team_service, TEAM_1).await;
        let winner = team(&team_service, TEAM_2).await;
        assert_eq!(loser.credits, 100);
        assert!(loser.pipeline.is_empty());
        assert_eq!(winner.credits, 65);
        assert_eq!(winner.pipeline, vec!["gaussian_blur"]);

        // The winner cannot buy the same module twice.
        assert!(matches!(
            service
                .handle_bid(HandleBidInput {
                    bid_create: entities::BidCreate {
                        team:   TEAM_2.to_string(),
                        module: "gaussian_blur".to_string(),
                        amount: 40,
                    },
                })
                .await,
            Err(RestError::ModuleAlreadyOwned(_))
        ));

        place_bid(&service, TEAM_1, "gaussian_blur", 100).await;
        place_bid(&service, TEAM_2, "edge_detection", 65).await;
        let resolution = service.resolve_round().await.unwrap();
        assert_eq!(resolution.result.round, 2);
        assert_eq!(resolution.current_round, 3);
        assert_eq!(team(&team_service, TEAM_1).await.credits, 0);
        assert_eq!(team(&team_service, TEAM_2).await.credits, 65);

        let rounds: Vec<_> = service
            .get_results()
            .await
            .into_iter()
            .map(|result| result.round)
            .collect();
        assert_eq!(rounds, vec![1, 2]);
    }
}
