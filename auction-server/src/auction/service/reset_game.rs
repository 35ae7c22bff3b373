use {
    super::Service,
    crate::{
        api::ws::UpdateEvent,
        kernel::entities::RoundNumber,
    },
};

impl Service {
    /// Starts the game over: every team gets its initial credits back,
    /// sealed bids and results are dropped and the first round opens.
    #[tracing::instrument(skip_all)]
    pub async fn reset_game(&self) -> RoundNumber {
        let lock = self.repo.get_round_lock();
        let _guard = lock.lock().await;

        self.team_ledger.reset_teams().await;
        self.repo.reset(self.config.first_round).await;
        tracing::info!(round = self.config.first_round, "Game reset");
        self.broadcast(UpdateEvent::GameReset(self.config.first_round));
        self.config.first_round
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            auction::{
                entities,
                service::{
                    handle_bid::HandleBidInput,
                    MockTeamLedger,
                },
            },
            kernel::test_utils::TEAM_1,
            team::entities::Team,
        },
    };

    #[tokio::test]
    async fn test_reset_game_reopens_first_round() {
        let mut ledger = MockTeamLedger::new();
        ledger
            .expect_get_team()
            .returning(|input| Ok(Team::new(input.team, 100)));
        ledger
            .expect_award_module()
            .returning(|input| Ok(Team::new(input.team, 90)));
        ledger.expect_reset_teams().times(1).returning(|| ());
        let (service, mut receiver) = Service::new_with_mocks(ledger);

        service
            .handle_bid(HandleBidInput {
                bid_create: entities::BidCreate {
                    team:   TEAM_1.to_string(),
                    module: "edge_detection".to_string(),
                    amount: 10,
                },
            })
            .await
            .unwrap();
        service.resolve_round().await.unwrap();
        assert!(matches!(
            receiver.try_recv(),
            Ok(UpdateEvent::RoundResolved(_))
        ));

        assert_eq!(service.reset_game().await, 1);
        assert_eq!(
            service.get_round_status().await,
            entities::RoundStatus {
                round:     1,
                bid_count: 0,
            }
        );
        assert!(service.get_results().await.is_empty());
        assert!(matches!(
            receiver.try_recv(),
            Ok(UpdateEvent::GameReset(1))
        ));
    }
}
