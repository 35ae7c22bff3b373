use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
        kernel::entities::TeamName,
        team::service::get_team::GetTeamInput,
    },
};

#[derive(Debug, Clone)]
pub struct GetTeamRoundStatusInput {
    pub team: TeamName,
}

impl Service {
    /// The account of the team together with the open round and its sealed bid in it,
    /// read at a single point between bids and resolutions.
    pub async fn get_team_round_status(
        &self,
        input: GetTeamRoundStatusInput,
    ) -> Result<entities::TeamRoundStatus, RestError> {
        let lock = self.repo.get_round_lock();
        let _guard = lock.lock().await;

        let team = self
            .team_ledger
            .get_team(GetTeamInput {
                team: input.team.clone(),
            })
            .await?;
        let round = self.repo.get_current_round().await;
        let bid = self.repo.get_bid(&input.team).await;
        Ok(entities::TeamRoundStatus { team, round, bid })
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            auction::service::handle_bid::HandleBidInput,
            kernel::test_utils::TEAM_1,
        },
    };

    fn status_input() -> GetTeamRoundStatusInput {
        GetTeamRoundStatusInput {
            team: TEAM_1.to_string(),
        }
    }

    #[tokio::test]
    async fn test_status_follows_resolution() {
        let (service, _, _) = Service::new_for_test();
        let bid = service
            .handle_bid(HandleBidInput {
                bid_create: entities::BidCreate {
                    team:   TEAM_1.to_string(),
                    module: "gaussian_blur".to_string(),
                    amount: 25,
                },
            })
            .await
            .unwrap();

        let status = service.get_team_round_status(status_input()).await.unwrap();
        assert_eq!(status.round, 1);
        assert_eq!(status.team.credits, 100);
        assert_eq!(status.bid, Some(bid));

        service.resolve_round().await.unwrap();

        let status = service.get_team_round_status(status_input()).await.unwrap();
        assert_eq!(status.round, 2);
        assert_eq!(status.team.credits, 75);
        assert_eq!(status.team.pipeline, vec!["gaussian_blur"]);
        assert_eq!(status.bid, None);
    }

    #[tokio::test]
    async fn test_status_of_unknown_team() {
        let (service, _, _) = Service::new_for_test();
        assert!(matches!(
            service
                .get_team_round_status(GetTeamRoundStatusInput {
                    team: "ghosts".to_string(),
                })
                .await,
            Err(RestError::TeamNotFound)
        ));
    }
}
