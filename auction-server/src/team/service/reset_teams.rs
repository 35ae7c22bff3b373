use super::Service;

impl Service {
    /// Gives every team its initial credits back and empties its pipeline and score.
    pub async fn reset_teams(&self) {
        self.repo.reset_teams(self.config.initial_credits).await;
        tracing::info!(initial_credits = self.config.initial_credits, "Teams reset");
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            kernel::test_utils::TEAM_1,
            team::{
                entities::Team,
                service::{
                    award_module::AwardModuleInput,
                    set_score::SetScoreInput,
                },
            },
        },
    };

    #[tokio::test]
    async fn test_reset_restores_initial_state() {
        let service = Service::new_for_test();
        service
            .award_module(AwardModuleInput {
                team:   TEAM_1.to_string(),
                module: "grayscale".to_string(),
                price:  40,
            })
            .await
            .unwrap();
        service
            .set_score(SetScoreInput {
                team:  TEAM_1.to_string(),
                score: 7,
            })
            .await
            .unwrap();

        service.reset_teams().await;
        let teams = service.get_teams().await;
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0], Team::new(TEAM_1.to_string(), 100));
    }
}
