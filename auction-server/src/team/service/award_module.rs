use {
    super::Service,
    crate::{
        api::RestError,
        kernel::entities::{
            Credits,
            ModuleId,
            TeamName,
        },
        team::entities,
    },
};

#[derive(Clone, Debug, PartialEq)]
pub struct AwardModuleInput {
    pub team:   TeamName,
    pub module: ModuleId,
    pub price:  Credits,
}

impl Service {
    /// Charges the team the price of the module and appends the module to its pipeline.
    #[tracing::instrument(
        skip_all,
        fields(team = %input.team, module = %input.module, price = input.price)
    )]
    pub async fn award_module(&self, input: AwardModuleInput) -> Result<entities::Team, RestError> {
        let mut result = Ok(());
        let team = self
            .repo
            .update_team(&input.team, |team| {
                if !team.can_afford(input.price) {
                    result = Err(RestError::InsufficientCredits {
                        credits: team.credits,
                        amount:  input.price,
                    });
                    return;
                }
                team.credits -= input.price;
                team.pipeline.push(input.module.clone());
            })
            .await
            .ok_or(RestError::TeamNotFound)?;
        result?;
        tracing::info!(credits = team.credits, "Module awarded");
        Ok(team)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            kernel::test_utils::TEAM_1,
            team::service::get_team::GetTeamInput,
        },
    };

    fn input(module: &str, price: Credits) -> AwardModuleInput {
        AwardModuleInput {
            team: TEAM_1.to_string(),
            module: module.to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn test_award_module_charges_and_extends_pipeline() {
        let service = Service::new_for_test();
        service.award_module(input("grayscale", 30)).await.unwrap();
        let team = service.award_module(input("gaussian_blur", 45)).await.unwrap();
        assert_eq!(team.credits, 25);
        assert_eq!(team.pipeline, vec!["grayscale", "gaussian_blur"]);

        let stored = service
            .get_team(GetTeamInput {
                team: TEAM_1.to_string(),
            })
            .await
            .unwrap();
        assert_eq!(stored, team);
    }

    #[tokio::test]
    async fn test_award_module_may_spend_every_credit() {
        let service = Service::new_for_test();
        let team = service.award_module(input("grayscale", 100)).await.unwrap();
        assert_eq!(team.credits, 0);
    }

    #[tokio::test]
    async fn test_award_module_never_overdraws() {
        let service = Service::new_for_test();
        let result = service.award_module(input("grayscale", 101)).await;
        assert!(matches!(
            result,
            Err(RestError::InsufficientCredits {
                credits: 100,
                amount:  101,
            })
        ));
        let team = service
            .get_team(GetTeamInput {
                team: TEAM_1.to_string(),
            })
            .await
            .unwrap();
        assert_eq!(team.credits, 100);
        assert!(team.pipeline.is_empty());
    }

    #[tokio::test]
    async fn test_award_module_to_unknown_team() {
        let service = Service::new_for_test();
        let result = service
            .award_module(AwardModuleInput {
                team:   "team9".to_string(),
                module: "grayscale".to_string(),
                price:  1,
            })
            .await;
        assert!(matches!(result, Err(RestError::TeamNotFound)));
    }
}
