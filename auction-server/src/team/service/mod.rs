use {
    super::{
        entities,
        repository::Repository,
    },
    crate::{
        api::RestError,
        auction::service::TeamLedger,
        kernel::entities::Credits,
    },
    axum::async_trait,
    std::sync::Arc,
};

pub mod award_module;
pub mod get_team;
pub mod get_teams;
pub mod reset_teams;
pub mod set_score;

pub struct Config {
    pub initial_credits: Credits,
}

pub struct ServiceInner {
    config: Config,
    repo:   Arc<Repository>,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);
impl std::ops::Deref for Service {
    type Target = ServiceInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    /// Creates one team per name, each holding the initial credits.
    pub fn new(team_names: Vec<String>, config: Config) -> Self {
        let teams = team_names
            .into_iter()
            .map(|name| entities::Team::new(name, config.initial_credits))
            .collect();
        Self(Arc::new(ServiceInner {
            config,
            repo: Arc::new(Repository::new(teams)),
        }))
    }
}

#[async_trait]
impl TeamLedger for Service {
    async fn get_team(&self, input: get_team::GetTeamInput) -> Result<entities::Team, RestError> {
        Service::get_team(self, input).await
    }

    async fn award_module(
        &self,
        input: award_module::AwardModuleInput,
    ) -> Result<entities::Team, RestError> {
        Service::award_module(self, input).await
    }

    async fn reset_teams(&self) {
        Service::reset_teams(self).await
    }
}

#[cfg(test)]
pub mod tests {
    use {
        super::*,
        crate::kernel::{
            entities::UserRole,
            test_utils::default_config,
        },
    };

    impl Service {
        pub fn new_for_test() -> Self {
            let config = default_config();
            Service::new(
                config
                    .users
                    .into_iter()
                    .filter(|user| user.role == UserRole::Team)
                    .map(|user| user.username)
                    .collect(),
                Config {
                    initial_credits: config.game.initial_credits,
                },
            )
        }
    }
}
