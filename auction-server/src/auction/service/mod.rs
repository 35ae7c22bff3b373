use {
    super::repository::Repository,
    crate::{
        api::{
            ws::UpdateEvent,
            RestError,
        },
        kernel::entities::RoundNumber,
        module::service::Service as ModuleService,
        team::{
            entities::Team,
            service::{
                award_module::AwardModuleInput,
                get_team::GetTeamInput,
            },
        },
    },
    axum::async_trait,
    std::sync::Arc,
    tokio::sync::broadcast,
};
#[cfg(test)]
use mockall::automock;

pub mod get_bid;
pub mod get_bids;
pub mod get_results;
pub mod get_round_status;
pub mod get_team_round_status;
pub mod handle_bid;
pub mod reset_game;
pub mod resolve_round;
pub mod verification;
pub mod withdraw_bid;

/// The credits and pipelines the auction reads and charges.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamLedger: Send + Sync + 'static {
    async fn get_team(&self, input: GetTeamInput) -> Result<Team, RestError>;
    /// Charges the price and appends the module to the pipeline of the team.
    async fn award_module(&self, input: AwardModuleInput) -> Result<Team, RestError>;
    async fn reset_teams(&self);
}

pub struct Config {
    pub first_round: RoundNumber,
}

pub struct ServiceInner {
    config:         Config,
    repo:           Arc<Repository>,
    team_ledger:    Box<dyn TeamLedger>,
    module_service: ModuleService,
    event_sender:   broadcast::Sender<UpdateEvent>,
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
    pub fn new(
        config: Config,
        team_ledger: impl TeamLedger,
        module_service: ModuleService,
        event_sender: broadcast::Sender<UpdateEvent>,
    ) -> Self {
        Self(Arc::new(ServiceInner {
            repo: Arc::new(Repository::new(config.first_round)),
            config,
            team_ledger: Box::new(team_ledger),
            module_service,
            event_sender,
        }))
    }

    fn broadcast(&self, update: UpdateEvent) {
        if let Err(err) = self.event_sender.send(update) {
            tracing::debug!(error = ?err, "No subscriber received the update");
        }
    }
}
