use {
    crate::{
        api::{
            self,
            ws::WsState,
        },
        auction::service::{
            Config as AuctionConfig,
            Service as AuctionService,
        },
        config::{
            Config,
            RunOptions,
        },
        kernel::{
            entities::UserRole,
            workers::run_session_sweeper,
        },
        module::{
            entities::Module,
            service::Service as ModuleService,
        },
        per_metrics::start_metrics,
        session::{
            entities::User,
            service::{
                Config as SessionConfig,
                Service as SessionService,
            },
        },
        state::{
            ServerState,
            Store,
        },
        team::service::{
            Config as TeamConfig,
            Service as TeamService,
        },
    },
    anyhow::anyhow,
    axum_prometheus::PrometheusMetricLayer,
    futures::future::join_all,
    std::{
        sync::{
            atomic::{
                AtomicBool,
                Ordering,
            },
            Arc,
        },
        time::Duration,
    },
};

const NOTIFICATIONS_CHAN_LEN: usize = 1000;

/// Builds the services of a fresh game from the config.
pub fn build_store(config: Config, requester_ip_header_name: String) -> Store {
    let ws = WsState::new(requester_ip_header_name, NOTIFICATIONS_CHAN_LEN);
    let team_names = config
        .users
        .iter()
        .filter(|user| user.role == UserRole::Team)
        .map(|user| user.username.clone())
        .collect();
    let team_service = TeamService::new(
        team_names,
        TeamConfig {
            initial_credits: config.game.initial_credits,
        },
    );
    let module_service =
        ModuleService::new(config.modules.into_iter().map(Module::from).collect());
    let auction_service = AuctionService::new(
        AuctionConfig {
            first_round: config.game.first_round,
        },
        team_service.clone(),
        module_service.clone(),
        ws.broadcast_sender.clone(),
    );
    let session_service = SessionService::new(
        config.users.into_iter().map(User::from).collect(),
        SessionConfig {
            session_ttl: config.game.session_ttl,
        },
    );
    Store {
        session_service,
        module_service,
        team_service,
        auction_service,
        ws,
    }
}

pub async fn start_server(run_options: RunOptions) -> anyhow::Result<()> {
    tokio::spawn(async move {
        tracing::info!("Registered shutdown signal handler...");
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?err, "Failed to listen for the shutdown signal");
        }
        tracing::info!("Shut down signal received, waiting for tasks...");
        SHOULD_EXIT.store(true, Ordering::Release);
    });

    let config = Config::load(&run_options.config.config).map_err(|err| {
        anyhow!(
            "Failed to load config from file({path}): {:?}",
            err,
            path = run_options.config.config
        )
    })?;
    tracing::info!(
        users = config.users.len(),
        modules = config.modules.len(),
        initial_credits = config.game.initial_credits,
        "Loaded config"
    );

    let (metric_layer, metrics_recorder) = PrometheusMetricLayer::pair();
    let server_state = Arc::new(ServerState { metrics_recorder });
    let store = Arc::new(build_store(
        config,
        run_options.server.requester_ip_header_name.clone(),
    ));

    let results = join_all(vec![
        tokio::spawn(run_session_sweeper(store.clone())),
        tokio::spawn(start_metrics(run_options.clone(), server_state)),
        tokio::spawn(api::start_api(run_options, store, metric_layer)),
    ])
    .await;
    for result in results {
        match result {
            Ok(Err(err)) => tracing::error!(error = ?err, "Task failed"),
            Err(err) => tracing::error!(error = ?err, "Task panicked"),
            Ok(Ok(())) => {}
        }
    }
    Ok(())
}

// A static exit flag to indicate to running threads that we're shutting down. This is used to
// gracefully shutdown the application.
pub(crate) static SHOULD_EXIT: AtomicBool = AtomicBool::new(false);
pub const EXIT_CHECK_INTERVAL: Duration = Duration::from_secs(1);

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            auction::{
                entities::BidCreate,
                service::handle_bid::HandleBidInput,
            },
            kernel::test_utils::{
                default_config,
                ADMIN,
                TEAM_1,
            },
            session::service::login::LoginInput,
        },
        pipeline_auction_api_types::ws::ServerUpdateResponse,
    };

    #[tokio::test]
    async fn test_store_wires_services_together() {
        let store = build_store(default_config(), "X-Forwarded-For".to_string());
        let mut updates = store.ws.broadcast_receiver.resubscribe();

        let teams = store.team_service.get_teams().await;
        assert_eq!(teams.len(), 2);
        assert!(teams.iter().all(|team| team.name != ADMIN));

        let session = store
            .session_service
            .login(LoginInput {
                username: TEAM_1.to_string(),
                password: "t1pass".to_string(),
            })
            .unwrap();
        store
            .auction_service
            .handle_bid(HandleBidInput {
                bid_create: BidCreate {
                    team:   session.username,
                    module: "grayscale".to_string(),
                    amount: 7,
                },
            })
            .await
            .unwrap();
        store.auction_service.resolve_round().await.unwrap();

        let team = teams.into_iter().find(|team| team.name == TEAM_1).unwrap();
        assert_eq!(team.credits, 100);
        let team = store
            .team_service
            .get_teams()
            .await
            .into_iter()
            .find(|team| team.name == TEAM_1)
            .unwrap();
        assert_eq!(team.credits, 93);
        assert_eq!(team.pipeline, vec!["grayscale"]);

        let update: ServerUpdateResponse = updates.try_recv().unwrap().into();
        assert!(matches!(
            update,
            ServerUpdateResponse::RoundResolved { result } if result.round == 1
        ));
    }
}
