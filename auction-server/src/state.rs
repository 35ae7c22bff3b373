use {
    crate::{
        api::ws::WsState,
        auction::service::Service as AuctionService,
        module::service::Service as ModuleService,
        session::service::Service as SessionService,
        team::service::Service as TeamService,
    },
    axum_prometheus::metrics_exporter_prometheus::PrometheusHandle,
};

pub struct ServerState {
    pub metrics_recorder: PrometheusHandle,
}

/// Everything the api handlers share.
pub struct Store {
    pub session_service: SessionService,
    pub module_service:  ModuleService,
    pub team_service:    TeamService,
    pub auction_service: AuctionService,
    pub ws:              WsState,
}
