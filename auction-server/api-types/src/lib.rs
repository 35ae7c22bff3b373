use {
    ::serde::{
        Deserialize,
        Serialize,
    },
    strum::AsRefStr,
    utoipa::{
        ToResponse,
        ToSchema,
    },
};

pub mod bid;
pub mod module;
pub mod round;
pub mod session;
pub mod team;
pub mod ws;

pub type TeamName = String;
pub type Username = String;
pub type ModuleId = String;
pub type Credits = u64;
pub type RoundNumber = u64;

#[derive(ToResponse, ToSchema, Serialize, Deserialize, Debug)]
#[response(description = "An error occurred processing the request")]
pub struct ErrorBodyResponse {
    pub error: String,
}

#[derive(AsRefStr)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "v1")]
    V1,
    #[strum(serialize = "sessions")]
    Session,
    #[strum(serialize = "modules")]
    Module,
    #[strum(serialize = "teams")]
    Team,
    #[strum(serialize = "bids")]
    Bid,
    #[strum(serialize = "rounds")]
    Round,
    #[strum(serialize = "game")]
    Game,
    #[strum(serialize = "")]
    Root,
    #[strum(serialize = "live")]
    Liveness,
    #[strum(serialize = "docs")]
    Docs,
    #[strum(serialize = "docs/openapi.json")]
    OpenApi,
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum AccessLevel {
    Admin,
    Team,
    LoggedIn,
    Public,
}

pub struct RouteProperties {
    pub access_level: AccessLevel,
    pub method:       http::Method,
    pub full_path:    String,
}

pub trait Routable: AsRef<str> + Clone {
    fn properties(&self) -> RouteProperties;
}

/// Joins `/v1`, the resource prefix and the route suffix into the path served by the api.
pub fn full_path(resource: Route, route: &impl AsRef<str>) -> String {
    format!(
        "{}{}{}",
        Route::V1.as_ref(),
        resource.as_ref(),
        route.as_ref()
    )
    .trim_end_matches('/')
    .to_string()
}
