use {
    crate::{
        AccessLevel,
        Credits,
        ModuleId,
        Routable,
        RoundNumber,
        TeamName,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    strum::AsRefStr,
    time::OffsetDateTime,
    utoipa::{
        ToResponse,
        ToSchema,
    },
};

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoundOutcome {
    /// The highest bid won the module it was placed on.
    #[schema(title = "Won")]
    Won {
        #[schema(example = "team1")]
        team:   TeamName,
        #[schema(example = "gaussian_blur")]
        module: ModuleId,
        #[schema(example = 20)]
        amount: Credits,
    },
    /// Nobody bid in the round. The round stays open.
    #[schema(title = "NoBids")]
    NoBids,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse, Debug, PartialEq)]
pub struct RoundResult {
    /// The round which was resolved.
    #[schema(example = 1)]
    pub round:           RoundNumber,
    pub outcome:         RoundOutcome,
    /// The time the admin resolved the round.
    #[schema(example = "2024-05-23T21:26:57.329954Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub resolution_time: OffsetDateTime,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse, Debug)]
pub struct RoundResolution {
    pub result:        RoundResult,
    /// The round open for bidding after the resolution.
    #[schema(example = 2)]
    pub current_round: RoundNumber,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse, Debug, PartialEq)]
pub struct RoundStatus {
    /// The round open for bidding.
    #[schema(example = 1)]
    pub round:     RoundNumber,
    /// How many teams have a sealed bid in the round.
    #[schema(example = 2)]
    pub bid_count: usize,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse, Debug)]
pub struct RoundResults {
    pub items: Vec<RoundResult>,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "current")]
    GetCurrentRound,
    #[strum(serialize = "current/resolve")]
    ResolveRound,
    #[strum(serialize = "")]
    GetResults,
}

impl Routable for Route {
    fn properties(&self) -> crate::RouteProperties {
        let full_path = crate::full_path(crate::Route::Round, self);
        match self {
            Route::GetCurrentRound => crate::RouteProperties {
                access_level: AccessLevel::Public,
                method: http::Method::GET,
                full_path,
            },
            Route::ResolveRound => crate::RouteProperties {
                access_level: AccessLevel::Admin,
                method: http::Method::POST,
                full_path,
            },
            Route::GetResults => crate::RouteProperties {
                access_level: AccessLevel::Public,
                method: http::Method::GET,
                full_path,
            },
        }
    }
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum GameRoute {
    #[strum(serialize = "reset")]
    ResetGame,
}

impl Routable for GameRoute {
    fn properties(&self) -> crate::RouteProperties {
        let full_path = crate::full_path(crate::Route::Game, self);
        match self {
            GameRoute::ResetGame => crate::RouteProperties {
                access_level: AccessLevel::Admin,
                method: http::Method::POST,
                full_path,
            },
        }
    }
}
