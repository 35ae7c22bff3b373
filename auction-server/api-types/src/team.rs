use {
    crate::{
        bid::Bid,
        AccessLevel,
        Credits,
        ModuleId,
        Routable,
        TeamName,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    strum::AsRefStr,
    utoipa::{
        IntoParams,
        ToResponse,
        ToSchema,
    },
};

#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse, Debug, PartialEq)]
pub struct Team {
    /// The name of the team.
    #[schema(example = "team1")]
    pub name:     TeamName,
    /// Credits left to bid with.
    #[schema(example = 100)]
    pub credits:  Credits,
    /// The modules won by the team, in the order they were won.
    #[schema(example = json!(["grayscale", "gaussian_blur"]))]
    pub pipeline: Vec<ModuleId>,
    /// The score recorded for the team by the admin.
    #[schema(example = 0)]
    pub score:    i64,
}

/// Everything a team sees on its dashboard.
#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse, Debug)]
pub struct TeamDashboard {
    pub team:          Team,
    /// The round currently open for bidding.
    #[schema(example = 1)]
    pub current_round: u64,
    /// The sealed bid the team placed in the current round, if any.
    pub current_bid:   Option<Bid>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse, Debug)]
pub struct Teams {
    pub items: Vec<Team>,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
#[into_params(parameter_in = Path)]
pub struct TeamParams {
    /// The name of the team.
    #[param(example = "team1")]
    pub team: TeamName,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct UpdateScore {
    /// The new score of the team.
    #[schema(example = 42)]
    pub score: i64,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "me")]
    GetMyTeam,
    #[strum(serialize = "")]
    GetTeams,
    #[strum(serialize = ":team/score")]
    PutScore,
}

impl Routable for Route {
    fn properties(&self) -> crate::RouteProperties {
        let full_path = crate::full_path(crate::Route::Team, self);
        match self {
            Route::GetMyTeam => crate::RouteProperties {
                access_level: AccessLevel::Team,
                method: http::Method::GET,
                full_path,
            },
            Route::GetTeams => crate::RouteProperties {
                access_level: AccessLevel::Admin,
                method: http::Method::GET,
                full_path,
            },
            Route::PutScore => crate::RouteProperties {
                access_level: AccessLevel::Admin,
                method: http::Method::PUT,
                full_path,
            },
        }
    }
}
