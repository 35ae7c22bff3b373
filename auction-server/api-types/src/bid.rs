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
    uuid::Uuid,
};

pub type BidId = Uuid;

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct BidCreate {
    /// The module to bid on.
    #[schema(example = "gaussian_blur")]
    pub module: ModuleId,
    /// The amount of credits offered.
    #[schema(example = 20)]
    pub amount: Credits,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse, Debug, PartialEq)]
pub struct Bid {
    /// The unique id of the bid.
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:              BidId,
    /// The team which placed the bid.
    #[schema(example = "team1")]
    pub team:            TeamName,
    /// The module the bid is for.
    #[schema(example = "gaussian_blur")]
    pub module:          ModuleId,
    /// The amount of credits offered.
    #[schema(example = 20)]
    pub amount:          Credits,
    /// The round the bid was placed in.
    #[schema(example = 1)]
    pub round:           RoundNumber,
    /// The time the server received the bid.
    #[schema(example = "2024-05-23T21:26:57.329954Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub submission_time: OffsetDateTime,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse, Debug)]
pub struct BidResult {
    #[schema(example = "OK")]
    pub status: String,
    /// The unique id created to identify the bid.
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:     BidId,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse, Debug)]
pub struct Bids {
    pub items: Vec<Bid>,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "")]
    PostBid,
    #[strum(serialize = "me")]
    GetMyBid,
    #[strum(serialize = "me")]
    DeleteMyBid,
    #[strum(serialize = "")]
    GetBids,
}

impl Routable for Route {
    fn properties(&self) -> crate::RouteProperties {
        let full_path = crate::full_path(crate::Route::Bid, self);
        match self {
            Route::PostBid => crate::RouteProperties {
                access_level: AccessLevel::Team,
                method: http::Method::POST,
                full_path,
            },
            Route::GetMyBid => crate::RouteProperties {
                access_level: AccessLevel::Team,
                method: http::Method::GET,
                full_path,
            },
            Route::DeleteMyBid => crate::RouteProperties {
                access_level: AccessLevel::Team,
                method: http::Method::DELETE,
                full_path,
            },
            Route::GetBids => crate::RouteProperties {
                access_level: AccessLevel::Admin,
                method: http::Method::GET,
                full_path,
            },
        }
    }
}
