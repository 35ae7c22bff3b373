use {
    crate::{
        AccessLevel,
        Routable,
        Username,
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

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, ToResponse, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Team,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct Login {
    /// The username to log in with.
    #[schema(example = "team1")]
    pub username: Username,
    /// The password of the user.
    #[schema(example = "t1pass")]
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse, Debug)]
pub struct Session {
    /// The bearer token to send in the `Authorization` header of later requests.
    #[schema(example = "_q9zUYP-tQg8F7kQi2Rfl5c6sSy7xcc2yWh2H-nI-iI")]
    pub token:       String,
    /// The logged in user.
    #[schema(example = "team1")]
    pub username:    Username,
    /// The role of the logged in user.
    pub role:        UserRole,
    /// The time after which the token is no longer accepted.
    #[schema(example = "2024-05-23T21:26:57.329954Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub expiry_time: OffsetDateTime,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "")]
    PostSession,
    #[strum(serialize = "")]
    GetSession,
    #[strum(serialize = "")]
    DeleteSession,
}

impl Routable for Route {
    fn properties(&self) -> crate::RouteProperties {
        let full_path = crate::full_path(crate::Route::Session, self);
        match self {
            Route::PostSession => crate::RouteProperties {
                access_level: AccessLevel::Public,
                method: http::Method::POST,
                full_path,
            },
            Route::GetSession => crate::RouteProperties {
                access_level: AccessLevel::LoggedIn,
                method: http::Method::GET,
                full_path,
            },
            Route::DeleteSession => crate::RouteProperties {
                access_level: AccessLevel::LoggedIn,
                method: http::Method::DELETE,
                full_path,
            },
        }
    }
}
