use {
    super::{
        entities,
        service::login::LoginInput,
    },
    crate::{
        api::{
            Auth,
            RestError,
            WrappedRouter,
        },
        state::Store,
    },
    axum::{
        extract::State,
        http::StatusCode,
        Json,
        Router,
    },
    axum_extra::extract::WithRejection,
    pipeline_auction_api_types::{
        session::{
            Login,
            Route,
            Session,
        },
        ErrorBodyResponse,
    },
    std::sync::Arc,
};

impl From<entities::Session> for Session {
    fn from(session: entities::Session) -> Self {
        Self {
            token:       session.token,
            username:    session.username,
            role:        session.role,
            expiry_time: session.expiry_time,
        }
    }
}

/// Log in with a username and password.
///
/// Returns a bearer token which has to be sent with every request that needs a logged in user.
#[utoipa::path(post, path = "/v1/sessions", request_body = Login, responses(
    (status = 200, description = "The new session", body = Session),
    (status = 400, response = ErrorBodyResponse),
    (status = 401, description = "Wrong username or password", body = ErrorBodyResponse),
),)]
pub async fn post_session(
    State(store): State<Arc<Store>>,
    WithRejection(Json(login), _): WithRejection<Json<Login>, RestError>,
) -> Result<Json<Session>, RestError> {
    let session = store.session_service.login(LoginInput {
        username: login.username,
        password: login.password,
    })?;
    Ok(Json(session.into()))
}

/// Fetch the session of the sent token.
#[utoipa::path(get, path = "/v1/sessions",
security(
    ("bearerAuth" = []),
), responses(
    (status = 200, description = "The session the token belongs to", body = Session),
    (status = 401, response = ErrorBodyResponse),
),)]
pub async fn get_session(auth: Auth) -> Result<Json<Session>, RestError> {
    Ok(Json(auth.session()?.into()))
}

/// Log out and revoke the sent token.
#[utoipa::path(delete, path = "/v1/sessions",
security(
    ("bearerAuth" = []),
), responses(
    (status = 204, description = "The token was revoked"),
    (status = 401, response = ErrorBodyResponse),
),)]
pub async fn delete_session(
    auth: Auth,
    State(store): State<Arc<Store>>,
) -> Result<StatusCode, RestError> {
    let session = auth.session()?;
    store.session_service.logout(&session);
    Ok(StatusCode::NO_CONTENT)
}

pub fn get_routes(store: Arc<Store>) -> Router<Arc<Store>> {
    WrappedRouter::new(store)
        .route(Route::PostSession, post_session)
        .route(Route::GetSession, get_session)
        .route(Route::DeleteSession, delete_session)
        .router
}
