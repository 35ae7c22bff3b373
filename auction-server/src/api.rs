use {
    crate::{
        auction,
        config::RunOptions,
        kernel::entities::{
            Credits,
            ModuleId,
        },
        module,
        server::{
            EXIT_CHECK_INTERVAL,
            SHOULD_EXIT,
        },
        session::{
            self,
            entities::Session,
        },
        state::Store,
        team,
    },
    anyhow::Result,
    axum::{
        async_trait,
        extract::{
            rejection::{
                JsonRejection,
                PathRejection,
            },
            FromRequestParts,
            Request,
        },
        handler::Handler,
        http::{
            request::Parts,
            Method,
            StatusCode,
        },
        middleware::{
            self,
            Next,
        },
        response::{
            IntoResponse,
            Response,
        },
        routing::{
            delete,
            get,
            post,
            put,
            MethodRouter,
        },
        Json,
        Router,
    },
    axum_extra::{
        headers::{
            authorization::Bearer,
            Authorization,
        },
        TypedHeader,
    },
    axum_prometheus::PrometheusMetricLayer,
    clap::crate_version,
    pipeline_auction_api_types::{
        self as api_types,
        AccessLevel,
        ErrorBodyResponse,
        Routable,
    },
    std::sync::{
        atomic::Ordering,
        Arc,
    },
    tower_http::cors::CorsLayer,
    utoipa::{
        openapi::security::{
            Http,
            HttpAuthScheme,
            SecurityScheme,
        },
        Modify,
        OpenApi,
    },
    utoipa_redoc::{
        Redoc,
        Servable,
    },
};

pub(crate) mod ws;

async fn root() -> String {
    format!("Pipeline Auction Server API {}", crate_version!())
}

#[derive(Debug)]
pub enum RestError {
    /// The request contained invalid parameters
    BadParameters(String),
    /// The request requires a valid bearer token
    Unauthorized,
    /// The logged in user is not allowed to use this route
    Forbidden,
    /// The module was not found
    ModuleNotFound,
    /// The team was not found
    TeamNotFound,
    /// The team has no bid in the current round
    BidNotFound,
    /// The team already owns the module it bid on
    ModuleAlreadyOwned(ModuleId),
    /// The bid is below the minimum bid of the module
    BidTooLow { min_bid: Credits },
    /// The team cannot pay for the bid
    InsufficientCredits { credits: Credits, amount: Credits },
    /// The number of open websocket connections has reached the limit
    TooManyOpenWebsocketConnections,
}

impl RestError {
    pub fn to_status_and_message(&self) -> (StatusCode, String) {
        match self {
            RestError::BadParameters(msg) => {
                (StatusCode::BAD_REQUEST, format!("Bad parameters: {}", msg))
            }
            RestError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "A valid access token is required".to_string(),
            ),
            RestError::Forbidden => (
                StatusCode::FORBIDDEN,
                "You are not allowed to access this route".to_string(),
            ),
            RestError::ModuleNotFound => (
                StatusCode::NOT_FOUND,
                "Module with the specified id was not found".to_string(),
            ),
            RestError::TeamNotFound => (
                StatusCode::NOT_FOUND,
                "Team with the specified name was not found".to_string(),
            ),
            RestError::BidNotFound => (
                StatusCode::NOT_FOUND,
                "No bid was placed in the current round".to_string(),
            ),
            RestError::ModuleAlreadyOwned(module) => (
                StatusCode::BAD_REQUEST,
                format!("Module {} is already in the pipeline", module),
            ),
            RestError::BidTooLow { min_bid } => (
                StatusCode::BAD_REQUEST,
                format!("Bid is below the minimum bid of {} credits", min_bid),
            ),
            RestError::InsufficientCredits { credits, amount } => (
                StatusCode::BAD_REQUEST,
                format!(
                    "Insufficient credits: bid of {} exceeds the {} credits left",
                    amount, credits
                ),
            ),
            RestError::TooManyOpenWebsocketConnections => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many open websocket connections".to_string(),
            ),
        }
    }
}

impl std::fmt::Display for RestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_status_and_message().1)
    }
}

impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        RestError::BadParameters(rejection.body_text())
    }
}

impl From<PathRejection> for RestError {
    fn from(rejection: PathRejection) -> Self {
        RestError::BadParameters(rejection.body_text())
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, msg) = self.to_status_and_message();
        (status, Json(ErrorBodyResponse { error: msg })).into_response()
    }
}

pub async fn live() -> Response {
    (StatusCode::OK, "OK").into_response()
}

#[derive(Clone, Debug)]
pub enum Auth {
    Authorized(String, Session),
    Unauthenticated,
}

impl Auth {
    pub fn check_access(&self, access_level: AccessLevel) -> Result<(), RestError> {
        match (access_level, self) {
            (AccessLevel::Public, _) => Ok(()),
            (_, Auth::Unauthenticated) => Err(RestError::Unauthorized),
            (AccessLevel::LoggedIn, Auth::Authorized(..)) => Ok(()),
            (AccessLevel::Team, Auth::Authorized(_, session)) if session.is_team() => Ok(()),
            (AccessLevel::Admin, Auth::Authorized(_, session)) if session.is_admin() => Ok(()),
            _ => Err(RestError::Forbidden),
        }
    }

    /// Returns the session of a logged in user or rejects the request.
    pub fn session(self) -> Result<Session, RestError> {
        match self {
            Auth::Authorized(_, session) => Ok(session),
            Auth::Unauthenticated => Err(RestError::Unauthorized),
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<Store>> for Auth {
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<Store>,
    ) -> Result<Self, Self::Rejection> {
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(authorization)) => {
                let token = authorization.token().to_string();
                let session = state.session_service.get_session(&token)?;
                Ok(Auth::Authorized(token, session))
            }
            Err(_) => Ok(Auth::Unauthenticated),
        }
    }
}

async fn require_logged_in(auth: Auth, req: Request, next: Next) -> Result<Response, RestError> {
    auth.check_access(AccessLevel::LoggedIn)?;
    Ok(next.run(req).await)
}

async fn require_team(auth: Auth, req: Request, next: Next) -> Result<Response, RestError> {
    auth.check_access(AccessLevel::Team)?;
    Ok(next.run(req).await)
}

async fn require_admin(auth: Auth, req: Request, next: Next) -> Result<Response, RestError> {
    auth.check_access(AccessLevel::Admin)?;
    Ok(next.run(req).await)
}

/// A router which takes the path, method and access level of every route from the api types.
pub struct WrappedRouter {
    store:      Arc<Store>,
    pub router: Router<Arc<Store>>,
}

impl WrappedRouter {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            router: Router::new(),
        }
    }

    pub fn route<H, T>(self, route: impl Routable, handler: H) -> Self
    where
        H: Handler<T, Arc<Store>>,
        T: 'static,
    {
        let properties = route.properties();
        let method_router: MethodRouter<Arc<Store>> = match properties.method {
            Method::GET => get(handler),
            Method::POST => post(handler),
            Method::PUT => put(handler),
            Method::DELETE => delete(handler),
            method => panic!("Unsupported method {} for {}", method, properties.full_path),
        };
        let method_router = match properties.access_level {
            AccessLevel::Public => method_router,
            AccessLevel::LoggedIn => method_router.route_layer(middleware::from_fn_with_state(
                self.store.clone(),
                require_logged_in,
            )),
            AccessLevel::Team => method_router.route_layer(middleware::from_fn_with_state(
                self.store.clone(),
                require_team,
            )),
            AccessLevel::Admin => method_router.route_layer(middleware::from_fn_with_state(
                self.store.clone(),
                require_admin,
            )),
        };
        Self {
            router: self.router.route(&properties.full_path, method_router),
            store:  self.store,
        }
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

// Make sure functions included in the paths section have distinct names, otherwise some api generators will fail
#[derive(OpenApi)]
#[openapi(
    paths(
        session::api::post_session,
        session::api::get_session,
        session::api::delete_session,
        module::api::get_modules,
        module::api::get_module,
        team::api::get_my_team,
        team::api::get_teams,
        team::api::put_team_score,
        auction::api::post_bid,
        auction::api::get_my_bid,
        auction::api::delete_my_bid,
        auction::api::get_bids,
        auction::api::get_current_round,
        auction::api::post_resolve_round,
        auction::api::get_round_results,
        auction::api::post_reset_game,
    ),
    components(
        schemas(
            api_types::session::Login,
            api_types::session::Session,
            api_types::session::UserRole,
            api_types::module::Module,
            api_types::module::Modules,
            api_types::module::Stage,
            api_types::team::Team,
            api_types::team::Teams,
            api_types::team::TeamDashboard,
            api_types::team::UpdateScore,
            api_types::bid::Bid,
            api_types::bid::BidCreate,
            api_types::bid::BidResult,
            api_types::bid::Bids,
            api_types::round::RoundOutcome,
            api_types::round::RoundResult,
            api_types::round::RoundResolution,
            api_types::round::RoundStatus,
            api_types::round::RoundResults,
            api_types::ws::ServerUpdateResponse,
            ErrorBodyResponse,
        ),
        responses(
            ErrorBodyResponse,
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Pipeline Auction Server", description = "Auction Server runs the sealed-bid auction in which \
        teams buy image-processing modules for their pipeline with a limited credit budget.")
    )
)]
pub struct ApiDoc;

pub fn get_routes(store: Arc<Store>) -> Router<Arc<Store>> {
    let v1_routes = Router::new()
        .merge(session::api::get_routes(store.clone()))
        .merge(module::api::get_routes(store.clone()))
        .merge(team::api::get_routes(store.clone()))
        .merge(auction::api::get_routes(store.clone()))
        .merge(ws::get_routes(store.clone()));

    Router::new()
        .merge(Redoc::with_url(
            api_types::Route::Docs.as_ref(),
            ApiDoc::openapi(),
        ))
        .route(
            api_types::Route::OpenApi.as_ref(),
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .merge(v1_routes)
        .route(api_types::Route::Root.as_ref(), get(root))
        .route(api_types::Route::Liveness.as_ref(), get(live))
}

pub async fn start_api(
    run_options: RunOptions,
    store: Arc<Store>,
    metric_layer: PrometheusMetricLayer<'static>,
) -> Result<()> {
    let app: Router<()> = get_routes(store.clone())
        .layer(CorsLayer::permissive())
        .layer(metric_layer)
        .with_state(store);

    tracing::info!(addr = %run_options.server.listen_addr, "Starting API server...");
    let listener = tokio::net::TcpListener::bind(&run_options.server.listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            while !SHOULD_EXIT.load(Ordering::Acquire) {
                tokio::time::sleep(EXIT_CHECK_INTERVAL).await;
            }
            tracing::info!("Shutting down API server...");
        })
        .await?;
    Ok(())
}
