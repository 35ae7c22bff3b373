pub use pipeline_auction_api_types as api_types;
use {
    futures_util::{
        SinkExt,
        StreamExt,
    },
    pipeline_auction_api_types::{
        bid::{
            self,
            Bid,
            BidCreate,
            BidResult,
            Bids,
        },
        module::{
            self,
            Module,
            Modules,
        },
        round::{
            self,
            GameRoute,
            RoundResolution,
            RoundResult,
            RoundResults,
            RoundStatus,
        },
        session::{
            self,
            Login,
            Session,
        },
        team::{
            self,
            Team,
            TeamDashboard,
            Teams,
            UpdateScore,
        },
        ws::{
            self,
            ServerUpdateResponse,
        },
        AccessLevel,
        ErrorBodyResponse,
        Routable,
    },
    reqwest::Response,
    serde::{
        de::DeserializeOwned,
        Deserialize,
        Serialize,
    },
    std::{
        fmt,
        sync::Arc,
    },
    tokio::{
        net::TcpStream,
        sync::broadcast,
    },
    tokio_stream::wrappers::BroadcastStream,
    tokio_tungstenite::{
        connect_async,
        tungstenite::Message,
        MaybeTlsStream,
        WebSocketStream,
    },
    url::Url,
};

const UPDATE_CHANNEL_SIZE: usize = 100;

#[derive(Clone)]
pub struct Client {
    http_url: Url,
    ws_url:   Url,
    token:    Option<String>,
    client:   reqwest::Client,
}

pub struct ClientConfig {
    pub http_url: String,
    pub ws_url:   String,
    /// A token of an earlier session. Use [`Client::login`] to get a new one.
    pub token:    Option<String>,
}

#[derive(Debug)]
pub enum ClientError {
    InvalidHttpUrl(String),
    InvalidWsUrl(String),
    RequestFailed(reqwest::Error),
    RequestError(String),
    DecodeResponseFailed(reqwest::Error),
    AuthenticationRequired,
    WsConnectFailed(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidHttpUrl(e) => write!(f, "Invalid http url: {}", e),
            ClientError::InvalidWsUrl(e) => write!(f, "Invalid ws url: {}", e),
            ClientError::RequestFailed(e) => write!(f, "Request failed: {}", e),
            ClientError::RequestError(e) => write!(f, "Server rejected the request: {}", e),
            ClientError::DecodeResponseFailed(e) => write!(f, "Failed to decode response: {}", e),
            ClientError::AuthenticationRequired => write!(f, "Login required"),
            ClientError::WsConnectFailed(e) => write!(f, "Failed to connect websocket: {}", e),
        }
    }
}

impl std::error::Error for ClientError {}

enum DecodedResponse<T: DeserializeOwned> {
    Ok(T),
    Err(ErrorBodyResponse),
}

impl<'de, T: DeserializeOwned> serde::Deserialize<'de> for DecodedResponse<T> {
    fn deserialize<D>(deserializer: D) -> Result<DecodedResponse<T>, D::Error>
    where
        D: ::serde::Deserializer<'de>,
    {
        let json_value = serde_json::Value::deserialize(deserializer)?;
        let value: Result<T, serde_json::Error> = serde_json::from_value(json_value.clone());
        match value {
            Ok(response) => Ok(DecodedResponse::Ok(response)),
            Err(error) => serde_json::from_value(json_value)
                .map(DecodedResponse::Err)
                .map_err(|_| serde::de::Error::custom(error)),
        }
    }
}

/// A live feed of game updates. Clones share the same connection.
#[derive(Clone)]
pub struct WsClient {
    #[allow(dead_code)]
    ws:            Arc<tokio::task::JoinHandle<()>>,
    update_sender: broadcast::Sender<ServerUpdateResponse>,
}

impl WsClient {
    async fn run(
        mut ws_stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
        update_sender: broadcast::Sender<ServerUpdateResponse>,
    ) {
        while let Some(message) = ws_stream.next().await {
            let update = match message {
                Ok(Message::Text(text)) => serde_json::from_str::<ServerUpdateResponse>(&text),
                Ok(Message::Binary(binary)) => {
                    serde_json::from_slice::<ServerUpdateResponse>(binary.as_slice())
                }
                Ok(Message::Ping(data)) => {
                    if let Err(e) = ws_stream.send(Message::Pong(data)).await {
                        tracing::warn!(error = ?e, "Failed to answer ping");
                    }
                    continue;
                }
                Ok(Message::Close(_)) => break,
                Ok(Message::Pong(_)) | Ok(Message::Frame(_)) => continue,
                Err(e) => {
                    tracing::warn!(error = ?e, "Websocket error");
                    break;
                }
            };
            match update {
                // Nobody listening is not an error, updates are simply dropped.
                Ok(update) => {
                    let _ = update_sender.send(update);
                }
                Err(e) => tracing::warn!(error = ?e, "Failed to decode update"),
            }
        }
    }

    /// Updates received after this call. Lagging streams yield an error and skip ahead.
    pub fn get_update_stream(&self) -> BroadcastStream<ServerUpdateResponse> {
        BroadcastStream::new(self.update_sender.subscribe())
    }
}

impl Client {
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        match response.json().await {
            Ok(DecodedResponse::Ok(response)) => Ok(response),
            Ok(DecodedResponse::Err(response)) => Err(ClientError::RequestError(response.error)),
            Err(e) => Err(ClientError::DecodeResponseFailed(e)),
        }
    }

    /// Fills the `:name` segments of the route and joins it to the server url.
    fn route_url(
        &self,
        route: &impl Routable,
        path_params: &[(&str, &str)],
    ) -> Result<Url, ClientError> {
        let path = path_params.iter().fold(
            route.properties().full_path,
            |path, (name, value)| path.replace(&format!(":{}", name), value),
        );
        self.http_url
            .join(path.as_str())
            .map_err(|e| ClientError::InvalidHttpUrl(e.to_string()))
    }

    async fn request<B: Serialize>(
        &self,
        route: impl Routable,
        path_params: &[(&str, &str)],
        body: Option<B>,
    ) -> Result<Response, ClientError> {
        let properties = route.properties();
        if self.token.is_none() && properties.access_level != AccessLevel::Public {
            return Err(ClientError::AuthenticationRequired);
        }

        let url = self.route_url(&route, path_params)?;
        let mut request = self.client.request(properties.method, url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }
        request.send().await.map_err(ClientError::RequestFailed)
    }

    async fn send<B: Serialize, R: DeserializeOwned>(
        &self,
        route: impl Routable,
        path_params: &[(&str, &str)],
        body: Option<B>,
    ) -> Result<R, ClientError> {
        let response = self.request(route, path_params, body).await?;
        Client::decode(response).await
    }

    pub fn try_new(config: ClientConfig) -> Result<Self, ClientError> {
        let http_url = Url::parse(config.http_url.as_str())
            .map_err(|e| ClientError::InvalidHttpUrl(e.to_string()))?;
        let ws_url = Url::parse(config.ws_url.as_str())
            .map_err(|e| ClientError::InvalidWsUrl(e.to_string()))?;

        if http_url.scheme() != "http" && http_url.scheme() != "https" {
            return Err(ClientError::InvalidHttpUrl("Invalid scheme".to_string()));
        }

        if ws_url.scheme() != "ws" && ws_url.scheme() != "wss" {
            return Err(ClientError::InvalidWsUrl("Invalid scheme".to_string()));
        }

        Ok(Self {
            http_url,
            ws_url,
            token: config.token,
            client: reqwest::Client::new(),
        })
    }

    pub async fn connect_websocket(&self) -> Result<WsClient, ClientError> {
        let url_string = format!(
            "{}{}",
            self.ws_url.as_str().trim_end_matches('/'),
            ws::Route::Ws.properties().full_path
        );
        let (ws_stream, _) = connect_async(url_string)
            .await
            .map_err(|e| ClientError::WsConnectFailed(e.to_string()))?;

        let (update_sender, _) = broadcast::channel(UPDATE_CHANNEL_SIZE);
        Ok(WsClient {
            ws: Arc::new(tokio::spawn(WsClient::run(
                ws_stream,
                update_sender.clone(),
            ))),
            update_sender,
        })
    }

    /// Logs in and keeps the token for later requests.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Session, ClientError> {
        let session: Session = self
            .send(
                session::Route::PostSession,
                &[],
                Some(Login {
                    username: username.to_string(),
                    password: password.to_string(),
                }),
            )
            .await?;
        self.token = Some(session.token.clone());
        Ok(session)
    }

    pub async fn logout(&mut self) -> Result<(), ClientError> {
        let response = self
            .request(session::Route::DeleteSession, &[], None::<()>)
            .await?;
        if !response.status().is_success() {
            return Client::decode::<()>(response).await;
        }
        self.token = None;
        Ok(())
    }

    pub async fn get_session(&self) -> Result<Session, ClientError> {
        self.send(session::Route::GetSession, &[], None::<()>).await
    }

    pub async fn get_modules(&self) -> Result<Vec<Module>, ClientError> {
        let modules: Modules = self
            .send(module::Route::GetModules, &[], None::<()>)
            .await?;
        Ok(modules.items)
    }

    pub async fn get_module(&self, module_id: &str) -> Result<Module, ClientError> {
        self.send(
            module::Route::GetModule,
            &[("module_id", module_id)],
            None::<()>,
        )
        .await
    }

    pub async fn get_my_team(&self) -> Result<TeamDashboard, ClientError> {
        self.send(team::Route::GetMyTeam, &[], None::<()>).await
    }

    pub async fn get_teams(&self) -> Result<Vec<Team>, ClientError> {
        let teams: Teams = self.send(team::Route::GetTeams, &[], None::<()>).await?;
        Ok(teams.items)
    }

    pub async fn set_score(&self, team_name: &str, score: i64) -> Result<Team, ClientError> {
        self.send(
            team::Route::PutScore,
            &[("team", team_name)],
            Some(UpdateScore { score }),
        )
        .await
    }

    pub async fn place_bid(&self, bid_create: BidCreate) -> Result<BidResult, ClientError> {
        self.send(bid::Route::PostBid, &[], Some(bid_create)).await
    }

    pub async fn get_my_bid(&self) -> Result<Bid, ClientError> {
        self.send(bid::Route::GetMyBid, &[], None::<()>).await
    }

    pub async fn withdraw_bid(&self) -> Result<Bid, ClientError> {
        self.send(bid::Route::DeleteMyBid, &[], None::<()>).await
    }

    pub async fn get_bids(&self) -> Result<Vec<Bid>, ClientError> {
        let bids: Bids = self.send(bid::Route::GetBids, &[], None::<()>).await?;
        Ok(bids.items)
    }

    pub async fn get_current_round(&self) -> Result<RoundStatus, ClientError> {
        self.send(round::Route::GetCurrentRound, &[], None::<()>)
            .await
    }

    pub async fn resolve_round(&self) -> Result<RoundResolution, ClientError> {
        self.send(round::Route::ResolveRound, &[], None::<()>).await
    }

    pub async fn get_round_results(&self) -> Result<Vec<RoundResult>, ClientError> {
        let results: RoundResults = self
            .send(round::Route::GetResults, &[], None::<()>)
            .await?;
        Ok(results.items)
    }

    pub async fn reset_game(&self) -> Result<RoundStatus, ClientError> {
        self.send(GameRoute::ResetGame, &[], None::<()>).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(token: Option<&str>) -> Client {
        Client::try_new(ClientConfig {
            http_url: "http://localhost:9000".to_string(),
            ws_url:   "ws://localhost:9000".to_string(),
            token:    token.map(str::to_string),
        })
        .unwrap()
    }

    #[test]
    fn test_try_new_checks_schemes() {
        let config = |http_url: &str, ws_url: &str| ClientConfig {
            http_url: http_url.to_string(),
            ws_url:   ws_url.to_string(),
            token:    None,
        };
        assert!(matches!(
            Client::try_new(config("ws://localhost:9000", "ws://localhost:9000")),
            Err(ClientError::InvalidHttpUrl(_))
        ));
        assert!(matches!(
            Client::try_new(config("http://localhost:9000", "http://localhost:9000")),
            Err(ClientError::InvalidWsUrl(_))
        ));
        assert!(
            Client::try_new(config("https://auction.example", "wss://auction.example")).is_ok()
        );
    }

    #[test]
    fn test_route_url_fills_path_params() {
        let url = client(None)
            .route_url(&team::Route::PutScore, &[("team", "team2")])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/v1/teams/team2/score");

        let url = client(None).route_url(&bid::Route::PostBid, &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/v1/bids");
    }

    #[tokio::test]
    async fn test_protected_routes_need_a_token() {
        assert!(matches!(
            client(None).get_my_team().await,
            Err(ClientError::AuthenticationRequired)
        ));
    }

    #[test]
    fn test_decode_error_body() {
        let decoded: DecodedResponse<Session> =
            serde_json::from_str(r#"{"error":"A valid access token is required"}"#).unwrap();
        assert!(matches!(
            decoded,
            DecodedResponse::Err(ErrorBodyResponse { error })
                if error == "A valid access token is required"
        ));
    }
}
