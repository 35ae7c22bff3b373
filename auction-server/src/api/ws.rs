use {
    super::{
        Auth,
        RestError,
        WrappedRouter,
    },
    crate::{
        kernel::entities::RoundNumber,
        server::{
            EXIT_CHECK_INTERVAL,
            SHOULD_EXIT,
        },
        state::Store,
    },
    anyhow::{
        anyhow,
        Result,
    },
    axum::{
        extract::{
            ws::{
                Message,
                WebSocket,
            },
            State,
            WebSocketUpgrade,
        },
        http::HeaderMap,
        response::IntoResponse,
        Router,
    },
    futures::{
        stream::{
            SplitSink,
            SplitStream,
        },
        SinkExt,
        StreamExt,
    },
    pipeline_auction_api_types::{
        round::RoundResult,
        ws::{
            Route,
            ServerUpdateResponse,
        },
    },
    std::{
        collections::{
            HashMap,
            HashSet,
        },
        net::IpAddr,
        sync::{
            atomic::{
                AtomicUsize,
                Ordering,
            },
            Arc,
        },
        time::Duration,
    },
    tokio::sync::{
        broadcast,
        RwLock,
    },
    tracing::instrument,
};

pub struct WsState {
    pub requester_ip_header_name: String,
    subscriber_counter:           AtomicUsize,
    subscriber_per_ip:            RwLock<HashMap<IpAddr, HashSet<SubscriberId>>>,
    pub broadcast_sender:         broadcast::Sender<UpdateEvent>,
    pub broadcast_receiver:       broadcast::Receiver<UpdateEvent>,
}

const MAXIMUM_SUBSCRIBERS_PER_IP: usize = 10;

impl WsState {
    pub fn new(requester_ip_header_name: String, broadcast_channel_size: usize) -> Self {
        let (broadcast_sender, broadcast_receiver) = broadcast::channel(broadcast_channel_size);
        Self {
            requester_ip_header_name,
            subscriber_counter: AtomicUsize::new(0),
            subscriber_per_ip: RwLock::new(HashMap::new()),
            broadcast_sender,
            broadcast_receiver,
        }
    }

    /// Returns None if the ip already holds the maximum number of open connections.
    pub async fn get_new_subscriber_id(&self, ip: Option<IpAddr>) -> Option<SubscriberId> {
        let id = self.subscriber_counter.fetch_add(1, Ordering::SeqCst);
        if let Some(ip) = ip {
            let mut write_guard = self.subscriber_per_ip.write().await;
            let ids = write_guard.entry(ip).or_default();
            if ids.len() >= MAXIMUM_SUBSCRIBERS_PER_IP {
                return None;
            }
            ids.insert(id);
        }
        Some(id)
    }

    pub async fn remove_subscriber(&self, id: SubscriberId, ip: Option<IpAddr>) {
        if let Some(ip) = ip {
            let mut write_guard = self.subscriber_per_ip.write().await;
            if let Some(ids) = write_guard.get_mut(&ip) {
                ids.remove(&id);
                if ids.is_empty() {
                    write_guard.remove(&ip);
                }
            }
        }
    }
}

fn get_requester_ip(headers: &HeaderMap, header_name: &str) -> Option<IpAddr> {
    headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next()) // Only take the first ip if there are multiple
        .and_then(|value| value.trim().parse().ok())
}

pub async fn ws_route_handler(
    auth: Auth,
    ws: WebSocketUpgrade,
    State(store): State<Arc<Store>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let ws_state = &store.ws;
    let requester_ip = get_requester_ip(&headers, &ws_state.requester_ip_header_name);
    if requester_ip.is_none() {
        tracing::warn!("Failed to get requester IP address");
    }

    match ws_state.get_new_subscriber_id(requester_ip).await {
        Some(subscriber_id) => ws.on_upgrade(move |socket| {
            websocket_handler(socket, store, subscriber_id, auth, requester_ip)
        }),
        None => RestError::TooManyOpenWebsocketConnections.into_response(),
    }
}

async fn websocket_handler(
    stream: WebSocket,
    store: Arc<Store>,
    subscriber_id: SubscriberId,
    auth: Auth,
    requester_ip: Option<IpAddr>,
) {
    let (sender, receiver) = stream.split();
    let new_receiver = store.ws.broadcast_receiver.resubscribe();
    let mut subscriber = Subscriber::new(
        subscriber_id,
        store.clone(),
        new_receiver,
        receiver,
        sender,
        auth,
    );
    subscriber.run().await;
    store
        .ws
        .remove_subscriber(subscriber_id, requester_ip)
        .await;
}

#[derive(Clone, PartialEq, Debug)]
pub enum UpdateEvent {
    RoundResolved(RoundResult),
    GameReset(RoundNumber),
}

impl From<UpdateEvent> for ServerUpdateResponse {
    fn from(event: UpdateEvent) -> Self {
        match event {
            UpdateEvent::RoundResolved(result) => ServerUpdateResponse::RoundResolved { result },
            UpdateEvent::GameReset(round) => ServerUpdateResponse::GameReset { round },
        }
    }
}

pub type SubscriberId = usize;

/// Subscriber is an actor that handles a single websocket connection.
/// It forwards every game update to the client until either side closes.
pub struct Subscriber {
    id:                  SubscriberId,
    closed:              bool,
    store:               Arc<Store>,
    notify_receiver:     broadcast::Receiver<UpdateEvent>,
    receiver:            SplitStream<WebSocket>,
    sender:              SplitSink<WebSocket, Message>,
    ping_interval:       tokio::time::Interval,
    exit_check_interval: tokio::time::Interval,
    responded_to_ping:   bool,
    auth:                Auth,
}

const PING_INTERVAL_DURATION: Duration = Duration::from_secs(30);

impl Subscriber {
    pub fn new(
        id: SubscriberId,
        store: Arc<Store>,
        notify_receiver: broadcast::Receiver<UpdateEvent>,
        receiver: SplitStream<WebSocket>,
        sender: SplitSink<WebSocket, Message>,
        auth: Auth,
    ) -> Self {
        Self {
            id,
            closed: false,
            store,
            notify_receiver,
            receiver,
            sender,
            ping_interval: tokio::time::interval(PING_INTERVAL_DURATION),
            exit_check_interval: tokio::time::interval(EXIT_CHECK_INTERVAL),
            responded_to_ping: true, // Start with true so the first tick does not close the connection
            auth,
        }
    }

    pub async fn run(&mut self) {
        while !self.closed {
            if let Err(e) = self.handle_next().await {
                tracing::debug!(
                    subscriber = self.id,
                    error = ?e,
                    "Error Handling Subscriber Message."
                );
                break;
            }
        }
    }

    async fn handle_next(&mut self) -> Result<()> {
        tokio::select! {
            maybe_update_event = self.notify_receiver.recv() => {
                match maybe_update_event {
                    Ok(event) => self.handle_update(event).await,
                    Err(e) => Err(anyhow!("Error receiving update event: {:?}", e)),
                }
            },
            maybe_message_or_err = self.receiver.next() => {
                self.handle_client_message(
                    maybe_message_or_err.ok_or(anyhow!("Client channel is closed"))??
                ).await
            },
            _  = self.ping_interval.tick() => {
                if let Auth::Authorized(token, _) = &self.auth {
                    if self.store.session_service.get_session(token).is_err() {
                        return Err(anyhow!("Session expired. Closing connection."));
                    }
                }
                if !self.responded_to_ping {
                    return Err(anyhow!("Subscriber did not respond to ping. Closing connection."));
                }
                self.responded_to_ping = false;
                self.sender.send(Message::Ping(vec![])).await?;
                Ok(())
            },
            _ = self.exit_check_interval.tick() => {
                if SHOULD_EXIT.load(Ordering::Acquire) {
                    self.sender.close().await?;
                    self.closed = true;
                    return Err(anyhow!("Application is shutting down. Closing connection."));
                }
                Ok(())
            }
        }
    }

    #[instrument(
        target = "metrics",
        fields(category = "ws_update", result = "success", name),
        skip_all
    )]
    async fn handle_update(&mut self, event: UpdateEvent) -> Result<()> {
        let name = match event {
            UpdateEvent::RoundResolved(_) => "round_resolved",
            UpdateEvent::GameReset(_) => "game_reset",
        };
        tracing::Span::current().record("name", name);
        let message = serde_json::to_string(&ServerUpdateResponse::from(event))?;
        let result = self.sender.send(message.into()).await;
        if result.is_err() {
            tracing::Span::current().record("result", "error");
        }
        Ok(result?)
    }

    #[instrument(
        target = "metrics",
        fields(category = "ws_client_message", result = "success", name),
        skip_all
    )]
    async fn handle_client_message(&mut self, message: Message) -> Result<()> {
        match message {
            Message::Close(_) => {
                // Reply with a close frame so the client sees a clean shutdown.
                tracing::Span::current().record("name", "close");
                if let Err(e) = self.sender.close().await {
                    tracing::Span::current().record("result", "error");
                    return Err(e.into());
                }
                self.closed = true;
            }
            Message::Pong(_) => {
                tracing::Span::current().record("name", "pong");
                self.responded_to_ping = true;
            }
            // Axum answers pings on its own. The feed takes no requests.
            Message::Ping(_) => {
                tracing::Span::current().record("name", "ping");
            }
            Message::Text(_) | Message::Binary(_) => {
                tracing::Span::current().record("name", "ignored");
            }
        }
        Ok(())
    }
}

pub fn get_routes(store: Arc<Store>) -> Router<Arc<Store>> {
    WrappedRouter::new(store)
        .route(Route::Ws, ws_route_handler)
        .router
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        axum::http::HeaderValue,
    };

    #[tokio::test]
    async fn test_subscribers_per_ip_are_limited() {
        let state = WsState::new("X-Forwarded-For".to_string(), 8);
        let ip: IpAddr = "10.0.0.1".parse().unwrap();
        let mut ids = Vec::new();
        for _ in 0..MAXIMUM_SUBSCRIBERS_PER_IP {
            ids.push(state.get_new_subscriber_id(Some(ip)).await.unwrap());
        }
        assert!(state.get_new_subscriber_id(Some(ip)).await.is_none());
        // Other ips and unknown ips are not affected.
        assert!(state
            .get_new_subscriber_id(Some("10.0.0.2".parse().unwrap()))
            .await
            .is_some());
        assert!(state.get_new_subscriber_id(None).await.is_some());

        state.remove_subscriber(ids[0], Some(ip)).await;
        assert!(state.get_new_subscriber_id(Some(ip)).await.is_some());
    }

    #[test]
    fn test_requester_ip_takes_first_forwarded_address() {
        let mut headers = HeaderMap::new();
        assert_eq!(get_requester_ip(&headers, "X-Forwarded-For"), None);
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        assert_eq!(
            get_requester_ip(&headers, "X-Forwarded-For"),
            Some("203.0.113.7".parse().unwrap())
        );
    }

    #[test]
    fn test_update_event_maps_to_server_update() {
        assert_eq!(
            ServerUpdateResponse::from(UpdateEvent::GameReset(1)),
            ServerUpdateResponse::GameReset { round: 1 }
        );
    }
}
