use {
    anyhow::{
        anyhow,
        Result,
    },
    clap::Parser,
    pipeline_auction_client::{
        Client,
        ClientConfig,
    },
    pipeline_auction_simple_bidder::SimpleBidder,
};

#[derive(Parser, Clone, Debug)]
pub struct RunOptions {
    /// The http url of the auction server.
    #[arg(long = "server-url")]
    #[arg(env = "SERVER_URL")]
    #[arg(default_value = "http://127.0.0.1:9000")]
    pub server_url: String,

    /// The websocket url of the auction server.
    #[arg(long = "ws-url")]
    #[arg(env = "WS_URL")]
    #[arg(default_value = "ws://127.0.0.1:9000")]
    pub ws_url: String,

    /// The team to bid for.
    #[arg(long = "username")]
    #[arg(env = "BIDDER_USERNAME")]
    pub username: String,

    /// The password of the team.
    #[arg(long = "password")]
    #[arg(env = "BIDDER_PASSWORD")]
    pub password: String,

    /// The largest share of the remaining credits offered in a single bid.
    #[arg(long = "max-bid-fraction")]
    #[arg(env = "MAX_BID_FRACTION")]
    #[arg(default_value_t = 0.5)]
    pub max_bid_fraction: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().compact().init();

    let args = RunOptions::parse();
    let client = Client::try_new(ClientConfig {
        http_url: args.server_url.clone(),
        ws_url:   args.ws_url.clone(),
        token:    None,
    })
    .map_err(|e| {
        tracing::error!(error = ?e, "Failed to create client");
        anyhow!("Failed to create client")
    })?;

    let mut simple_bidder =
        SimpleBidder::try_new(client, &args.username, &args.password, args.max_bid_fraction)
            .await?;
    simple_bidder.run().await
}
