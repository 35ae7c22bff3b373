use {
    anyhow::{
        anyhow,
        Result,
    },
    pipeline_auction_client::{
        api_types::{
            bid::BidCreate,
            module::Module,
            team::Team,
            ws::ServerUpdateResponse,
        },
        Client,
        WsClient,
    },
    rand::{
        seq::SliceRandom,
        Rng,
    },
    tokio_stream::StreamExt,
};

/// The most a bidder offers for a module. None if the bid cannot reach the minimum.
pub fn credit_cap(credits: u64, max_bid_fraction: f64) -> Option<u64> {
    let cap = ((credits as f64) * max_bid_fraction).floor() as u64;
    Some(cap.min(credits)).filter(|cap| *cap > 0)
}

/// Modules the team can still buy, with the highest amount it is willing to pay for each.
pub fn biddable_modules<'a>(
    modules: &'a [Module],
    team: &Team,
    max_bid_fraction: f64,
) -> Vec<(&'a Module, u64)> {
    let Some(cap) = credit_cap(team.credits, max_bid_fraction) else {
        return Vec::new();
    };
    modules
        .iter()
        .filter(|module| !team.pipeline.contains(&module.id))
        .filter(|module| module.min_bid <= cap)
        .map(|module| (module, cap))
        .collect()
}

pub struct SimpleBidder {
    client:           Client,
    ws_client:        WsClient,
    max_bid_fraction: f64,
}

impl SimpleBidder {
    pub async fn try_new(
        mut client: Client,
        username: &str,
        password: &str,
        max_bid_fraction: f64,
    ) -> Result<Self> {
        if !(max_bid_fraction > 0.0 && max_bid_fraction <= 1.0) {
            return Err(anyhow!("Max bid fraction must be in (0, 1]"));
        }
        let session = client.login(username, password).await.map_err(|e| {
            tracing::error!(error = ?e, "Failed to log in");
            anyhow!("Failed to log in as {}", username)
        })?;
        tracing::info!(username = session.username, role = ?session.role, "Logged in");

        let ws_client = client.connect_websocket().await.map_err(|e| {
            tracing::error!(error = ?e, "Failed to connect websocket");
            anyhow!("Failed to connect websocket")
        })?;

        Ok(Self {
            client,
            ws_client,
            max_bid_fraction,
        })
    }

    /// Places one sealed bid in the current round. Returns false if nothing is left to buy.
    async fn bid_in_current_round(&self) -> Result<bool> {
        let dashboard = self
            .client
            .get_my_team()
            .await
            .map_err(|e| anyhow!("Failed to fetch team: {}", e))?;
        let modules = self
            .client
            .get_modules()
            .await
            .map_err(|e| anyhow!("Failed to fetch modules: {}", e))?;

        let candidates = biddable_modules(&modules, &dashboard.team, self.max_bid_fraction);
        let Some((module, cap)) = candidates.choose(&mut rand::thread_rng()) else {
            tracing::info!(credits = dashboard.team.credits, "Nothing left to bid on");
            return Ok(false);
        };
        let amount = rand::thread_rng().gen_range(module.min_bid..=*cap);

        match self
            .client
            .place_bid(BidCreate {
                module: module.id.clone(),
                amount,
            })
            .await
        {
            Ok(result) => tracing::info!(
                round = dashboard.current_round,
                module = module.id,
                amount,
                bid_id = %result.id,
                "Bid placed"
            ),
            Err(e) => tracing::warn!(error = %e, module = module.id, amount, "Bid rejected"),
        }
        Ok(true)
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stream = self.ws_client.get_update_stream();
        let mut bidding = self.bid_in_current_round().await?;

        while let Some(update) = stream.next().await {
            let update = match update {
                Ok(update) => update,
                Err(e) => {
                    tracing::warn!(error = ?e, "The stream has fallen behind");
                    continue;
                }
            };

            match update {
                ServerUpdateResponse::RoundResolved { result } => {
                    tracing::info!(
                        round = result.round,
                        outcome = ?result.outcome,
                        "Round resolved"
                    );
                    if bidding {
                        bidding = self.bid_in_current_round().await?;
                    }
                }
                ServerUpdateResponse::GameReset { round } => {
                    tracing::info!(round, "Game reset");
                    bidding = self.bid_in_current_round().await?;
                }
            }
        }

        tracing::info!("Websocket closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        pipeline_auction_client::api_types::module::Stage,
    };

    fn module(id: &str, min_bid: u64) -> Module {
        Module {
            id: id.to_string(),
            name: id.to_string(),
            stage: Stage::Preprocessing,
            description: String::new(),
            min_bid,
        }
    }

    fn team(credits: u64, pipeline: &[&str]) -> Team {
        Team {
            name: "team1".to_string(),
            credits,
            pipeline: pipeline.iter().map(|id| id.to_string()).collect(),
            score: 0,
        }
    }

    #[test]
    fn test_credit_cap() {
        assert_eq!(credit_cap(100, 0.5), Some(50));
        assert_eq!(credit_cap(7, 1.0), Some(7));
        assert_eq!(credit_cap(1, 0.5), None);
        assert_eq!(credit_cap(0, 1.0), None);
    }

    #[test]
    fn test_biddable_modules_skip_owned_and_unaffordable() {
        let modules = vec![
            module("grayscale", 1),
            module("gaussian_blur", 5),
            module("edge_detection", 30),
        ];
        let candidates = biddable_modules(&modules, &team(40, &["grayscale"]), 0.5);
        let ids: Vec<_> = candidates
            .iter()
            .map(|(module, cap)| (module.id.as_str(), *cap))
            .collect();
        assert_eq!(ids, vec![("gaussian_blur", 20)]);

        assert!(biddable_modules(&modules, &team(0, &[]), 1.0).is_empty());
    }
}
