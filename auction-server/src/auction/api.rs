use {
    super::{
        entities,
        service::{
            get_bid::GetBidInput,
            handle_bid::HandleBidInput,
            withdraw_bid::WithdrawBidInput,
        },
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
        Json,
        Router,
    },
    axum_extra::extract::WithRejection,
    pipeline_auction_api_types::{
        bid::{
            self,
            Bid,
            BidCreate,
            BidResult,
            Bids,
        },
        round::{
            self,
            GameRoute,
            RoundOutcome,
            RoundResolution,
            RoundResult,
            RoundResults,
            RoundStatus,
        },
        ErrorBodyResponse,
    },
    std::sync::Arc,
};

impl From<entities::Bid> for Bid {
    fn from(bid: entities::Bid) -> Self {
        Self {
            id:              bid.id,
            team:            bid.team,
            module:          bid.module,
            amount:          bid.amount,
            round:           bid.round,
            submission_time: bid.submission_time,
        }
    }
}

impl From<entities::RoundOutcome> for RoundOutcome {
    fn from(outcome: entities::RoundOutcome) -> Self {
        match outcome {
            entities::RoundOutcome::Won {
                team,
                module,
                amount,
            } => RoundOutcome::Won {
                team,
                module,
                amount,
            },
            entities::RoundOutcome::NoBids => RoundOutcome::NoBids,
        }
    }
}

impl From<entities::RoundResult> for RoundResult {
    fn from(result: entities::RoundResult) -> Self {
        Self {
            round:           result.round,
            outcome:         result.outcome.into(),
            resolution_time: result.resolution_time,
        }
    }
}

impl From<entities::RoundStatus> for RoundStatus {
    fn from(status: entities::RoundStatus) -> Self {
        Self {
            round:     status.round,
            bid_count: status.bid_count,
        }
    }
}

/// Place a sealed bid on a module in the current round.
///
/// A team holds a single bid per round. Bidding again replaces the earlier bid.
/// The amount has to reach the minimum bid of the module and stay within the credits of the team.
#[utoipa::path(post, path = "/v1/bids",
security(
    ("bearerAuth" = []),
), request_body = BidCreate, responses(
    (status = 200, description = "Bid was placed", body = BidResult),
    (status = 400, response = ErrorBodyResponse),
    (status = 401, response = ErrorBodyResponse),
    (status = 403, response = ErrorBodyResponse),
    (status = 404, description = "Module was not found", body = ErrorBodyResponse),
),)]
pub async fn post_bid(
    auth: Auth,
    State(store): State<Arc<Store>>,
    WithRejection(Json(bid_create), _): WithRejection<Json<BidCreate>, RestError>,
) -> Result<Json<BidResult>, RestError> {
    let session = auth.session()?;
    let bid = store
        .auction_service
        .handle_bid(HandleBidInput {
            bid_create: entities::BidCreate {
                team:   session.username,
                module: bid_create.module,
                amount: bid_create.amount,
            },
        })
        .await?;
    Ok(Json(BidResult {
        status: "OK".to_string(),
        id:     bid.id,
    }))
}

/// Fetch the sealed bid of the logged in team in the current round.
#[utoipa::path(get, path = "/v1/bids/me",
security(
    ("bearerAuth" = []),
), responses(
    (status = 200, description = "The bid of the team", body = Bid),
    (status = 401, response = ErrorBodyResponse),
    (status = 404, description = "The team has not bid in this round", body = ErrorBodyResponse),
),)]
pub async fn get_my_bid(
    auth: Auth,
    State(store): State<Arc<Store>>,
) -> Result<Json<Bid>, RestError> {
    let session = auth.session()?;
    let bid = store
        .auction_service
        .get_bid(GetBidInput {
            team: session.username,
        })
        .await
        .ok_or(RestError::BidNotFound)?;
    Ok(Json(bid.into()))
}

/// Withdraw the sealed bid of the logged in team from the current round.
#[utoipa::path(delete, path = "/v1/bids/me",
security(
    ("bearerAuth" = []),
), responses(
    (status = 200, description = "The withdrawn bid", body = Bid),
    (status = 401, response = ErrorBodyResponse),
    (status = 404, description = "The team has not bid in this round", body = ErrorBodyResponse),
),)]
pub async fn delete_my_bid(
    auth: Auth,
    State(store): State<Arc<Store>>,
) -> Result<Json<Bid>, RestError> {
    let session = auth.session()?;
    let bid = store
        .auction_service
        .withdraw_bid(WithdrawBidInput {
            team: session.username,
        })
        .await?;
    Ok(Json(bid.into()))
}

/// Fetch every sealed bid of the current round in submission order.
#[utoipa::path(get, path = "/v1/bids",
security(
    ("bearerAuth" = []),
), responses(
    (status = 200, description = "Bids of the current round", body = Bids),
    (status = 401, response = ErrorBodyResponse),
    (status = 403, response = ErrorBodyResponse),
),)]
pub async fn get_bids(State(store): State<Arc<Store>>) -> Json<Bids> {
    Json(Bids {
        items: store
            .auction_service
            .get_bids()
            .await
            .into_iter()
            .map(Bid::from)
            .collect(),
    })
}

/// Fetch the round open for bidding.
#[utoipa::path(get, path = "/v1/rounds/current", responses(
    (status = 200, description = "The current round", body = RoundStatus),
),)]
pub async fn get_current_round(State(store): State<Arc<Store>>) -> Json<RoundStatus> {
    Json(store.auction_service.get_round_status().await.into())
}

/// Resolve the current round.
///
/// The highest bid wins and its team pays the amount of the bid.
/// Equal bids go to the team which bid first.
/// If nobody bid, the outcome is `no_bids` and the round stays open.
#[utoipa::path(post, path = "/v1/rounds/current/resolve",
security(
    ("bearerAuth" = []),
), responses(
    (status = 200, description = "The result of the round", body = RoundResolution),
    (status = 401, response = ErrorBodyResponse),
    (status = 403, response = ErrorBodyResponse),
),)]
pub async fn post_resolve_round(
    State(store): State<Arc<Store>>,
) -> Result<Json<RoundResolution>, RestError> {
    let resolution = store.auction_service.resolve_round().await?;
    Ok(Json(RoundResolution {
        result:        resolution.result.into(),
        current_round: resolution.current_round,
    }))
}

/// Fetch the results of every round won so far, oldest first.
#[utoipa::path(get, path = "/v1/rounds", responses(
    (status = 200, description = "Results of past rounds", body = RoundResults),
),)]
pub async fn get_round_results(State(store): State<Arc<Store>>) -> Json<RoundResults> {
    Json(RoundResults {
        items: store
            .auction_service
            .get_results()
            .await
            .into_iter()
            .map(RoundResult::from)
            .collect(),
    })
}

/// Start the game over.
///
/// Every team gets its initial credits back with an empty pipeline,
/// and bidding restarts at the first round.
#[utoipa::path(post, path = "/v1/game/reset",
security(
    ("bearerAuth" = []),
), responses(
    (status = 200, description = "The game was reset", body = RoundStatus),
    (status = 401, response = ErrorBodyResponse),
    (status = 403, response = ErrorBodyResponse),
),)]
pub async fn post_reset_game(State(store): State<Arc<Store>>) -> Json<RoundStatus> {
    let round = store.auction_service.reset_game().await;
    Json(RoundStatus {
        round,
        bid_count: 0,
    })
}

pub fn get_routes(store: Arc<Store>) -> Router<Arc<Store>> {
    WrappedRouter::new(store)
        .route(bid::Route::PostBid, post_bid)
        .route(bid::Route::GetBids, get_bids)
        .route(bid::Route::GetMyBid, get_my_bid)
        .route(bid::Route::DeleteMyBid, delete_my_bid)
        .route(round::Route::GetCurrentRound, get_current_round)
        .route(round::Route::ResolveRound, post_resolve_round)
        .route(round::Route::GetResults, get_round_results)
        .route(GameRoute::ResetGame, post_reset_game)
        .router
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        time::macros::datetime,
    };

    #[test]
    fn test_no_bids_outcome_serializes_as_tag() {
        let result: RoundResult = entities::RoundResult {
            round:           4,
            outcome:         entities::RoundOutcome::NoBids,
            resolution_time: datetime!(2024-05-23 21:26:57 UTC),
        }
        .into();
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["round"], 4);
        assert_eq!(json["outcome"]["type"], "no_bids");
    }
}
