use {
    super::{
        entities,
        service::set_score::SetScoreInput,
    },
    crate::{
        api::{
            Auth,
            RestError,
            WrappedRouter,
        },
        auction::service::get_team_round_status::GetTeamRoundStatusInput,
        state::Store,
    },
    axum::{
        extract::{
            Path,
            State,
        },
        Json,
        Router,
    },
    axum_extra::extract::WithRejection,
    pipeline_auction_api_types::{
        team::{
            Route,
            Team,
            TeamDashboard,
            TeamParams,
            Teams,
            UpdateScore,
        },
        ErrorBodyResponse,
    },
    std::sync::Arc,
};

impl From<entities::Team> for Team {
    fn from(team: entities::Team) -> Self {
        Self {
            name:     team.name,
            credits:  team.credits,
            pipeline: team.pipeline,
            score:    team.score,
        }
    }
}

/// Fetch the dashboard of the logged in team.
///
/// Returns the credits, pipeline and score of the team together with the open round
/// and the sealed bid the team placed in it.
#[utoipa::path(get, path = "/v1/teams/me",
security(
    ("bearerAuth" = []),
), responses(
    (status = 200, description = "The dashboard of the logged in team", body = TeamDashboard),
    (status = 401, response = ErrorBodyResponse),
    (status = 403, response = ErrorBodyResponse),
),)]
pub async fn get_my_team(
    auth: Auth,
    State(store): State<Arc<Store>>,
) -> Result<Json<TeamDashboard>, RestError> {
    let session = auth.session()?;
    let status = store
        .auction_service
        .get_team_round_status(GetTeamRoundStatusInput {
            team: session.username,
        })
        .await?;
    Ok(Json(TeamDashboard {
        team:          status.team.into(),
        current_round: status.round,
        current_bid:   status.bid.map(|bid| bid.into()),
    }))
}

/// Fetch every team.
///
/// Returns the credits, pipeline and score of all teams ordered by name.
#[utoipa::path(get, path = "/v1/teams",
security(
    ("bearerAuth" = []),
), responses(
    (status = 200, description = "All teams", body = Teams),
    (status = 401, response = ErrorBodyResponse),
    (status = 403, response = ErrorBodyResponse),
),)]
pub async fn get_teams(State(store): State<Arc<Store>>) -> Json<Teams> {
    Json(Teams {
        items: store
            .team_service
            .get_teams()
            .await
            .into_iter()
            .map(Team::from)
            .collect(),
    })
}

/// Record the score of a team.
#[utoipa::path(put, path = "/v1/teams/{team}/score",
security(
    ("bearerAuth" = []),
), params(TeamParams), request_body = UpdateScore, responses(
    (status = 200, description = "The updated team", body = Team),
    (status = 400, response = ErrorBodyResponse),
    (status = 404, description = "Team was not found", body = ErrorBodyResponse),
),)]
pub async fn put_team_score(
    State(store): State<Arc<Store>>,
    WithRejection(Path(params), _): WithRejection<Path<TeamParams>, RestError>,
    WithRejection(Json(update), _): WithRejection<Json<UpdateScore>, RestError>,
) -> Result<Json<Team>, RestError> {
    let team = store
        .team_service
        .set_score(SetScoreInput {
            team:  params.team,
            score: update.score,
        })
        .await?;
    Ok(Json(team.into()))
}

pub fn get_routes(store: Arc<Store>) -> Router<Arc<Store>> {
    WrappedRouter::new(store)
        .route(Route::GetMyTeam, get_my_team)
        .route(Route::GetTeams, get_teams)
        .route(Route::PutScore, put_team_score)
        .router
}
