use {
    super::Service,
    crate::{
        api::RestError,
        kernel::entities::TeamName,
        team::entities,
    },
};

pub struct SetScoreInput {
    pub team:  TeamName,
    pub score: i64,
}

impl Service {
    #[tracing::instrument(skip_all, fields(team = %input.team, score = input.score))]
    pub async fn set_score(&self, input: SetScoreInput) -> Result<entities::Team, RestError> {
        let team = self
            .repo
            .update_team(&input.team, |team| team.score = input.score)
            .await
            .ok_or(RestError::TeamNotFound)?;
        tracing::info!("Score recorded");
        Ok(team)
    }
}
