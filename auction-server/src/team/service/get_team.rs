use {
    super::Service,
    crate::{
        api::RestError,
        kernel::entities::TeamName,
        team::entities,
    },
};

#[derive(Clone, Debug)]
pub struct GetTeamInput {
    pub team: TeamName,
}

impl Service {
    pub async fn get_team(&self, input: GetTeamInput) -> Result<entities::Team, RestError> {
        self.repo
            .get_team(&input.team)
            .await
            .ok_or(RestError::TeamNotFound)
    }
}
