use {
    super::Repository,
    crate::{
        kernel::entities::Credits,
        team::entities,
    },
};

impl Repository {
    pub async fn reset_teams(&self, initial_credits: Credits) {
        let mut teams = self.in_memory_store.teams.write().await;
        for team in teams.values_mut() {
            *team = entities::Team::new(team.name.clone(), initial_credits);
        }
    }
}
