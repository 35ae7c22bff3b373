use {
    super::Repository,
    crate::team::entities,
};

impl Repository {
    /// Applies `update` to the stored team and returns the updated copy.
    /// Returns None if the team does not exist.
    pub async fn update_team<F>(&self, name: &str, update: F) -> Option<entities::Team>
    where
        F: FnOnce(&mut entities::Team),
    {
        let mut teams = self.in_memory_store.teams.write().await;
        let team = teams.get_mut(name)?;
        update(team);
        Some(team.clone())
    }
}
