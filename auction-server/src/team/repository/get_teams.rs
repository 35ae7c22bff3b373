use {
    super::Repository,
    crate::team::entities,
};

impl Repository {
    /// Returns every team ordered by name.
    pub async fn get_teams(&self) -> Vec<entities::Team> {
        self.in_memory_store
            .teams
            .read()
            .await
            .values()
            .cloned()
            .collect()
    }
}
