use {
    super::Repository,
    crate::team::entities,
};

impl Repository {
    pub async fn get_team(&self, name: &str) -> Option<entities::Team> {
        self.in_memory_store.teams.read().await.get(name).cloned()
    }
}
