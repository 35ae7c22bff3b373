use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    pub async fn get_results(&self) -> Vec<entities::RoundResult> {
        self.in_memory_store.results.read().await.clone()
    }
}
