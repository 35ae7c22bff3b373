use {
    super::Service,
    crate::auction::entities,
};

impl Service {
    /// The results of every round resolved with a winner, oldest first.
    pub async fn get_results(&self) -> Vec<entities::RoundResult> {
        self.repo.get_results().await
    }
}
