use {
    super::Repository,
    crate::session::entities,
};

impl Repository {
    pub fn get_user(&self, username: &str) -> Option<&entities::User> {
        self.in_memory_store.users.get(username)
    }
}
