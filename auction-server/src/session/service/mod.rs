use {
    super::{
        entities,
        repository::Repository,
    },
    std::{
        sync::Arc,
        time::Duration,
    },
};

pub mod get_session;
pub mod login;
pub mod logout;
pub mod remove_expired_sessions;

pub struct Config {
    pub session_ttl: Duration,
}

pub struct ServiceInner {
    config: Config,
    repo:   Arc<Repository>,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);
impl std::ops::Deref for Service {
    type Target = ServiceInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    pub fn new(users: Vec<entities::User>, config: Config) -> Self {
        Self(Arc::new(ServiceInner {
            config,
            repo: Arc::new(Repository::new(users)),
        }))
    }
}

#[cfg(test)]
pub mod tests {
    use {
        super::*,
        crate::kernel::test_utils::default_config,
    };

    impl Service {
        pub fn new_for_test() -> Self {
            let config = default_config();
            Service::new(
                config.users.into_iter().map(entities::User::from).collect(),
                Config {
                    session_ttl: config.game.session_ttl,
                },
            )
        }
    }
}
