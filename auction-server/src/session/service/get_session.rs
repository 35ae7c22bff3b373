use {
    super::Service,
    crate::{
        api::RestError,
        session::entities,
    },
    time::OffsetDateTime,
};

impl Service {
    pub fn get_session(&self, token: &str) -> Result<entities::Session, RestError> {
        let session = self.repo.get_session(token).ok_or(RestError::Unauthorized)?;
        if session.is_expired(OffsetDateTime::now_utc()) {
            self.repo.remove_session(token);
            return Err(RestError::Unauthorized);
        }
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            kernel::{
                entities::UserRole,
                test_utils::TEAM_1,
            },
            session::service::login::LoginInput,
        },
        time::Duration,
    };

    #[test]
    fn test_get_session_by_token() {
        let service = Service::new_for_test();
        let session = service
            .login(LoginInput {
                username: TEAM_1.to_string(),
                password: "t1pass".to_string(),
            })
            .unwrap();
        assert_eq!(service.get_session(&session.token).unwrap(), session);
        assert!(matches!(
            service.get_session("unknown"),
            Err(RestError::Unauthorized)
        ));
    }

    #[test]
    fn test_expired_session_is_dropped_on_lookup() {
        let service = Service::new_for_test();
        let now = OffsetDateTime::now_utc();
        service.repo.add_session(entities::Session {
            token:         "stale".to_string(),
            username:      TEAM_1.to_string(),
            role:          UserRole::Team,
            creation_time: now - Duration::hours(2),
            expiry_time:   now - Duration::hours(1),
        });
        assert!(matches!(
            service.get_session("stale"),
            Err(RestError::Unauthorized)
        ));
        assert!(service.repo.get_session("stale").is_none());
    }
}
