use {
    super::Service,
    crate::session::entities,
};

impl Service {
    pub fn logout(&self, session: &entities::Session) {
        if self.repo.remove_session(&session.token).is_some() {
            tracing::info!(username = session.username, "User logged out");
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            api::RestError,
            kernel::test_utils::TEAM_2,
            session::service::login::LoginInput,
        },
    };

    #[test]
    fn test_logout_revokes_token() {
        let service = Service::new_for_test();
        let session = service
            .login(LoginInput {
                username: TEAM_2.to_string(),
                password: "t2pass".to_string(),
            })
            .unwrap();
        service.logout(&session);
        assert!(matches!(
            service.get_session(&session.token),
            Err(RestError::Unauthorized)
        ));
        // Revoking twice is a no-op.
        service.logout(&session);
    }
}
