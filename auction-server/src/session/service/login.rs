use {
    super::Service,
    crate::{
        api::RestError,
        kernel::entities::SessionToken,
        session::entities,
    },
    base64::{
        engine::general_purpose::URL_SAFE_NO_PAD,
        Engine as _,
    },
    rand::Rng,
    time::OffsetDateTime,
};

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

fn generate_token() -> SessionToken {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    URL_SAFE_NO_PAD.encode(bytes)
}

impl Service {
    #[tracing::instrument(skip_all, fields(username = %input.username))]
    pub fn login(&self, input: LoginInput) -> Result<entities::Session, RestError> {
        let user = self
            .repo
            .get_user(&input.username)
            .filter(|user| user.verify_password(&input.password))
            .ok_or_else(|| {
                tracing::info!("Rejected login attempt");
                RestError::Unauthorized
            })?;

        let now = OffsetDateTime::now_utc();
        let session = entities::Session {
            token:         generate_token(),
            username:      user.username.clone(),
            role:          user.role,
            creation_time: now,
            expiry_time:   now + self.config.session_ttl,
        };
        self.repo.add_session(session.clone());
        tracing::info!(role = ?session.role, "User logged in");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::kernel::{
            entities::UserRole,
            test_utils::{
                ADMIN,
                TEAM_1,
            },
        },
    };

    fn login(
        service: &Service,
        username: &str,
        password: &str,
    ) -> Result<entities::Session, RestError> {
        service.login(LoginInput {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    #[test]
    fn test_login_creates_session_with_user_role() {
        let service = Service::new_for_test();
        let session = login(&service, TEAM_1, "t1pass").unwrap();
        assert_eq!(session.username, TEAM_1);
        assert_eq!(session.role, UserRole::Team);
        assert_eq!(
            session.expiry_time - session.creation_time,
            service.config.session_ttl
        );

        let admin = login(&service, ADMIN, "admin123").unwrap();
        assert_eq!(admin.role, UserRole::Admin);
    }

    #[test]
    fn test_every_login_gets_a_new_token() {
        let service = Service::new_for_test();
        let first = login(&service, TEAM_1, "t1pass").unwrap();
        let second = login(&service, TEAM_1, "t1pass").unwrap();
        assert_ne!(first.token, second.token);
        assert_eq!(first.token.len(), 43);
    }

    #[test]
    fn test_wrong_password_and_unknown_user_are_rejected_alike() {
        let service = Service::new_for_test();
        assert!(matches!(
            login(&service, TEAM_1, "wrong"),
            Err(RestError::Unauthorized)
        ));
        assert!(matches!(
            login(&service, "team9", "t1pass"),
            Err(RestError::Unauthorized)
        ));
    }
}
