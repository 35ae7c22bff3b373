use {
    crate::{
        config::UserConfig,
        kernel::entities::{
            SessionToken,
            UserRole,
            Username,
        },
    },
    sha2::{
        Digest,
        Sha256,
    },
    time::OffsetDateTime,
};

pub type PasswordHash = [u8; 32];

pub fn hash_password(password: &str) -> PasswordHash {
    let mut hash = PasswordHash::default();
    hash.copy_from_slice(&Sha256::digest(password.as_bytes()));
    hash
}

#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub username:      Username,
    pub password_hash: PasswordHash,
    pub role:          UserRole,
}

impl User {
    pub fn verify_password(&self, password: &str) -> bool {
        self.password_hash == hash_password(password)
    }
}

impl From<UserConfig> for User {
    fn from(user: UserConfig) -> Self {
        Self {
            password_hash: hash_password(&user.password),
            username:      user.username,
            role:          user.role,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token:         SessionToken,
    pub username:      Username,
    pub role:          UserRole,
    pub creation_time: OffsetDateTime,
    pub expiry_time:   OffsetDateTime,
}

impl Session {
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now >= self.expiry_time
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_team(&self) -> bool {
        self.role == UserRole::Team
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        time::Duration,
    };

    #[test]
    fn test_password_is_stored_hashed() {
        let user: User = UserConfig {
            username: "team1".to_string(),
            password: "t1pass".to_string(),
            role:     UserRole::Team,
        }
        .into();
        assert_ne!(user.password_hash.as_slice(), "t1pass".as_bytes());
        assert!(user.verify_password("t1pass"));
        assert!(!user.verify_password("t1pass "));
        assert!(!user.verify_password(""));
    }

    #[test]
    fn test_session_expiry_is_inclusive() {
        let now = OffsetDateTime::now_utc();
        let session = Session {
            token:         "token".to_string(),
            username:      "team1".to_string(),
            role:          UserRole::Team,
            creation_time: now - Duration::hours(1),
            expiry_time:   now,
        };
        assert!(session.is_expired(now));
        assert!(!session.is_expired(now - Duration::seconds(1)));
        assert!(session.is_team());
        assert!(!session.is_admin());
    }
}
