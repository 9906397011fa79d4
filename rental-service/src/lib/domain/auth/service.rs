use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::IssuedToken;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Credential verification and token issuing.
///
/// Login resolves the email against the user store, checks the password
/// against the stored hash, and only then asks the authenticator for a
/// signed token whose subject is the verified email. Registration hashes
/// the password and persists the new account.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<IssuedToken, AuthError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AuthError::IdentifierNotFound(email.to_string()))?;

        let password_matches = self
            .authenticator
            .verify_password(password, &user.password_hash)?;

        if !password_matches {
            return Err(AuthError::BadCredentials);
        }

        Ok(self.authenticator.issue_token(user.email.as_str())?)
    }

    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError> {
        let password_hash = self.authenticator.hash_password(command.password.as_str())?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(user).await?;

        tracing::info!(user_id = %created.id, "Account registered");

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::auth::models::Password;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::DisplayName;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(
            b"test_secret_key_at_least_32_bytes!",
            Duration::hours(24),
        ))
    }

    fn stored_user(authenticator: &Authenticator, email: &str, password: &str) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            name: DisplayName::new("John Doe".to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: authenticator.hash_password(password).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_login_success_issues_token_for_email_subject() {
        let authenticator = authenticator();
        let user = stored_user(&authenticator, "john.doe@example.com", "password123");

        let mut repository = MockTestUserRepository::new();
        let returned = user.clone();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = AuthService::new(Arc::new(repository), Arc::clone(&authenticator));

        let email = EmailAddress::new("john.doe@example.com".to_string()).unwrap();
        let issued = service.login(&email, "password123").await.unwrap();

        assert_eq!(issued.expires_in_millis, 86_400_000);
        let claims = authenticator.validate_token(&issued.token).unwrap();
        assert_eq!(claims.sub, "john.doe@example.com");
    }

    #[tokio::test]
    async fn test_login_unknown_identifier() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let email = EmailAddress::new("unknown@example.com".to_string()).unwrap();
        let result = service.login(&email, "password123").await;

        // Distinguishable internally even though the HTTP boundary collapses
        // this with BadCredentials.
        assert!(matches!(result, Err(AuthError::IdentifierNotFound(_))));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let authenticator = authenticator();
        let user = stored_user(&authenticator, "john.doe@example.com", "password123");

        let mut repository = MockTestUserRepository::new();
        let returned = user.clone();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator);

        let email = EmailAddress::new("john.doe@example.com".to_string()).unwrap();
        let result = service.login(&email, "not-the-password").await;

        assert!(matches!(result, Err(AuthError::BadCredentials)));
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_create()
            .withf(|user| {
                user.password_hash.starts_with("$argon2")
                    && user.email.as_str() == "john.doe@example.com"
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let command = RegisterUserCommand::new(
            DisplayName::new("John Doe".to_string()).unwrap(),
            EmailAddress::new("john.doe@example.com".to_string()).unwrap(),
            Password::new("password123".to_string()).unwrap(),
        );

        let created = service.register(command).await.unwrap();
        assert_ne!(created.password_hash, "password123");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_create().times(1).returning(|user| {
            Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ))
        });

        let service = AuthService::new(Arc::new(repository), authenticator());

        let command = RegisterUserCommand::new(
            DisplayName::new("John Doe".to_string()).unwrap(),
            EmailAddress::new("john.doe@example.com".to_string()).unwrap(),
            Password::new("password123".to_string()).unwrap(),
        );

        let result = service.register(command).await;
        assert!(matches!(result, Err(AuthError::EmailAlreadyExists(_))));
    }
}
