use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::Session;
use crate::domain::user::models::SessionPolicy;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UsersPage;
use crate::domain::user::validation::validate_email_unique;
use crate::domain::user::validation::validate_password;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    session_policy: SessionPolicy,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token signing
    /// * `session_policy` - Token lifetimes for login
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        session_policy: SessionPolicy,
    ) -> Self {
        Self {
            repository,
            authenticator,
            session_policy,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        validate_password(&command.password)?;
        validate_email_unique(self.repository.as_ref(), &command.email).await?;

        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        let created_user = self
            .repository
            .create(NewUser {
                name: command.name,
                email: command.email,
                birth_date: command.birth_date,
                password_hash,
                addresses: command.addresses,
            })
            .await?;

        tracing::info!(
            user_id = %created_user.id,
            addresses = created_user.addresses.len(),
            "User created"
        );

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<Session, UserError> {
        let user = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| UserError::EmailNotFound(command.email.clone()))?;

        self.authenticator
            .verify_password(&command.password, &user.password_hash)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::IncorrectPassword,
                other => UserError::Unknown(format!("Password verification failed: {}", other)),
            })?;

        let issued = self
            .authenticator
            .issue_token(user.id.0, self.session_policy.lifetime(command.remember_me))
            .map_err(|e| UserError::Unknown(format!("Token generation failed: {}", e)))?;

        tracing::info!(
            user_id = %user.id,
            remember_me = command.remember_me,
            expires_at = %issued.expires_at,
            "Session issued"
        );

        Ok(Session {
            user,
            token: issued.access_token,
            expires_at: issued.expires_at,
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self, page: PageRequest) -> Result<UsersPage, UserError> {
        let (users, total_users) = self.repository.list_page(&page).await?;

        Ok(UsersPage::new(users, total_users, page))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::Address;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::NewAddress;
    use crate::user::errors::PasswordPolicyError;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn list_page(&self, page: &PageRequest) -> Result<(Vec<User>, i64), UserError>;
        }
    }

    fn service(repository: MockTestUserRepository) -> UserService<MockTestUserRepository> {
        UserService::new(
            Arc::new(repository),
            Arc::new(Authenticator::new(SECRET)),
            SessionPolicy::default(),
        )
    }

    fn stored_user(id: i32, name: &str, email: &str, password: &str) -> User {
        User {
            id: UserId(id),
            name: name.to_string(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            birth_date: "1990-01-01".to_string(),
            password_hash: Authenticator::new(SECRET).hash_password(password).unwrap(),
            addresses: vec![],
        }
    }

    fn create_command(email: &str, password: &str) -> CreateUserCommand {
        CreateUserCommand {
            name: "John Phill".to_string(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password: password.to_string(),
            birth_date: "1990-01-01".to_string(),
            addresses: vec![NewAddress {
                cep: "01310-100".to_string(),
                street: "Avenida Paulista".to_string(),
                street_number: 1578,
                complement: None,
                neighborhood: "Bela Vista".to_string(),
                city: "São Paulo".to_string(),
                state: "SP".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .withf(|email| email == "john@example.com")
            .times(1)
            .returning(|_| Ok(None));

        repository
            .expect_create()
            .withf(|user| {
                user.name == "John Phill"
                    && user.email.as_str() == "john@example.com"
                    && user.password_hash.starts_with("$argon2")
                    && user.addresses.len() == 1
            })
            .times(1)
            .returning(|user| {
                Ok(User {
                    id: UserId(1),
                    name: user.name,
                    email: user.email,
                    birth_date: user.birth_date,
                    password_hash: user.password_hash,
                    addresses: user
                        .addresses
                        .into_iter()
                        .map(|a| Address {
                            id: 1,
                            cep: a.cep,
                            street: a.street,
                            street_number: a.street_number,
                            complement: a.complement,
                            neighborhood: a.neighborhood,
                            city: a.city,
                            state: a.state,
                        })
                        .collect(),
                })
            });

        let user = service(repository)
            .create_user(create_command("john@example.com", "password123"))
            .await
            .expect("User creation failed");

        assert_eq!(user.id, UserId(1));
        assert_eq!(user.addresses[0].street, "Avenida Paulista");
        assert_ne!(user.password_hash, "password123");
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(stored_user(1, "John Doe", email, "password456"))));
        repository.expect_create().times(0);

        let result = service(repository)
            .create_user(create_command("john@example.com", "password123"))
            .await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_create_user_weak_password_skips_store() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_email().times(0);
        repository.expect_create().times(0);

        let service = service(repository);

        for (password, expected) in [
            ("p4ss", PasswordPolicyError::TooShort { min: 6 }),
            ("123456", PasswordPolicyError::MissingLetter),
            ("password", PasswordPolicyError::MissingDigit),
        ] {
            let result = service
                .create_user(create_command("matheus@example.com", password))
                .await;

            match result {
                Err(UserError::WeakPassword(violation)) => assert_eq!(violation, expected),
                other => panic!("expected weak password for {password:?}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_create_user_race_on_unique_email() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_find_by_email().returning(|_| Ok(None));
        repository
            .expect_create()
            .returning(|user| Err(UserError::EmailAlreadyExists(user.email.to_string())));

        let result = service(repository)
            .create_user(create_command("john@example.com", "password123"))
            .await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_login_default_session_lasts_eight_hours() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(4, "John Phill", email, "password123"))));

        let session = service(repository)
            .login(LoginCommand {
                email: "john@example.com".to_string(),
                password: "password123".to_string(),
                remember_me: false,
            })
            .await
            .expect("Login failed");

        let claims = Authenticator::new(SECRET)
            .validate_token(&session.token)
            .expect("Issued token should validate");
        let expected = (Utc::now() + Duration::hours(8)).timestamp();

        assert_eq!(claims.id, 4);
        assert!((claims.exp - expected).abs() <= 1);
        assert_eq!(session.user.id, UserId(4));
    }

    #[tokio::test]
    async fn test_login_remember_me_lasts_seven_days() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(5, "Daniel Ueno", email, "password123"))));

        let session = service(repository)
            .login(LoginCommand {
                email: "daniel@example.com".to_string(),
                password: "password123".to_string(),
                remember_me: true,
            })
            .await
            .expect("Login failed");

        let claims = Authenticator::new(SECRET)
            .validate_token(&session.token)
            .unwrap();
        let expected = (Utc::now() + Duration::days(7)).timestamp();

        assert!((claims.exp - expected).abs() <= 1);
        assert_eq!(session.expires_at.timestamp(), claims.exp);
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_email().returning(|_| Ok(None));

        let result = service(repository)
            .login(LoginCommand {
                email: "matheus.felix@example.com".to_string(),
                password: "password456".to_string(),
                remember_me: false,
            })
            .await;

        assert!(matches!(result, Err(UserError::EmailNotFound(_))));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(2, "Alan Raso", email, "password123"))));

        let result = service(repository)
            .login(LoginCommand {
                email: "alan@example.com".to_string(),
                password: "password456".to_string(),
                remember_me: false,
            })
            .await;

        assert!(matches!(result, Err(UserError::IncorrectPassword)));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .withf(|id| *id == UserId(99))
            .times(1)
            .returning(|_| Ok(None));

        let result = service(repository).get_user(&UserId(99)).await;

        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().returning(|id| {
            Ok(Some(stored_user(
                id.0,
                "Setup User",
                "setup@example.com",
                "password123",
            )))
        });

        let user = service(repository).get_user(&UserId(8)).await.unwrap();

        assert_eq!(user.id, UserId(8));
        assert_eq!(user.name, "Setup User");
    }

    #[tokio::test]
    async fn test_list_users_first_page_of_fifty() {
        let mut repository = MockTestUserRepository::new();

        let mut names: Vec<String> = (0..50).map(|i| format!("User {:02}", 49 - i)).collect();
        names.sort();
        let users: Vec<User> = names
            .iter()
            .enumerate()
            .map(|(i, name)| User {
                id: UserId(i as i32 + 1),
                name: name.clone(),
                email: EmailAddress::new(format!("user{}@example.com", i)).unwrap(),
                birth_date: "2000-01-11".to_string(),
                password_hash: "$argon2id$test_hash".to_string(),
                addresses: vec![],
            })
            .collect();

        repository
            .expect_list_page()
            .withf(|page| page.max_users == 10 && page.skip == 0)
            .times(1)
            .returning(move |page| {
                let slice = users
                    .iter()
                    .skip(page.skip as usize)
                    .take(page.max_users as usize)
                    .cloned()
                    .collect();
                Ok((slice, 50))
            });

        let page = service(repository)
            .list_users(PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.users.len(), 10);
        assert_eq!(page.total_users, 50);
        assert!(page.has_next_page);
        assert!(!page.has_previous_page);
        assert!(page.users.windows(2).all(|w| w[0].name <= w[1].name));
    }

    #[tokio::test]
    async fn test_list_users_last_page() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_list_page()
            .times(1)
            .returning(|_| Ok((vec![], 15)));

        let page = service(repository)
            .list_users(PageRequest::new(10, 10))
            .await
            .unwrap();

        assert!(!page.has_next_page);
        assert!(page.has_previous_page);
    }

    #[tokio::test]
    async fn test_list_users_total_matches_page_snapshot() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_list_page().times(1).returning(|_| {
            Ok((
                vec![stored_user(1, "Ana", "ana@example.com", "password123")],
                1,
            ))
        });

        let page = service(repository)
            .list_users(PageRequest::new(10, 0))
            .await
            .unwrap();

        assert_eq!(page.total_users, 1);
        assert_eq!(page.users.len(), 1);
        assert!(!page.has_next_page);
    }

    #[tokio::test]
    async fn test_list_users_propagates_corrupt_rows() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_list_page()
            .returning(|_| Err(UserError::DatabaseError("stored email: invalid".to_string())));

        let result = service(repository).list_users(PageRequest::default()).await;

        assert!(matches!(result, Err(UserError::DatabaseError(_))));
    }
}
