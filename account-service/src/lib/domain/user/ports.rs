use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UsersPage;
use crate::user::errors::UserError;

/// Port for user domain service operations.
///
/// Authorization happens before these are called; the service itself only
/// enforces business rules.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Errors
    /// * `WeakPassword` - Password fails the strength rules
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Verify credentials and issue a session token.
    ///
    /// # Errors
    /// * `EmailNotFound` - No user with this email
    /// * `IncorrectPassword` - Password does not match
    /// * `Unknown` - Hash or token handling failed
    async fn login(&self, command: LoginCommand) -> Result<Session, UserError>;

    /// Retrieve user (with addresses) by identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve one page of users ordered by name.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self, page: PageRequest) -> Result<UsersPage, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user and its addresses.
    ///
    /// # Returns
    /// Stored user with generated identifiers
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Unique email constraint violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve users ordered by name (then id), skipping `page.skip`
    /// and returning at most `page.max_users`.
    ///
    /// # Returns
    /// The page together with the total number of stored users, both read
    /// from the same snapshot
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_page(&self, page: &PageRequest) -> Result<(Vec<User>, i64), UserError>;
}
