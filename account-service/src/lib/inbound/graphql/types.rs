use async_graphql::InputObject;
use async_graphql::SimpleObject;
use async_graphql::ID;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::Address;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewAddress;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::UsersPage;

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "User")]
pub struct UserData {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub birth_date: String,
    pub addresses: Vec<AddressData>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: ID(user.id.to_string()),
            name: user.name.clone(),
            email: user.email.as_str().to_string(),
            birth_date: user.birth_date.clone(),
            addresses: user.addresses.iter().map(AddressData::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "Address")]
pub struct AddressData {
    pub id: ID,
    pub cep: String,
    pub street: String,
    pub street_number: i32,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

impl From<&Address> for AddressData {
    fn from(address: &Address) -> Self {
        Self {
            id: ID(address.id.to_string()),
            cep: address.cep.clone(),
            street: address.street.clone(),
            street_number: address.street_number,
            complement: address.complement.clone(),
            neighborhood: address.neighborhood.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "UsersPage")]
pub struct UsersPageData {
    pub users: Vec<UserData>,
    pub total_users: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl From<&UsersPage> for UsersPageData {
    fn from(page: &UsersPage) -> Self {
        Self {
            users: page.users.iter().map(UserData::from).collect(),
            total_users: page.total_users,
            has_next_page: page.has_next_page,
            has_previous_page: page.has_previous_page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "LoginResponse")]
pub struct LoginResponseData {
    pub user: UserData,
    pub token: String,
}

impl From<&Session> for LoginResponseData {
    fn from(session: &Session) -> Self {
        Self {
            user: (&session.user).into(),
            token: session.token.clone(),
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub birth_date: String,
    #[graphql(default)]
    pub addresses: Vec<AddressInput>,
}

impl CreateUserInput {
    pub fn try_into_command(self) -> Result<CreateUserCommand, UserError> {
        let email = EmailAddress::new(self.email)?;

        Ok(CreateUserCommand {
            name: self.name,
            email,
            password: self.password,
            birth_date: self.birth_date,
            addresses: self.addresses.into_iter().map(NewAddress::from).collect(),
        })
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct AddressInput {
    pub cep: String,
    pub street: String,
    pub street_number: i32,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

impl From<AddressInput> for NewAddress {
    fn from(input: AddressInput) -> Self {
        Self {
            cep: input.cep,
            street: input.street,
            street_number: input.street_number,
            complement: input.complement,
            neighborhood: input.neighborhood,
            city: input.city,
            state: input.state,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub remember_me: Option<bool>,
}

impl From<LoginInput> for LoginCommand {
    fn from(input: LoginInput) -> Self {
        Self {
            email: input.email,
            password: input.password,
            remember_me: input.remember_me.unwrap_or(false),
        }
    }
}
