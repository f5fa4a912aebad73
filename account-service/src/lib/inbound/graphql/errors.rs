use std::fmt;

use async_graphql::ErrorExtensions;
use async_graphql::ServerError;
use serde::Serialize;

use crate::domain::user::errors::ErrorKind;
use crate::domain::user::errors::UserError;

const UNKNOWN_ERROR_MESSAGE: &str = "Unknown Error";

/// Domain error as exposed to API callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub additional_info: Option<String>,
}

impl ApiError {
    pub fn code(&self) -> u16 {
        match self.kind {
            ErrorKind::InvalidPassword | ErrorKind::InvalidEmail => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::NotFound => 404,
            ErrorKind::UnknownError => 500,
        }
    }

    pub fn message(&self) -> &'static str {
        match self.kind {
            ErrorKind::InvalidPassword => "Invalid password",
            ErrorKind::InvalidEmail => "Invalid email",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::NotFound => "User not found",
            ErrorKind::UnknownError => UNKNOWN_ERROR_MESSAGE,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        let additional_info = match &err {
            UserError::WeakPassword(violation) => Some(violation.to_string()),
            UserError::IncorrectPassword => Some("The password is incorrect.".to_string()),
            UserError::InvalidEmail(_) => Some("The email address is not valid.".to_string()),
            UserError::EmailAlreadyExists(_) => {
                Some("There is already another user with this email.".to_string())
            }
            UserError::EmailNotFound(_) => {
                Some("There is not an user with this email.".to_string())
            }
            UserError::Unauthorized => {
                Some("A valid authentication token is required.".to_string())
            }
            UserError::NotFound(_) => {
                Some("The user with the provided ID was not found.".to_string())
            }
            UserError::DatabaseError(_) | UserError::Unknown(_) => {
                tracing::error!(error = %err, "Request failed with an internal error");
                None
            }
        };

        Self {
            kind: err.kind(),
            additional_info,
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        let additional_info = self.additional_info.clone();

        async_graphql::Error::new_with_source(self.clone()).extend_with(move |_, e| {
            e.set("code", code);
            if let Some(info) = &additional_info {
                e.set("additionalInfo", info.as_str());
            }
        })
    }
}

/// Resolver-side conversion: domain error to GraphQL error carrying an [`ApiError`].
pub fn graphql_error(err: UserError) -> async_graphql::Error {
    ApiError::from(err).extend()
}

/// Error as written on the wire: `{ message, code, additionalInfo }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedError {
    pub message: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl From<&ServerError> for FormattedError {
    /// Errors raised by resolvers keep their message; anything else
    /// (parse failures, validation, missing context data) is masked.
    fn from(err: &ServerError) -> Self {
        match err.source::<ApiError>() {
            Some(api_error) => Self {
                message: api_error.message().to_string(),
                code: api_error.code(),
                additional_info: api_error.additional_info.clone(),
            },
            None => {
                tracing::warn!(error = %err.message, "Masking unexpected GraphQL error");
                Self::unknown()
            }
        }
    }
}

impl FormattedError {
    pub fn unknown() -> Self {
        Self {
            message: UNKNOWN_ERROR_MESSAGE.to_string(),
            code: 500,
            additional_info: None,
        }
    }
}

/// GraphQL response body with errors in the formatted wire shape.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLResponseBody {
    pub data: async_graphql::Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FormattedError>,
}

impl GraphQLResponseBody {
    /// Body for a request that never reached the schema.
    pub fn unknown_error() -> Self {
        Self {
            data: async_graphql::Value::Null,
            errors: vec![FormattedError::unknown()],
        }
    }
}

impl From<async_graphql::Response> for GraphQLResponseBody {
    fn from(response: async_graphql::Response) -> Self {
        Self {
            errors: response.errors.iter().map(FormattedError::from).collect(),
            data: response.data,
        }
    }
}
