use crate::domain::user::models::EmailAddress;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserError;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Check password strength.
///
/// Rules are applied in order and the first violation is reported:
/// at least six characters, at least one ASCII letter, at least one digit.
pub fn validate_password(password: &str) -> Result<(), PasswordPolicyError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }

    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(PasswordPolicyError::MissingLetter);
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordPolicyError::MissingDigit);
    }

    Ok(())
}

/// Fail with `EmailAlreadyExists` when another user holds `email`.
pub async fn validate_email_unique<UR>(
    repository: &UR,
    email: &EmailAddress,
) -> Result<(), UserError>
where
    UR: UserRepository + ?Sized,
{
    match repository.find_by_email(email.as_str()).await? {
        Some(_) => Err(UserError::EmailAlreadyExists(email.to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_letters_and_digits() {
        assert_eq!(validate_password("password123"), Ok(()));
        assert_eq!(validate_password("a1b2c3"), Ok(()));
    }

    #[test]
    fn test_rejects_short_passwords() {
        for password in ["", "a", "p4ss", "abc12"] {
            assert_eq!(
                validate_password(password),
                Err(PasswordPolicyError::TooShort { min: 6 }),
                "{password:?} should be too short"
            );
        }
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Six characters, nine bytes
        assert_eq!(validate_password("ááá1bc"), Ok(()));
        // Five characters, seven bytes
        assert_eq!(
            validate_password("áá1bc"),
            Err(PasswordPolicyError::TooShort { min: 6 })
        );
    }

    #[test]
    fn test_rejects_missing_letter() {
        assert_eq!(
            validate_password("123456"),
            Err(PasswordPolicyError::MissingLetter)
        );
        assert_eq!(
            validate_password("12345!@#"),
            Err(PasswordPolicyError::MissingLetter)
        );
    }

    #[test]
    fn test_rejects_missing_digit() {
        assert_eq!(
            validate_password("password"),
            Err(PasswordPolicyError::MissingDigit)
        );
        assert_eq!(
            validate_password("SSSSSS"),
            Err(PasswordPolicyError::MissingDigit)
        );
    }

    #[test]
    fn test_length_checked_before_composition() {
        assert_eq!(
            validate_password("12"),
            Err(PasswordPolicyError::TooShort { min: 6 })
        );
    }
}
