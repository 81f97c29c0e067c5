//! Authentication primitives: login credentials, registration details and
//! the authenticated [`Actor`].
//!
//! Inbound adapters build these through validating constructors before any
//! port or service is called.

use std::fmt;

use zeroize::Zeroizing;

use super::{Email, EmailValidationError, Error, Role, User, UserId};

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed, lowercased and non-empty. It is not checked for
///   shape so unknown addresses fail as bad credentials, not bad input.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use feedback_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ada@Example.com", "password").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalised = email.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalised,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validation failures for registration payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    #[error(transparent)]
    Email(#[from] EmailValidationError),
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,
    #[error("role must be manager or employee")]
    UnknownRole,
}

impl RegistrationValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::PasswordTooShort => "password",
            Self::UnknownRole => "role",
        }
    }

    /// Stable machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Email(EmailValidationError::Empty) => "empty_email",
            Self::Email(EmailValidationError::Malformed) => "malformed_email",
            Self::PasswordTooShort => "password_too_short",
            Self::UnknownRole => "unknown_role",
        }
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDetails {
    email: Email,
    password: Zeroizing<String>,
    role: Role,
}

impl RegistrationDetails {
    /// Validate raw registration inputs.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let email = Email::new(email)?;
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(RegistrationValidationError::PasswordTooShort);
        }
        let role = role
            .parse::<Role>()
            .map_err(|_| RegistrationValidationError::UnknownRole)?;
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
            role,
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// Identity carried inside a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
}

impl From<&User> for TokenSubject {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id(),
            email: user.email().to_string(),
            role: user.role(),
        }
    }
}

/// The authenticated identity performing an operation.
///
/// Built from the stored user, never from token claims alone, so the role is
/// always the one the identity store currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    id: UserId,
    email: Email,
    role: Role,
}

impl Actor {
    pub fn new(id: UserId, email: Email, role: Role) -> Self {
        Self { id, email, role }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Fail with `Forbidden` unless the actor holds `role`.
    ///
    /// # Examples
    /// ```
    /// use feedback_backend::domain::{Actor, Email, ErrorCode, Role, UserId};
    ///
    /// let actor = Actor::new(UserId::new(2), Email::new("e@x.io").unwrap(), Role::Employee);
    /// let err = actor.require_role(Role::Manager).unwrap_err();
    /// assert_eq!(err.code(), ErrorCode::Forbidden);
    /// ```
    pub fn require_role(&self, role: Role) -> Result<(), Error> {
        if self.role == role {
            Ok(())
        } else {
            Err(Error::forbidden(format!("{role} role required")))
        }
    }
}

impl From<User> for Actor {
    fn from(user: User) -> Self {
        let id = user.id();
        let role = user.role();
        Self::new(id, user.email().clone(), role)
    }
}
