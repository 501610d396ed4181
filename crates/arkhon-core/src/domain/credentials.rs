//! Validated registration and login input.
//!
//! Handlers build these from raw request bodies before talking to a
//! use-case, so the use-cases never see unchecked strings. Fields are checked
//! in declaration order and the first failure is returned.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::ValidationError;

const NAME_MIN: usize = 3;
const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 32;
const PASSWORD_MIN: usize = 12;
const PASSWORD_MAX: usize = 48;

/// Input for creating an account.
///
/// ## Invariants
/// - `first_name` and `last_name` have at least 3 characters.
/// - `username` is 3-32 characters of `[A-Za-z0-9_.-]`, starting with a
///   letter or digit.
/// - `email` has the shape `local@domain.tld`.
/// - `password` is 12-48 characters, contains a letter and no whitespace.
#[derive(Clone)]
pub struct Registration {
    first_name: String,
    last_name: String,
    username: String,
    email: String,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration fields.
    pub fn try_from_parts(
        first_name: &str,
        last_name: &str,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, ValidationError> {
        check_name("firstname", first_name)?;
        check_name("lastname", last_name)?;
        check_username(username)?;
        check_email(email)?;
        check_password(password)?;

        Ok(Self {
            first_name: first_name.trim().to_owned(),
            last_name: last_name.trim().to_owned(),
            username: username.to_owned(),
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Input for logging in with a username or an email.
///
/// Empty strings count as absent. At least one identifier is present.
#[derive(Clone)]
pub struct LoginCredentials {
    username: Option<String>,
    email: Option<String>,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(
        username: Option<&str>,
        email: Option<&str>,
        password: &str,
    ) -> Result<Self, ValidationError> {
        let username = username.filter(|u| !u.is_empty());
        let email = email.filter(|e| !e.is_empty());

        if username.is_none() && email.is_none() {
            return Err(ValidationError::new(
                "username",
                "username or email is required",
            ));
        }
        if let Some(username) = username {
            check_username(username)?;
        }
        if let Some(email) = email {
            check_email(email)?;
        }
        check_password(password)?;

        Ok(Self {
            username: username.map(str::to_owned),
            email: email.map(str::to_owned),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

fn check_required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, format!("{field} is required")));
    }
    Ok(())
}

fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: Option<usize>,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min {
        return Err(ValidationError::new(
            field,
            format!("{field} must be at least {min} characters long"),
        ));
    }
    if let Some(max) = max.filter(|max| len > *max) {
        return Err(ValidationError::new(
            field,
            format!("{field} must be at most {max} characters long"),
        ));
    }
    Ok(())
}

fn check_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    check_required(field, value)?;
    check_length(field, value.trim(), NAME_MIN, None)
}

fn check_username(value: &str) -> Result<(), ValidationError> {
    const FIELD: &str = "username";
    check_required(FIELD, value)?;
    check_length(FIELD, value, USERNAME_MIN, Some(USERNAME_MAX))?;

    let starts_well = value.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());
    let charset_ok = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if !starts_well || !charset_ok {
        return Err(ValidationError::new(
            FIELD,
            "username may only contain letters, digits, '_', '-' and '.', and must start with a letter or digit",
        ));
    }
    Ok(())
}

fn check_email(value: &str) -> Result<(), ValidationError> {
    const FIELD: &str = "email";
    check_required(FIELD, value)?;

    let invalid = || ValidationError::new(FIELD, "email must be a valid email address");
    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

fn check_password(value: &str) -> Result<(), ValidationError> {
    const FIELD: &str = "password";
    if value.is_empty() {
        return Err(ValidationError::new(FIELD, "password is required"));
    }
    check_length(FIELD, value, PASSWORD_MIN, Some(PASSWORD_MAX))?;

    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::new(
            FIELD,
            "password must not contain whitespace",
        ));
    }
    if !value.chars().any(char::is_alphabetic) {
        return Err(ValidationError::new(
            FIELD,
            "password must contain at least one letter",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const PASSWORD: &str = "correcthorsebattery";

    #[test]
    fn test_valid_registration() {
        let reg =
            Registration::try_from_parts("Ann", "Lee", "annlee1", "ann@example.com", PASSWORD)
                .unwrap();

        assert_eq!(reg.username(), "annlee1");
        assert_eq!(reg.email(), "ann@example.com");
        assert_eq!(reg.password(), PASSWORD);
    }

    #[test]
    fn test_debug_hides_password() {
        let reg =
            Registration::try_from_parts("Ann", "Lee", "annlee1", "ann@example.com", PASSWORD)
                .unwrap();

        assert!(!format!("{reg:?}").contains(PASSWORD));
    }

    #[rstest]
    #[case("", "Lee", "annlee1", "ann@example.com", PASSWORD, "firstname")]
    #[case("An", "Lee", "annlee1", "ann@example.com", PASSWORD, "firstname")]
    #[case("Ann", "Le", "annlee1", "ann@example.com", PASSWORD, "lastname")]
    #[case("Ann", "Lee", "an", "ann@example.com", PASSWORD, "username")]
    #[case("Ann", "Lee", "ann lee", "ann@example.com", PASSWORD, "username")]
    #[case("Ann", "Lee", "_annlee", "ann@example.com", PASSWORD, "username")]
    #[case("Ann", "Lee", &"a".repeat(33), "ann@example.com", PASSWORD, "username")]
    #[case("Ann", "Lee", "annlee1", "ann.example.com", PASSWORD, "email")]
    #[case("Ann", "Lee", "annlee1", "ann@example", PASSWORD, "email")]
    #[case("Ann", "Lee", "annlee1", "ann@@example.com", PASSWORD, "email")]
    #[case("Ann", "Lee", "annlee1", "ann@example.com", "short", "password")]
    #[case("Ann", "Lee", "annlee1", "ann@example.com", &"p".repeat(49), "password")]
    #[case("Ann", "Lee", "annlee1", "ann@example.com", "correct horse battery", "password")]
    #[case("Ann", "Lee", "annlee1", "ann@example.com", "123456789012", "password")]
    fn invalid_registration(
        #[case] first: &str,
        #[case] last: &str,
        #[case] username: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let err = Registration::try_from_parts(first, last, username, email, password)
            .expect_err("invalid input must fail");
        assert_eq!(err.field, field);
    }

    #[test]
    fn test_first_failing_field_wins() {
        let err = Registration::try_from_parts("", "", "", "", "").unwrap_err();
        assert_eq!(err.field, "firstname");
    }

    #[rstest]
    #[case(Some("annlee1"), None)]
    #[case(None, Some("ann@example.com"))]
    #[case(Some(""), Some("ann@example.com"))]
    fn valid_login(#[case] username: Option<&str>, #[case] email: Option<&str>) {
        let creds = LoginCredentials::try_from_parts(username, email, PASSWORD).unwrap();
        assert_eq!(creds.username(), username.filter(|u| !u.is_empty()));
        assert_eq!(creds.email(), email);
    }

    #[rstest]
    #[case(None, None, PASSWORD, "username")]
    #[case(Some(""), Some(""), PASSWORD, "username")]
    #[case(Some("a!"), None, PASSWORD, "username")]
    #[case(None, Some("nope"), PASSWORD, "email")]
    #[case(Some("annlee1"), None, "", "password")]
    fn invalid_login(
        #[case] username: Option<&str>,
        #[case] email: Option<&str>,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let err = LoginCredentials::try_from_parts(username, email, password)
            .expect_err("invalid input must fail");
        assert_eq!(err.field, field);
    }
}
