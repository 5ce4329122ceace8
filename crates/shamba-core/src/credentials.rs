//! Login and registration input types.

use std::fmt;

use serde::Serialize;

use crate::principal::Role;

/// Login credentials: the account phone number and password.
///
/// The password is never exposed in Debug output.
///
/// # Example
///
/// ```
/// use shamba_core::Credentials;
///
/// let creds = Credentials::new("+254700000000", "secret");
/// assert_eq!(creds.phone(), "+254700000000");
/// ```
#[derive(Clone, Serialize)]
pub struct Credentials {
    phone: String,
    password: String,
}

impl Credentials {
    pub fn new(phone: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            password: password.into(),
        }
    }

    /// Returns the phone number used as the login identifier.
    pub fn phone(&self) -> &str {
        &self.phone
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("phone", &self.phone)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A new account registration.
#[derive(Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub phone: String,
    password: String,
    pub user_type: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        password: impl Into<String>,
        user_type: Role,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            password: password.into(),
            user_type,
            email: None,
            county: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_county(mut self, county: impl Into<String>) -> Self {
        self.county = Some(county.into());
        self
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("phone", &self.phone)
            .field("password", &"[REDACTED]")
            .field("user_type", &self.user_type)
            .field("email", &self.email)
            .field("county", &self.county)
            .finish()
    }
}
