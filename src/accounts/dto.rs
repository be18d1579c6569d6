use std::fmt;

use serde::Serialize;
use time::Date;

/// Input for registration. Accepted as given; run it through
/// [`validate_registration`](super::validation::validate_registration) first
/// when the values come from an untrusted form.
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub birthdate: Date,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        birthdate: Date,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            birthdate,
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("birthdate", &self.birthdate)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Raw registration form as typed by a user, before validation.
#[derive(Clone, Copy)]
pub struct RegistrationForm<'a> {
    pub name: &'a str,
    pub birthdate: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Partial update: one optional slot per mutable field.
///
/// A blank `name` or an empty `new_password` counts as not supplied; the
/// name is stored trimmed.
#[derive(Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub birthdate: Option<Date>,
    pub new_password: Option<String>,
}

impl UserPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn birthdate(mut self, birthdate: Date) -> Self {
        self.birthdate = Some(birthdate);
        self
    }

    pub fn new_password(mut self, password: impl Into<String>) -> Self {
        self.new_password = Some(password.into());
        self
    }

    pub(crate) fn normalized(self) -> Self {
        Self {
            name: self
                .name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            birthdate: self.birthdate,
            new_password: self.new_password.filter(|p| !p.is_empty()),
        }
    }

    /// True when no slot is set. Call on a normalized patch so blank
    /// strings are already dropped.
    pub(crate) fn is_empty(&self) -> bool {
        self.name.is_none() && self.birthdate.is_none() && self.new_password.is_none()
    }
}

impl fmt::Debug for UserPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPatch")
            .field("name", &self.name)
            .field("birthdate", &self.birthdate)
            .field("new_password", &self.new_password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Success confirmation for write operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ack {
    pub message: String,
}

impl Ack {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn empty_patch_is_empty() {
        assert!(UserPatch::new().normalized().is_empty());
        assert!(UserPatch::new().name("").new_password("").normalized().is_empty());
        assert!(UserPatch::new().name("   ").normalized().is_empty());
        assert!(!UserPatch::new().name("X").normalized().is_empty());
        assert!(!UserPatch::new().birthdate(date!(2000 - 01 - 01)).normalized().is_empty());
    }

    #[test]
    fn normalized_drops_empty_strings() {
        let patch = UserPatch::new().name("").new_password("secret").normalized();
        assert_eq!(patch.name, None);
        assert_eq!(patch.new_password.as_deref(), Some("secret"));
    }

    #[test]
    fn normalized_trims_name_but_not_password() {
        let patch = UserPatch::new().name("  Ana Maria ").new_password(" pw ").normalized();
        assert_eq!(patch.name.as_deref(), Some("Ana Maria"));
        assert_eq!(patch.new_password.as_deref(), Some(" pw "));
    }

    #[test]
    fn debug_never_prints_passwords() {
        let user = NewUser::new("Ana", date!(1988 - 12 - 05), "ana@x.com", "hunter22");
        let patch = UserPatch::new().new_password("hunter22");
        assert!(!format!("{:?}", user).contains("hunter22"));
        assert!(!format!("{:?}", patch).contains("hunter22"));
    }
}
