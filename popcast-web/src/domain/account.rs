use popcast_client::LoginResponse;

use super::error::{FORM_FIELD, FormErrors};

pub(crate) const MIN_PASSWORD_LEN: usize = 6;

/// Who is signed in, as reported by the backend at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SessionIdentity {
    pub(crate) admin_id: String,
    pub(crate) username: String,
    pub(crate) is_super_admin: bool,
    /// Backend bearer token.
    pub(crate) access_token: String,
}

impl From<LoginResponse> for SessionIdentity {
    fn from(login: LoginResponse) -> Self {
        Self {
            admin_id: login.id,
            username: login.username,
            is_super_admin: login.is_super_admin,
            access_token: login.token,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PasswordChange {
    pub(crate) current: String,
    pub(crate) new: String,
    pub(crate) confirm: String,
}

impl PasswordChange {
    /// Rules are checked in order and only the first failure is reported.
    pub(crate) fn validate(&self) -> Result<(), FormErrors> {
        if self.current.is_empty() || self.new.is_empty() || self.confirm.is_empty() {
            return Err(FormErrors::single(FORM_FIELD, "All fields are required"));
        }
        if self.new.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormErrors::single(
                FORM_FIELD,
                "New password must be at least 6 characters",
            ));
        }
        if self.new != self.confirm {
            return Err(FormErrors::single(FORM_FIELD, "New passwords do not match"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct NewAdmin {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl NewAdmin {
    pub(crate) fn validate(self) -> Result<Self, FormErrors> {
        let mut errors = FormErrors::new();
        let username = self.username.trim().to_string();
        if username.is_empty() {
            errors.insert("username", "Username is required");
        }
        if self.password.is_empty() {
            errors.insert("password", "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert("password", "Password must be at least 6 characters");
        }
        errors.into_result(Self {
            username,
            password: self.password,
        })
    }
}
