use std::sync::Arc;

use popcast_client::Admin;
use tracing::{debug, info};

use crate::data::backend::ContentBackend;
use crate::domain::account::{NewAdmin, PasswordChange, SessionIdentity};
use crate::domain::error::{DomainError, FORM_FIELD, FormErrors};
use crate::infrastructure::session::SessionService;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Debug, Clone)]
pub(crate) struct LoginResult {
    pub(crate) identity: SessionIdentity,
    /// Signed session cookie value.
    pub(crate) session_token: String,
}

pub(crate) struct AccountService {
    backend: Arc<dyn ContentBackend>,
    sessions: Arc<SessionService>,
}

impl AccountService {
    pub(crate) fn new(backend: Arc<dyn ContentBackend>, sessions: Arc<SessionService>) -> Self {
        Self { backend, sessions }
    }

    /// Exchanges credentials for a backend token and wraps it in a session cookie value.
    pub(crate) async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginResult, DomainError> {
        let login = match self.backend.login(username.trim(), password).await {
            Ok(login) => login,
            Err(DomainError::Unauthorized | DomainError::NotFound) => {
                debug!(username = %username.trim(), "login rejected");
                return Err(FormErrors::single(FORM_FIELD, INVALID_CREDENTIALS).into());
            }
            Err(DomainError::Rejected { message, .. }) => {
                debug!(username = %username.trim(), "login rejected by backend");
                let message = message.unwrap_or_else(|| INVALID_CREDENTIALS.to_string());
                return Err(FormErrors::single(FORM_FIELD, message).into());
            }
            Err(err) => return Err(err),
        };

        if login.token.trim().is_empty() {
            return Err(FormErrors::single(FORM_FIELD, INVALID_CREDENTIALS).into());
        }

        let identity = SessionIdentity::from(login);
        let session_token = self
            .sessions
            .issue(&identity)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        info!(admin_id = %identity.admin_id, username = %identity.username, "admin logged in");
        Ok(LoginResult {
            identity,
            session_token,
        })
    }

    pub(crate) async fn change_password(
        &self,
        token: &str,
        change: &PasswordChange,
    ) -> Result<(), DomainError> {
        change.validate()?;
        self.backend
            .change_password(token, &change.current, &change.new)
            .await?;
        info!("admin password changed");
        Ok(())
    }

    pub(crate) async fn list_admins(&self, token: &str) -> Result<Vec<Admin>, DomainError> {
        self.backend.list_admins(token).await
    }

    pub(crate) async fn add_admin(
        &self,
        token: &str,
        admin: NewAdmin,
    ) -> Result<Admin, DomainError> {
        let admin = admin.validate()?;
        let created = self
            .backend
            .register_admin(token, &admin.username, &admin.password)
            .await?;
        info!(admin_id = %created.id, username = %created.username, "admin registered");
        Ok(created)
    }

    pub(crate) async fn delete_admin(&self, token: &str, id: &str) -> Result<(), DomainError> {
        self.backend.delete_admin(token, id).await?;
        info!(admin_id = %id, "admin deleted");
        Ok(())
    }
}
