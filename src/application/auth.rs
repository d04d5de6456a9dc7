use std::sync::Arc;

use super::error::AppError;
use super::session::Session;
use crate::domain::model::auth::{Credentials, LoginOutcome};
use crate::domain::repository::CatalogGateway;

/// ログイン・ログアウト。結果は注入された [`Session`] に反映する。
pub struct AuthService<G> {
    gateway: Arc<G>,
    session: Arc<Session>,
}

impl<G: CatalogGateway> AuthService<G> {
    pub fn new(gateway: Arc<G>, session: Arc<Session>) -> Self {
        Self { gateway, session }
    }

    pub async fn login(&self, credentials: Credentials) -> Result<(), AppError> {
        match self.gateway.login(&credentials).await? {
            LoginOutcome::Accepted(token) => {
                tracing::info!(username = %credentials.username, "signed in");
                self.session.sign_in(token);
                Ok(())
            }
            LoginOutcome::Rejected(message) => {
                tracing::info!(username = %credentials.username, "login rejected");
                Err(AppError::LoginRejected(message))
            }
        }
    }

    pub fn logout(&self) {
        self.session.sign_out();
        tracing::info!("signed out");
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }
}
