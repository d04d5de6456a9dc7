use std::sync::{PoisonError, RwLock};

use crate::domain::model::auth::BearerToken;

/// 認証コンテキスト。トークンを必要とするサービスへ明示的に渡す。
#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<BearerToken>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: Option<BearerToken>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }

    pub fn token(&self) -> Option<BearerToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn sign_in(&self, token: BearerToken) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    pub fn sign_out(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
