//! # Session identity
//!
//! In-process `IdentitySource`: a slot holding the signed-in user, if any.
//! Signing in and out is the caller's business; the feed only reads the slot.

use std::sync::RwLock;

use crate::models::User;
use crate::traits::IdentitySource;

#[derive(Debug, Default)]
pub struct SessionIdentity {
    user: RwLock<Option<User>>,
}

impl SessionIdentity {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            user: RwLock::new(Some(user)),
        }
    }

    pub fn sign_in(&self, user: User) {
        *self.user.write().unwrap_or_else(|e| e.into_inner()) = Some(user);
    }

    pub fn sign_out(&self) {
        *self.user.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl IdentitySource for SessionIdentity {
    fn current_user(&self) -> Option<User> {
        self.user.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
