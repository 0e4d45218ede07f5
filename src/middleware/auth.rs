//! Authentication middleware
//!
//! Admin pages sit behind [`AuthGate`]. The gate only checks that a token
//! is stored; whether the backend still accepts it is found out by the
//! first admin request.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::{Session, LOGIN_ROUTE};
use crate::state::storage::SessionStore;
use crate::utils::errors::Result;

/// What the gate decided for one protected page
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    Allow(Session),
    Redirect { to: &'static str },
}

/// Result of rendering through the gate
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome<T> {
    Rendered(T),
    Redirect { to: &'static str },
}

impl<T> GateOutcome<T> {
    pub fn rendered(self) -> Option<T> {
        match self {
            GateOutcome::Rendered(value) => Some(value),
            GateOutcome::Redirect { .. } => None,
        }
    }
}

/// Guard for admin-only views
#[derive(Debug, Clone)]
pub struct AuthGate {
    store: Arc<dyn SessionStore>,
}

impl AuthGate {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Allow when any session is stored, otherwise send to the login page
    pub fn check(&self) -> Result<GateDecision> {
        match self.store.load()? {
            Some(session) => {
                debug!("Admin session present");
                Ok(GateDecision::Allow(session))
            }
            None => {
                warn!(redirect = LOGIN_ROUTE, "Protected page requested without a session");
                Ok(GateDecision::Redirect { to: LOGIN_ROUTE })
            }
        }
    }

    /// Run `render` only when the gate allows it
    pub fn guard<T, F>(&self, render: F) -> Result<GateOutcome<T>>
    where
        F: FnOnce(&Session) -> T,
    {
        Ok(match self.check()? {
            GateDecision::Allow(session) => GateOutcome::Rendered(render(&session)),
            GateDecision::Redirect { to } => GateOutcome::Redirect { to },
        })
    }

    /// Async version of [`guard`](Self::guard) for renders that fetch data
    pub async fn guard_async<T, F, Fut>(&self, render: F) -> Result<GateOutcome<T>>
    where
        F: FnOnce(Session) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match self.check()? {
            GateDecision::Allow(session) => Ok(GateOutcome::Rendered(render(session).await?)),
            GateDecision::Redirect { to } => Ok(GateOutcome::Redirect { to }),
        }
    }
}
