//! State

use std::sync::Arc;

use storefront_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Token the admin routes accept. `None` locks them entirely.
    pub(crate) admin_token: Option<String>,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, admin_token: Option<String>) -> Self {
        Self {
            app,
            admin_token: admin_token.filter(|token| !token.trim().is_empty()),
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, admin_token: Option<String>) -> Arc<Self> {
        Arc::new(Self::new(app, admin_token))
    }

    pub(crate) fn accepts_admin_token(&self, token: &str) -> bool {
        self.admin_token
            .as_deref()
            .is_some_and(|expected| constant_time_eq(expected.as_bytes(), token.as_bytes()))
    }
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }

    left.iter()
        .zip(right)
        .fold(0_u8, |diff, (l, r)| diff | (l ^ r))
        == 0
}

#[cfg(test)]
mod tests {
    use super::constant_time_eq;

    #[test]
    fn token_comparison_needs_exact_match() {
        assert!(constant_time_eq(b"secret", b"secret"), "identical tokens");
        assert!(!constant_time_eq(b"secret", b"secreT"), "one byte differs");
        assert!(!constant_time_eq(b"secret", b"secret2"), "length differs");
    }
}
