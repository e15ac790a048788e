//! Credentials for outbound ERP API calls.

/// Supplies the bearer token attached to outbound requests.
///
/// `None` means call unauthenticated; the remote store decides whether to
/// accept that.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Fixed token handed over at construction (CLI flag or environment).
#[derive(Debug, Clone)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}
