use crate::error::AppResult;

/// Hands a URL to whatever surface the user is looking at.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str) -> AppResult<()>;
}
