//! The access-token gate.
//!
//! The token is an opaque credential for the tile provider. It is never
//! validated here; a bad token simply fails inside the map engine when tiles
//! are requested. The only rule enforced locally is that empty or
//! whitespace-only input is rejected before any persistence call.

use tracing::instrument;

/// The single well-known storage key holding the raw token string.
pub const TOKEN_STORAGE_KEY: &str = "map-token";

/// Narrow interface over the string-keyed persistence facility.
///
/// An empty stored value counts as absent, so `clear` may either remove the
/// key or overwrite it with an empty string, whichever the backing store
/// supports.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, token: &str);
    fn clear(&mut self);
}

/// Trims the raw form input. `None` means the submission is rejected.
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Reads the persisted token once at startup. A present, non-empty value
/// means the collection form is skipped entirely.
pub fn stored<S: TokenStore + ?Sized>(store: &S) -> Option<String> {
    store.load().as_deref().and_then(normalize)
}

/// Persists the trimmed token and returns it; the caller transitions to the
/// map workflow on `Some`. Empty input never reaches the store.
#[instrument(skip(store, raw))]
pub fn submit<S: TokenStore + ?Sized>(store: &mut S, raw: &str) -> Option<String> {
    let token = normalize(raw)?;
    store.save(&token);
    log::info!("Stored access token");

    Some(token)
}

/// Deletes the stored token; the caller transitions back to the form.
#[instrument(skip(store))]
pub fn reset<S: TokenStore + ?Sized>(store: &mut S) {
    store.clear();
    log::info!("Cleared access token");
}
