use crate::constants::TOKEN_STORAGE_KEY;

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Read the stored access token; blank values count as signed out
#[must_use]
pub fn load_token() -> Option<String> {
    let token = storage()?.get_item(TOKEN_STORAGE_KEY).ok()??;
    normalize_token(&token)
}

/// Persist the access token
///
/// # Errors
///
/// Returns an error if local storage is unavailable or rejects the write
pub fn save_token(token: &str) -> Result<(), String> {
    let storage = storage().ok_or("Local storage unavailable")?;
    storage
        .set_item(TOKEN_STORAGE_KEY, token.trim())
        .map_err(|e| format!("Failed to save token: {e:?}"))
}

pub fn clear_token() {
    let Some(storage) = storage() else { return };
    if let Err(e) = storage.remove_item(TOKEN_STORAGE_KEY) {
        leptos::logging::warn!("Failed to clear token: {:?}", e);
    }
}

fn normalize_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
