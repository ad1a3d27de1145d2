//! Shared key generation for storage backends.
//!
//! Key format: `assets/{gym_id}/{millis}-{fragment}.{ext}` for gym-scoped
//! assets, `assets/admin/{millis}-{fragment}.{ext}` for unassigned ones.

use chrono::Utc;
use uuid::Uuid;

/// Generate a collision-resistant storage key for an asset.
///
/// The key combines the owning gym (or the admin bucket), a millisecond
/// timestamp, a random fragment, and the original file's extension. The
/// user-supplied filename itself never appears in the key.
pub fn generate_asset_key(gym_id: Option<Uuid>, original_filename: &str) -> String {
    let scope = match gym_id {
        Some(id) => id.to_string(),
        None => "admin".to_string(),
    };
    let fragment = Uuid::new_v4().simple().to_string();
    let extension = brandhub_core::naming::file_extension(original_filename);

    if extension.is_empty() {
        format!(
            "assets/{}/{}-{}",
            scope,
            Utc::now().timestamp_millis(),
            &fragment[..8]
        )
    } else {
        format!(
            "assets/{}/{}-{}.{}",
            scope,
            Utc::now().timestamp_millis(),
            &fragment[..8],
            extension
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_scoped_and_keeps_extension() {
        let gym = Uuid::new_v4();
        let key = generate_asset_key(Some(gym), "OASIS-logo-horizontal-dark-v1.PNG");
        assert!(key.starts_with(&format!("assets/{}/", gym)));
        assert!(key.ends_with(".png"));
        assert!(!key.contains("OASIS"));
    }

    #[test]
    fn admin_scope_without_gym() {
        let key = generate_asset_key(None, "flyer.pdf");
        assert!(key.starts_with("assets/admin/"));
        assert!(key.ends_with(".pdf"));
    }

    #[test]
    fn key_without_extension() {
        let key = generate_asset_key(None, "README");
        assert!(key.starts_with("assets/admin/"));
        assert!(!key.contains('.'));
    }

    #[test]
    fn keys_do_not_collide_for_identical_input() {
        let gym = Uuid::new_v4();
        let a = generate_asset_key(Some(gym), "same.png");
        let b = generate_asset_key(Some(gym), "same.png");
        assert_ne!(a, b);
    }
}
