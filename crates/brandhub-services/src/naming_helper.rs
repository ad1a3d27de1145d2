//! Next-free-name helper.
//!
//! Produces the next available conventional filename for a gym/type/
//! descriptor by scanning the logo filenames already in the catalog.

use uuid::Uuid;

use brandhub_core::catalog::AssetCatalog;
use brandhub_core::naming::{next_variant, NamingConvention};
use brandhub_core::AppError;

/// Compute the next free conventional filename for the given fields.
///
/// Existing logo filenames for the gym (or the admin bucket) are matched by
/// their normalized `{GYM}-{type}-{descriptor}` base; the new name gets
/// `max(variant) + 1`, or `v1` when nothing matches.
pub async fn next_available_name(
    catalog: &dyn AssetCatalog,
    gym_id: Option<Uuid>,
    gym_code: &str,
    asset_type: &str,
    descriptor: &str,
    extension: &str,
) -> Result<String, AppError> {
    let existing = catalog.list_logo_filenames(gym_id).await?;

    let mut convention = NamingConvention {
        gym_code: gym_code.to_string(),
        asset_type: asset_type.to_string(),
        descriptor: descriptor.to_string(),
        variant: 1,
        extension: extension.to_string(),
    };

    // The `-v` of the variant suffix is the last such marker in an encoded
    // name, so splitting there recovers the normalized base.
    let encoded = convention.encode();
    let base = match encoded.rsplit_once("-v") {
        Some((base, _)) => base.to_string(),
        None => encoded,
    };

    convention.variant = next_variant(&existing, &base);
    Ok(convention.encode())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use brandhub_core::models::{NewGymElement, NewGymLogo};
    use std::sync::Mutex;

    struct FixedCatalog {
        filenames: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AssetCatalog for FixedCatalog {
        async fn insert_logo(&self, _logo: NewGymLogo) -> Result<Uuid, AppError> {
            Ok(Uuid::new_v4())
        }

        async fn insert_element(&self, _element: NewGymElement) -> Result<Uuid, AppError> {
            Ok(Uuid::new_v4())
        }

        async fn list_logo_filenames(
            &self,
            _gym_id: Option<Uuid>,
        ) -> Result<Vec<String>, AppError> {
            Ok(self.filenames.lock().unwrap().clone())
        }
    }

    #[tokio::test]
    async fn first_name_gets_v1() {
        let catalog = FixedCatalog {
            filenames: Mutex::new(vec![]),
        };
        let name = next_available_name(&catalog, None, "OASIS", "logo", "horizontal-dark", "png")
            .await
            .unwrap();
        assert_eq!(name, "OASIS-logo-horizontal-dark-v1.png");
    }

    #[tokio::test]
    async fn bumps_past_highest_existing_variant() {
        let catalog = FixedCatalog {
            filenames: Mutex::new(vec![
                "OASIS-logo-horizontal-dark-v1.png".to_string(),
                "OASIS-logo-horizontal-dark-v3.png".to_string(),
                "OASIS-logo-stacked-v9.png".to_string(),
            ]),
        };
        let name = next_available_name(&catalog, None, "OASIS", "logo", "horizontal-dark", "png")
            .await
            .unwrap();
        assert_eq!(name, "OASIS-logo-horizontal-dark-v4.png");
    }

    #[tokio::test]
    async fn normalizes_fields_before_matching() {
        let catalog = FixedCatalog {
            filenames: Mutex::new(vec!["OASIS-logo-stacked-v2.png".to_string()]),
        };
        let name = next_available_name(&catalog, None, "oasis", "Logo", "Stacked", ".PNG")
            .await
            .unwrap();
        assert_eq!(name, "OASIS-logo-stacked-v3.png");
    }
}
