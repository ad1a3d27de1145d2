//! Asset classification
//!
//! Maps MIME types to display categories and parsed asset types to their
//! storage table. Both mappings are pure and total.

use serde::{Deserialize, Serialize};

/// Display category derived from a file's MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "asset_category", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Video,
    Image,
    Document,
    Other,
}

impl AssetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::Video => "video",
            AssetCategory::Image => "image",
            AssetCategory::Document => "document",
            AssetCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which metadata table an asset is routed to.
///
/// Logos have dedicated records; every other asset type lands in the generic
/// element table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetStore {
    Logo,
    Element,
}

/// Strip MIME parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Derive the display category from a MIME type. Always returns a category;
/// anything unrecognized is `Other`.
pub fn classify_category(content_type: &str) -> AssetCategory {
    let mime = normalize_mime_type(content_type).to_lowercase();

    if mime.starts_with("video/") {
        AssetCategory::Video
    } else if mime.starts_with("image/") {
        AssetCategory::Image
    } else if mime == "application/pdf" || mime.contains("document") {
        AssetCategory::Document
    } else {
        AssetCategory::Other
    }
}

/// Derive the storage table from a parsed asset type.
pub fn classify_target(asset_type: &str) -> TargetStore {
    if asset_type == "logo" {
        TargetStore::Logo
    } else {
        TargetStore::Element
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_table() {
        assert_eq!(classify_category("video/mp4"), AssetCategory::Video);
        assert_eq!(classify_category("image/png"), AssetCategory::Image);
        assert_eq!(classify_category("application/pdf"), AssetCategory::Document);
        assert_eq!(classify_category("application/zip"), AssetCategory::Other);
    }

    #[test]
    fn category_matches_document_subtypes() {
        assert_eq!(
            classify_category(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            AssetCategory::Document
        );
    }

    #[test]
    fn category_strips_mime_parameters() {
        assert_eq!(
            classify_category("image/jpeg; charset=utf-8"),
            AssetCategory::Image
        );
    }

    #[test]
    fn category_of_empty_is_other() {
        assert_eq!(classify_category(""), AssetCategory::Other);
    }

    #[test]
    fn target_routing() {
        assert_eq!(classify_target("logo"), TargetStore::Logo);
        assert_eq!(classify_target("hero"), TargetStore::Element);
        assert_eq!(classify_target("icon"), TargetStore::Element);
        assert_eq!(classify_target(""), TargetStore::Element);
    }
}
