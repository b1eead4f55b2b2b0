//! Site-wide settings edited from the admin panel.

use serde::{Deserialize, Serialize};

/// Contact channels and branding for the storefront.
///
/// A singleton: created with defaults, overwritten wholesale on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    /// Messaging (`WhatsApp`) number, digits only with country code.
    pub whatsapp: String,
    /// Social profile URL, opened as-is.
    pub instagram: String,
    /// Display name shown in the header.
    pub site_name: String,
    /// Optional logo image (URL or `data:` URI).
    #[serde(default)]
    pub logo: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            whatsapp: "5573981629453".to_string(),
            instagram: "https://instagram.com/costaiphones".to_string(),
            site_name: "COSTAiPhones".to_string(),
            logo: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_without_logo_deserialize() {
        let json = r#"{"whatsapp":"551100000000","instagram":"https://instagram.com/x","siteName":"X"}"#;
        let settings: SiteSettings = serde_json::from_str(json).expect("deserialize");
        assert_eq!(settings.site_name, "X");
        assert!(settings.logo.is_none());
    }
}
