//! Site settings commands.

use clap::Args;
use tracing::info;

use handset_core::SiteSettings;
use handset_storefront::services::validation::{data_uri_len, validate_settings};
use handset_storefront::store::CatalogStore;

use crate::error::Result;

/// Fields to change; omitted fields keep their current value.
#[derive(Debug, Default, Args)]
pub struct SettingsPatch {
    /// Messaging number, digits only
    #[arg(long)]
    pub whatsapp: Option<String>,

    /// Social profile URL
    #[arg(long)]
    pub instagram: Option<String>,

    /// Store name
    #[arg(long)]
    pub site_name: Option<String>,

    /// Logo URL or data URI; pass an empty string to remove it
    #[arg(long)]
    pub logo: Option<String>,
}

impl SettingsPatch {
    fn apply(self, mut settings: SiteSettings) -> SiteSettings {
        if let Some(whatsapp) = self.whatsapp {
            settings.whatsapp = whatsapp;
        }
        if let Some(instagram) = self.instagram {
            settings.instagram = instagram;
        }
        if let Some(site_name) = self.site_name {
            settings.site_name = site_name;
        }
        if let Some(logo) = self.logo {
            settings.logo = Some(logo).filter(|l| !l.trim().is_empty());
        }
        settings
    }
}

/// Print the current settings.
pub fn show(store: &CatalogStore) {
    let settings = store.load().settings;
    info!("Site name: {}", settings.site_name);
    info!("WhatsApp:  {}", settings.whatsapp);
    info!("Instagram: {}", settings.instagram);
    match settings.logo.as_deref() {
        None => info!("Logo:      (default)"),
        Some(logo) => match data_uri_len(logo) {
            Some(bytes) => info!("Logo:      uploaded image, {bytes} bytes"),
            None => info!("Logo:      {logo}"),
        },
    }
}

/// Apply a patch and save.
///
/// # Errors
///
/// Returns an error if the result is invalid or the write fails.
pub fn set(store: &CatalogStore, patch: SettingsPatch) -> Result<()> {
    let settings = patch.apply(store.load().settings);
    validate_settings(&settings)?;
    store.save_settings(&settings)?;
    info!("Settings saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_keeps_omitted_fields() {
        let patch = SettingsPatch {
            site_name: Some("Costa Phones".to_string()),
            ..SettingsPatch::default()
        };
        let settings = patch.apply(SiteSettings::default());
        assert_eq!(settings.site_name, "Costa Phones");
        assert_eq!(settings.whatsapp, SiteSettings::default().whatsapp);
    }

    #[test]
    fn test_empty_logo_clears_it() {
        let current = SiteSettings {
            logo: Some("https://example.com/logo.png".to_string()),
            ..SiteSettings::default()
        };
        let patch = SettingsPatch {
            logo: Some(String::new()),
            ..SettingsPatch::default()
        };
        assert_eq!(patch.apply(current).logo, None);
    }
}
