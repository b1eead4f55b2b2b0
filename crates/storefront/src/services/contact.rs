//! Outbound contact links.

use serde::Serialize;

use handset_core::SiteSettings;

const WHATSAPP_BASE: &str = "https://wa.me/";

/// Where an inquiry starts from; each has its own opening message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryContext {
    Card,
    Detail,
}

impl InquiryContext {
    #[must_use]
    pub fn message(self, product_name: &str) -> String {
        match self {
            Self::Card => format!("Hello! I'd like more information about the {product_name}."),
            Self::Detail => {
                format!("Hello! I'm interested in the {product_name}. I'd like more details.")
            }
        }
    }
}

/// `https://wa.me/<digits>?text=<message>`.
///
/// Everything but ASCII digits is dropped from `number`, so formatted
/// numbers such as `+55 (73) 98162-9453` work as entered.
#[must_use]
pub fn whatsapp_link(number: &str, message: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    format!(
        "{WHATSAPP_BASE}{digits}?text={}",
        urlencoding::encode(message)
    )
}

/// Links shown alongside a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactLinks {
    pub whatsapp_card: String,
    pub whatsapp_detail: String,
    /// Social profile URL, passed through unchanged.
    pub instagram: String,
}

impl ContactLinks {
    #[must_use]
    pub fn for_product(settings: &SiteSettings, product_name: &str) -> Self {
        Self {
            whatsapp_card: whatsapp_link(
                &settings.whatsapp,
                &InquiryContext::Card.message(product_name),
            ),
            whatsapp_detail: whatsapp_link(
                &settings.whatsapp,
                &InquiryContext::Detail.message(product_name),
            ),
            instagram: settings.instagram.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whatsapp_link_encodes_message() {
        let link = whatsapp_link(
            "5573981629453",
            &InquiryContext::Card.message("iPhone 15 Pro Max"),
        );
        assert_eq!(
            link,
            "https://wa.me/5573981629453?text=Hello%21%20I%27d%20like%20more%20information%20about%20the%20iPhone%2015%20Pro%20Max."
        );
    }

    #[test]
    fn test_whatsapp_link_strips_formatting() {
        let link = whatsapp_link("+55 (73) 98162-9453", "hi");
        assert_eq!(link, "https://wa.me/5573981629453?text=hi");
    }

    #[test]
    fn test_contact_links_for_product() {
        let links = ContactLinks::for_product(&SiteSettings::default(), "Galaxy S24 Ultra");
        assert!(links.whatsapp_card.contains("more%20information"));
        assert!(links.whatsapp_detail.contains("interested%20in%20the%20Galaxy%20S24%20Ultra"));
        assert_eq!(links.instagram, "https://instagram.com/costaiphones");
    }
}
