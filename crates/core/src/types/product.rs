//! Catalog product records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A smartphone listing.
///
/// Records are replaced whole; nothing mutates a stored product in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    /// Non-negative amount in the storefront currency.
    pub price: Decimal,
    /// Image URL or `data:` URI.
    pub image: String,
    pub specs: ProductSpecs,
    pub description: String,
    /// Star rating between 0 and 5.
    pub rating: f64,
    /// Release period, e.g. `2024-01`.
    pub release_date: String,
}

/// Free-text specification fields shown on cards and in comparisons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpecs {
    pub display: String,
    pub processor: String,
    /// RAM. Older catalog exports call this field `ram`.
    #[serde(alias = "ram")]
    pub memory: String,
    pub storage: String,
    pub battery: String,
    pub camera: String,
}

/// One of the fixed specification fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecField {
    Display,
    Processor,
    Memory,
    Storage,
    Battery,
    Camera,
}

impl SpecField {
    /// All fields in comparison-table order.
    pub const ALL: [Self; 6] = [
        Self::Display,
        Self::Processor,
        Self::Memory,
        Self::Storage,
        Self::Battery,
        Self::Camera,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Display => "Display",
            Self::Processor => "Processor",
            Self::Memory => "Memory",
            Self::Storage => "Storage",
            Self::Battery => "Battery",
            Self::Camera => "Camera",
        }
    }
}

impl ProductSpecs {
    /// Value of a single field.
    #[must_use]
    pub fn get(&self, field: SpecField) -> &str {
        match field {
            SpecField::Display => &self.display,
            SpecField::Processor => &self.processor,
            SpecField::Memory => &self.memory,
            SpecField::Storage => &self.storage,
            SpecField::Battery => &self.battery,
            SpecField::Camera => &self.camera,
        }
    }

    /// Fields whose value is empty or whitespace.
    #[must_use]
    pub fn blank_fields(&self) -> Vec<SpecField> {
        SpecField::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }
}

/// A product as submitted by the admin add-flow, before it has an ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub brand: String,
    pub price: Decimal,
    pub image: String,
    pub specs: ProductSpecs,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub release_date: String,
}

impl ProductDraft {
    /// Attach an ID. Name and brand are trimmed.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name.trim().to_string(),
            brand: self.brand.trim().to_string(),
            price: self.price,
            image: self.image,
            specs: self.specs,
            description: self.description,
            rating: self.rating,
            release_date: self.release_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_json_uses_camel_case() {
        let product = Product {
            id: ProductId::new("1"),
            name: "Phone".to_string(),
            brand: "Brand".to_string(),
            price: Decimal::from(100),
            image: "https://example.com/p.jpg".to_string(),
            specs: ProductSpecs::default(),
            description: String::new(),
            rating: 4.5,
            release_date: "2024-01".to_string(),
        };

        let json = serde_json::to_string(&product).expect("serialize");
        assert!(json.contains("\"releaseDate\":\"2024-01\""));
        assert!(json.contains("\"id\":\"1\""));
    }

    #[test]
    fn test_specs_accept_legacy_ram_field() {
        let json = r#"{
            "display": "6.1\" OLED",
            "processor": "A16",
            "ram": "6GB",
            "storage": "128GB",
            "battery": "3.200 mAh",
            "camera": "48MP"
        }"#;

        let specs: ProductSpecs = serde_json::from_str(json).expect("deserialize");
        assert_eq!(specs.memory, "6GB");
        assert_eq!(specs.get(SpecField::Memory), "6GB");
    }

    #[test]
    fn test_blank_fields() {
        let specs = ProductSpecs {
            display: "6.7\"".to_string(),
            processor: "  ".to_string(),
            ..ProductSpecs::default()
        };
        let blank = specs.blank_fields();
        assert_eq!(blank.len(), 5);
        assert!(blank.contains(&SpecField::Processor));
        assert!(!blank.contains(&SpecField::Display));
    }

    #[test]
    fn test_draft_defaults_optional_fields() {
        let json = r#"{
            "name": "Pixel 9",
            "brand": "Google",
            "price": "5499",
            "image": "https://example.com/pixel.jpg",
            "specs": {
                "display": "6.3\" OLED",
                "processor": "Tensor G4",
                "memory": "12GB",
                "storage": "256GB",
                "battery": "4.700 mAh",
                "camera": "50MP"
            }
        }"#;

        let draft: ProductDraft = serde_json::from_str(json).expect("deserialize");
        assert!(draft.description.is_empty());
        assert!(draft.rating.abs() < f64::EPSILON);

        let product = draft.into_product(ProductId::new("99"));
        assert_eq!(product.id.as_str(), "99");
        assert_eq!(product.price, Decimal::from(5499));
    }

    #[test]
    fn test_draft_trims_name_and_brand() {
        let draft = ProductDraft {
            name: "  Pixel 9 ".to_string(),
            brand: "Google ".to_string(),
            price: Decimal::from(5499),
            image: "https://example.com/pixel.jpg".to_string(),
            specs: ProductSpecs::default(),
            description: String::new(),
            rating: 0.0,
            release_date: String::new(),
        };

        let product = draft.into_product(ProductId::new("99"));
        assert_eq!(product.name, "Pixel 9");
        assert_eq!(product.brand, "Google");
    }
}
