//! Built-in catalog used on first run and when the durable record is
//! unreadable.

use rust_decimal::Decimal;

use crate::types::{Product, ProductId, ProductSpecs};

/// The default catalog.
#[must_use]
pub fn seed_catalog() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new("1"),
            name: "iPhone 15 Pro Max".to_string(),
            brand: "Apple".to_string(),
            price: Decimal::from(8499),
            image: "https://images.unsplash.com/photo-1696446701796-da61225697cc?q=80&w=800&auto=format&fit=crop".to_string(),
            specs: ProductSpecs {
                display: "6.7\" OLED 120Hz".to_string(),
                processor: "A17 Pro (3nm)".to_string(),
                memory: "8GB LPDDR5X".to_string(),
                storage: "256GB NVMe".to_string(),
                battery: "4.422 mAh".to_string(),
                camera: "48MP Periscope 5x".to_string(),
            },
            description: "Aerospace-grade titanium and the fastest chip on the planet.".to_string(),
            rating: 5.0,
            release_date: "2023-09".to_string(),
        },
        Product {
            id: ProductId::new("2"),
            name: "Samsung Galaxy S24 Ultra".to_string(),
            brand: "Samsung".to_string(),
            price: Decimal::from(7999),
            image: "https://images.unsplash.com/photo-1706530638590-0708f3680255?q=80&w=800&auto=format&fit=crop".to_string(),
            specs: ProductSpecs {
                display: "6.8\" Dynamic AMOLED".to_string(),
                processor: "Snapdragon 8 Gen 3".to_string(),
                memory: "12GB".to_string(),
                storage: "512GB".to_string(),
                battery: "5.000 mAh".to_string(),
                camera: "200MP Quad-Camera".to_string(),
            },
            description: "The peak of artificial intelligence and mobile photography.".to_string(),
            rating: 4.9,
            release_date: "2024-01".to_string(),
        },
        Product {
            id: ProductId::new("3"),
            name: "iPhone 14 Pro".to_string(),
            brand: "Apple".to_string(),
            price: Decimal::from(6299),
            image: "https://images.unsplash.com/photo-1678652197831-2d180705cd2c?q=80&w=800&auto=format&fit=crop".to_string(),
            specs: ProductSpecs {
                display: "6.1\" ProMotion".to_string(),
                processor: "A16 Bionic".to_string(),
                memory: "6GB".to_string(),
                storage: "128GB".to_string(),
                battery: "3.200 mAh".to_string(),
                camera: "48MP Main".to_string(),
            },
            description: "Compact, powerful and with the Dynamic Island.".to_string(),
            rating: 4.8,
            release_date: "2022-09".to_string(),
        },
        Product {
            id: ProductId::new("4"),
            name: "Xiaomi 14 Ultra".to_string(),
            brand: "Xiaomi".to_string(),
            price: Decimal::from(6899),
            image: "https://images.unsplash.com/photo-1711200388126-70e281519d18?q=80&w=800&auto=format&fit=crop".to_string(),
            specs: ProductSpecs {
                display: "6.73\" LTPO AMOLED".to_string(),
                processor: "Snapdragon 8 Gen 3".to_string(),
                memory: "16GB".to_string(),
                storage: "512GB".to_string(),
                battery: "5.300 mAh".to_string(),
                camera: "50MP Leica Quad".to_string(),
            },
            description: "A professional camera that happens to be a phone.".to_string(),
            rating: 4.7,
            release_date: "2024-02".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_seed_ids_are_unique() {
        let catalog = seed_catalog();
        let ids: HashSet<_> = catalog.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_seed_specs_are_complete() {
        for product in seed_catalog() {
            assert!(product.specs.blank_fields().is_empty(), "{}", product.name);
            assert!((0.0..=5.0).contains(&product.rating));
        }
    }
}
