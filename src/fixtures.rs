//! Shared specimen fixtures for unit tests

use crate::catalog::Specimen;

pub fn specimen(name: &str, category: &str) -> Specimen {
    Specimen {
        name: name.to_string(),
        locality: String::new(),
        category: category.to_string(),
        subcategory: None,
        dimensions: None,
        size: None,
        weight: String::new(),
        price: String::new(),
        crystal_system: String::new(),
        self_collected: String::new(),
        image: format!("img/{}.jpg", name.to_lowercase().replace(' ', "-")),
        images: vec![],
        description: String::new(),
    }
}

pub fn with_sub(name: &str, category: &str, subcategory: &str) -> Specimen {
    Specimen {
        subcategory: Some(subcategory.to_string()),
        ..specimen(name, category)
    }
}

/// 50 specimens: 30 Quartz (10 Amethyst, 5 Citrine), 20 Fluorite
pub fn museum() -> Vec<Specimen> {
    (0..50)
        .map(|i| {
            let name = format!("Specimen {:02}", i);
            match i {
                0..=9 => with_sub(&name, "Quartz", "Amethyst"),
                10..=14 => with_sub(&name, "Quartz", "Citrine"),
                15..=29 => specimen(&name, "Quartz"),
                _ => specimen(&name, "Fluorite"),
            }
        })
        .collect()
}
