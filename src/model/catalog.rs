//! Static menu the sessions offer items from.

use serde::{Deserialize, Serialize};

/// One menu section: a stable key, a display title and its ordered items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    #[serde(default)]
    pub title: String,
    pub items: Vec<String>,
}

impl Category {
    pub fn new(key: impl Into<String>, title: impl Into<String>, items: &[&str]) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            items: items.iter().map(|item| item.to_string()).collect(),
        }
    }

    /// Title for display, falling back to the key.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.key
        } else {
            &self.title
        }
    }
}

/// Ordered categories. Read-only after startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.key == key)
    }

    /// First category listing `item`.
    pub fn category_of(&self, item: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.items.iter().any(|name| name == item))
    }

    pub fn contains(&self, item: &str) -> bool {
        self.category_of(item).is_some()
    }
}

/// Menu used when no catalog is configured.
pub fn builtin_categories() -> Vec<Category> {
    vec![
        Category::new("soups", "Супы", &["Борщ", "Солянка", "Уха"]),
        Category::new("mains", "Горячее", &["Плов", "Котлета", "Пельмени"]),
        Category::new("sides", "Гарниры", &["Пюре", "Гречка", "Рис"]),
        Category::new("bakery", "Выпечка", &["Хлеб", "Пирожок"]),
        Category::new("drinks", "Напитки", &["Компот", "Морс", "Чай"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_key_and_item() {
        let catalog = Catalog::new(builtin_categories());
        assert_eq!(catalog.category("bakery").unwrap().items, vec!["Хлеб", "Пирожок"]);
        assert_eq!(catalog.category_of("Борщ").unwrap().key, "soups");
        assert!(catalog.contains("Компот"));
        assert!(!catalog.contains("Pizza"));
        assert!(catalog.category("desserts").is_none());
    }

    #[test]
    fn display_title_falls_back_to_key() {
        let untitled = Category::new("misc", "", &["Соль"]);
        assert_eq!(untitled.display_title(), "misc");
        assert_eq!(Category::new("soups", "Супы", &[]).display_title(), "Супы");
    }
}
