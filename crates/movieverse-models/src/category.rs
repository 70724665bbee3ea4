use serde::{Deserialize, Serialize};

/// A named catalog bucket. Order within a category is fetch order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The configured home-page categories, in display order.
    pub fn defaults() -> Vec<Category> {
        [
            ("trending", "Trending"),
            ("action", "Action"),
            ("comedy", "Comedy"),
            ("drama", "Drama"),
            ("bollywood", "Bollywood"),
            ("hollywood", "Hollywood"),
            ("tamil", "Tamil"),
            ("telugu", "Telugu"),
            ("webseries", "Web Series"),
            ("tvshows", "TV Shows"),
            ("topimdb", "Top IMDb"),
            ("classics", "Classics"),
        ]
        .into_iter()
        .map(|(id, name)| Category::new(id, name))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_start_with_trending() {
        let categories = Category::defaults();
        assert_eq!(categories.len(), 12);
        assert_eq!(categories[0].id, "trending");
        assert_eq!(categories[8].name, "Web Series");
    }
}
