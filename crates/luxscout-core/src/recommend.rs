//! Related-product and home-page recommendation picks

use crate::catalog::Catalog;
use crate::models::Product;

/// How many related products to show under a product detail view
const RELATED_LIMIT: usize = 4;

/// Products related to the one being viewed
///
/// Same category first (excluding the product itself), padded from the rest
/// of the catalog when the category is thin, up to four entries.
pub fn related<'a>(catalog: &'a Catalog, current: &Product) -> Vec<&'a Product> {
    let mut related: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| p.category == current.category && p.id != current.id)
        .take(RELATED_LIMIT)
        .collect();

    if related.len() < RELATED_LIMIT {
        let fill = catalog
            .products()
            .iter()
            .filter(|p| p.category != current.category && p.id != current.id)
            .take(RELATED_LIMIT - related.len());
        related.extend(fill);
    }

    related
}

/// Home-page recommendation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationTab {
    Trending,
    Popular,
    NewArrivals,
}

/// Fixed catalog windows per tab, clamped to the catalog length
pub fn recommendations<'a>(catalog: &'a Catalog, tab: RecommendationTab) -> Vec<&'a Product> {
    let (start, end) = match tab {
        RecommendationTab::Trending => (0, 4),
        RecommendationTab::Popular => (2, 6),
        RecommendationTab::NewArrivals => (4, 8),
    };
    let products = catalog.products();
    let start = start.min(products.len());
    let end = end.min(products.len());
    products[start..end].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_related_prefers_same_category() {
        let catalog = Catalog::embedded().unwrap();
        let current = catalog.product("slim-panel-square").unwrap();
        let related = related(&catalog, current);

        assert!(!related.is_empty());
        assert!(related.iter().all(|p| p.id != current.id));
        // The other panel light must come first
        assert_eq!(related[0].id, "slim-panel-round");
    }

    #[test]
    fn test_related_pads_from_other_categories() {
        let catalog = Catalog::embedded().unwrap();
        // garden-lights has a single product, so everything related comes
        // from elsewhere
        let current = catalog.product("solar-garden-light").unwrap();
        let related = related(&catalog, current);
        assert_eq!(related.len(), 4);
        assert!(related.iter().all(|p| p.category != "garden-lights"));
    }

    #[test]
    fn test_recommendation_windows() {
        let catalog = Catalog::embedded().unwrap();
        let trending = recommendations(&catalog, RecommendationTab::Trending);
        let popular = recommendations(&catalog, RecommendationTab::Popular);

        assert_eq!(trending.len(), 4);
        assert_eq!(popular.len(), 4);
        // Windows overlap by design
        assert_eq!(trending[2].id, popular[0].id);
    }
}
