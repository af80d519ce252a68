//! Category and text filtering over the document store.
//!
//! A flat linear scan: the store is small enough that recomputing on every
//! keystroke is cheaper than maintaining an index.

use crate::model::{CategoryFilter, Document};

/// A document query: category filter plus free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentQuery {
    pub category: CategoryFilter,
    pub search: String,
}

impl DocumentQuery {
    pub fn new(category: CategoryFilter, search: impl Into<String>) -> Self {
        Self {
            category,
            search: search.into(),
        }
    }

    /// Run the query against `documents`.
    pub fn run<'a>(&self, documents: &'a [Document]) -> Vec<&'a Document> {
        filter(documents, self.category, &self.search)
    }
}

/// Documents passing both the category and the search predicate, in input order.
pub fn filter<'a>(
    documents: &'a [Document],
    category: CategoryFilter,
    search: &str,
) -> Vec<&'a Document> {
    let needle = search.to_lowercase();
    documents
        .iter()
        .filter(|doc| category.admits(doc.category) && matches_search(doc, &needle))
        .collect()
}

/// `needle` must already be lowercased. Empty matches everything.
fn matches_search(doc: &Document, needle: &str) -> bool {
    needle.is_empty()
        || doc.title.to_lowercase().contains(needle)
        || doc.tags.iter().any(|t| t.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::store::DocumentStore;

    fn doc(id: &str, title: &str, category: Category, tags: &[&str]) -> Document {
        Document {
            id: id.into(),
            title: title.into(),
            category,
            date: "Jan 01, 2024".into(),
            summary: format!("{title} summary"),
            content: format!("{title} content"),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            author: None,
            version: None,
        }
    }

    fn ids(docs: &[&Document]) -> Vec<String> {
        docs.iter().map(|d| d.id.clone()).collect()
    }

    fn sample() -> Vec<Document> {
        vec![
            doc("1", "Employee Conduct Handbook 2024", Category::Manual, &["hr", "policy", "compliance"]),
            doc("2", "ISO 27001 Security Protocols", Category::Standard, &["security", "iso", "standard"]),
            doc("3", "Release Notes", Category::News, &["Product"]),
            doc("4", "Emergency Response Manual", Category::Manual, &["safety"]),
        ]
    }

    #[test]
    fn all_with_empty_search_is_identity() {
        let docs = sample();
        let result = filter(&docs, CategoryFilter::All, "");
        assert_eq!(ids(&result), ["1", "2", "3", "4"]);
    }

    #[test]
    fn category_only_keeps_order() {
        let docs = sample();
        let result = filter(&docs, CategoryFilter::Only(Category::Manual), "");
        assert_eq!(ids(&result), ["1", "4"]);
        assert!(result.iter().all(|d| d.category == Category::Manual));
    }

    #[test]
    fn search_matches_tags_case_insensitively() {
        let docs = sample();
        let result = filter(&docs, CategoryFilter::All, "SECURITY");
        assert_eq!(ids(&result), ["2"]);
        let result = filter(&docs, CategoryFilter::All, "product");
        assert_eq!(ids(&result), ["3"]);
    }

    #[test]
    fn search_matches_title_substring() {
        let docs = sample();
        let result = filter(&docs, CategoryFilter::All, "manual");
        assert_eq!(ids(&result), ["4"]);
        let result = filter(&docs, CategoryFilter::All, "e");
        assert_eq!(ids(&result), ["1", "2", "3", "4"]);
    }

    #[test]
    fn search_does_not_look_at_content_or_summary() {
        let docs = sample();
        assert!(filter(&docs, CategoryFilter::All, "content").is_empty());
        assert!(filter(&docs, CategoryFilter::All, "summary").is_empty());
    }

    #[test]
    fn predicates_combine_with_and() {
        let docs = sample();
        assert!(filter(&docs, CategoryFilter::Only(Category::Standard), "hr").is_empty());
        let result = filter(&docs, CategoryFilter::Only(Category::Manual), "hr");
        assert_eq!(ids(&result), ["1"]);
    }

    #[test]
    fn every_result_satisfies_search_and_no_match_is_dropped() {
        let docs = sample();
        for needle in ["s", "iso", "2024", "x", "Po"] {
            let result = filter(&docs, CategoryFilter::All, needle);
            let lower = needle.to_lowercase();
            for d in &docs {
                let hit = d.title.to_lowercase().contains(&lower)
                    || d.tags.iter().any(|t| t.to_lowercase().contains(&lower));
                assert_eq!(result.iter().any(|r| r.id == d.id), hit, "needle {needle:?} doc {}", d.id);
            }
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let docs = sample();
        let once: Vec<Document> = filter(&docs, CategoryFilter::Only(Category::Manual), "e")
            .into_iter()
            .cloned()
            .collect();
        let twice = filter(&once, CategoryFilter::Only(Category::Manual), "e");
        assert_eq!(ids(&twice), once.iter().map(|d| d.id.clone()).collect::<Vec<_>>());
    }

    #[test]
    fn bundled_fixture_examples() {
        let store = DocumentStore::bundled().unwrap();
        let docs = store.documents();

        let security = filter(docs, CategoryFilter::All, "security");
        assert_eq!(security.len(), 1);
        assert_eq!(security[0].title, "ISO 27001 Security Protocols");

        let manuals = DocumentQuery::new(CategoryFilter::Only(Category::Manual), "").run(docs);
        assert_eq!(ids(&manuals), ["1", "4"]);

        let handbook = DocumentQuery::new(CategoryFilter::Only(Category::Manual), "handbook").run(docs);
        assert_eq!(ids(&handbook), ["1"]);

        assert!(filter(docs, CategoryFilter::Only(Category::Standard), "hr").is_empty());
    }
}
