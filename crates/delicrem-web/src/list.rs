//! Search filtering and client-side pagination shared by every list page
//!
//! Filtering and paging are pure functions of the loaded collection, the
//! query and the current page. The page number is never clamped when the
//! collection shrinks, so a page past the end simply renders empty.

use delicrem_core::utils::contains_ignore_case;
use delicrem_core::{Order, Product, Sale, User};

/// Entity that can be matched by the page search box
pub trait Searchable {
    /// Text the query is matched against
    fn search_key(&self) -> &str;
}

impl Searchable for Order {
    fn search_key(&self) -> &str {
        &self.customer.name
    }
}

impl Searchable for Sale {
    fn search_key(&self) -> &str {
        &self.customer.name
    }
}

impl Searchable for Product {
    fn search_key(&self) -> &str {
        &self.name
    }
}

impl Searchable for User {
    fn search_key(&self) -> &str {
        &self.name
    }
}

/// Items whose search key contains `query`, ignoring case, in original order
pub fn filter_by_query<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| contains_ignore_case(item.search_key(), query))
        .cloned()
        .collect()
}

/// Fixed-size page window over a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current_page: usize,
}

impl Paginator {
    /// Start on page 1; a zero page size is treated as 1
    pub const fn new(page_size: usize) -> Self {
        Self {
            page_size: if page_size == 0 { 1 } else { page_size },
            current_page: 1,
        }
    }

    /// Items per page
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// 1-based current page
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Select a page; page 0 means page 1
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Number of pages needed for `len` items
    pub const fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Page numbers `1..=total_pages`
    pub fn page_numbers(&self, len: usize) -> Vec<usize> {
        (1..=self.total_pages(len)).collect()
    }

    /// Items on the current page, empty when it lies past the end
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current_page - 1).saturating_mul(self.page_size);
        let end = start.saturating_add(self.page_size).min(items.len());
        items.get(start..end).unwrap_or(&[])
    }
}

/// Loaded collection plus the search and page state of one list page
#[derive(Debug, Clone)]
pub struct ListView<T> {
    items: Vec<T>,
    query: String,
    filtered: Vec<T>,
    paginator: Paginator,
}

impl<T: Searchable + Clone> ListView<T> {
    /// Empty list on page 1
    pub const fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            query: String::new(),
            filtered: Vec::new(),
            paginator: Paginator::new(page_size),
        }
    }

    /// Replace the loaded collection, keeping query and page
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.refilter();
    }

    /// Change the search query, keeping the page
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
    }

    /// Select a page
    pub fn go_to_page(&mut self, page: usize) {
        self.paginator.go_to(page);
    }

    /// Current query
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whole loaded collection
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Items matching the query
    pub fn filtered(&self) -> &[T] {
        &self.filtered
    }

    /// Matching items on the current page
    pub fn visible(&self) -> &[T] {
        self.paginator.slice(&self.filtered)
    }

    /// 1-based current page
    pub const fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    /// Page numbers for the filtered collection
    pub fn page_numbers(&self) -> Vec<usize> {
        self.paginator.page_numbers(self.filtered.len())
    }

    fn refilter(&mut self) {
        self.filtered = filter_by_query(&self.items, &self.query);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[derive(Debug, Clone, PartialEq)]
    struct Named(String);

    impl Searchable for Named {
        fn search_key(&self) -> &str {
            &self.0
        }
    }

    fn named(names: &[&str]) -> Vec<Named> {
        names.iter().map(|n| Named((*n).to_string())).collect()
    }

    #[test]
    fn test_filter_is_case_insensitive_and_ordered() {
        let items = named(&["Ana", "Pedro", "Mariana", "Luis"]);
        assert_eq!(filter_by_query(&items, "ANA"), named(&["Ana", "Mariana"]));
        assert_eq!(filter_by_query(&items, ""), items);
    }

    #[rstest]
    #[case(0, 5, 0)]
    #[case(5, 5, 1)]
    #[case(6, 5, 2)]
    #[case(7, 3, 3)]
    fn test_total_pages(#[case] len: usize, #[case] size: usize, #[case] expected: usize) {
        assert_eq!(Paginator::new(size).total_pages(len), expected);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let items = named(&["a", "b", "c", "d", "e", "f"]);
        let mut paginator = Paginator::new(5);
        paginator.go_to(2);
        assert_eq!(paginator.slice(&items), &items[5..]);

        paginator.go_to(3);
        assert!(paginator.slice(&items).is_empty());
    }

    #[test]
    fn test_page_zero_means_first() {
        let mut paginator = Paginator::new(2);
        paginator.go_to(0);
        assert_eq!(paginator.current_page(), 1);
    }

    #[test]
    fn test_list_view_keeps_page_when_items_shrink() {
        let mut view = ListView::new(5);
        view.replace_items(named(&["a", "b", "c", "d", "e", "f"]));
        view.go_to_page(2);
        assert_eq!(view.visible().len(), 1);
        assert_eq!(view.page_numbers(), vec![1, 2]);

        view.replace_items(named(&["a", "b", "c", "d", "e"]));
        assert_eq!(view.current_page(), 2);
        assert!(view.visible().is_empty());
        assert_eq!(view.page_numbers(), vec![1]);
    }

    #[test]
    fn test_list_view_query_narrows_pages() {
        let mut view = ListView::new(1);
        view.replace_items(named(&["Ana", "Pedro", "Mariana"]));
        view.set_query("ana");

        assert_eq!(view.query(), "ana");
        assert_eq!(view.filtered().len(), 2);
        assert_eq!(view.items().len(), 3);
        assert_eq!(view.page_numbers(), vec![1, 2]);
    }

    proptest! {
        #[test]
        fn filtered_items_all_match(
            names in prop::collection::vec("[a-zA-Z]{0,6}", 0..20),
            query in "[a-zA-Z]{0,2}",
        ) {
            let items: Vec<Named> = names.into_iter().map(Named).collect();
            let filtered = filter_by_query(&items, &query);
            let lowered = query.to_lowercase();
            prop_assert!(filtered.iter().all(|n| n.0.to_lowercase().contains(&lowered)));
            prop_assert!(filtered.len() <= items.len());
        }

        #[test]
        fn pages_reassemble_the_list(len in 0usize..40, size in 1usize..7) {
            let items: Vec<usize> = (0..len).collect();
            let mut paginator = Paginator::new(size);
            let mut rebuilt = Vec::new();
            for page in paginator.page_numbers(len) {
                paginator.go_to(page);
                let slice = paginator.slice(&items);
                prop_assert!(slice.len() <= size);
                rebuilt.extend_from_slice(slice);
            }
            prop_assert_eq!(rebuilt, items);
        }
    }
}
