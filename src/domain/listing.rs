//! Client-side search and pagination over fetched lists

use crate::models::{Assignment, Task, UserProfile};
use crate::utils::helpers::calculate_offset;

/// Something the list pages can search by text
pub trait Searchable {
    /// Fields matched against the search words
    fn search_fields(&self) -> Vec<&str>;

    /// True when every word of `query` occurs in at least one field,
    /// ignoring case. An empty query matches everything.
    fn matches(&self, query: &str) -> bool {
        let fields: Vec<String> = self.search_fields().iter().map(|f| f.to_lowercase()).collect();
        query
            .split_whitespace()
            .map(str::to_lowercase)
            .all(|word| fields.iter().any(|field| field.contains(&word)))
    }
}

impl Searchable for Task {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.description.as_str(), self.category.as_str()];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}

impl Searchable for Assignment {
    fn search_fields(&self) -> Vec<&str> {
        match &self.task {
            Some(task) => {
                let mut fields = vec![task.title.as_str(), self.task_id.as_str()];
                if let Some(category) = &task.category {
                    fields.push(category.as_str());
                }
                fields
            }
            None => vec![self.task_id.as_str()],
        }
    }
}

impl Searchable for UserProfile {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str()];
        fields.extend(self.skills.iter().map(String::as_str));
        fields
    }
}

/// Items matching `query`, in their original order
pub fn filter_items<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    items.iter().filter(|item| item.matches(query)).collect()
}

/// One page of a client-side list
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, clamped to `1..=total_pages`
    pub page: u32,
    pub page_size: u32,
    pub total_items: usize,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// "Page 2 of 5 (43 items)"
    pub fn label(&self) -> String {
        format!("Page {} of {} ({} items)", self.page, self.total_pages, self.total_items)
    }
}

/// Slice `items` into page `page` of `page_size`.
///
/// An empty list still has one (empty) page. A zero page size is treated as 1.
pub fn paginate<T: Clone>(items: &[T], page: u32, page_size: u32) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = (total_items as u32).div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = calculate_offset(page as usize, page_size as usize);
    let end = (start + page_size as usize).min(total_items);
    let items = if start < total_items {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };

    Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}
