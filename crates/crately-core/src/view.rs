// ── List-view state machine ──
//
// Pure UI state over the current snapshot: search, sort, pagination,
// and edit mode. Every transition re-clamps the current page, so the
// view can never point past the end of the filtered set. No rendering
// concerns live here, which keeps the whole surface deterministic and
// unit-testable.

use std::cmp::Ordering;
use std::sync::Arc;

use strum::{Display, EnumIter, EnumString};

use crate::model::Item;

/// Rows shown per page.
pub const PAGE_SIZE: usize = 5;

/// The field the visible rows are ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortField {
    Id,
    #[default]
    Name,
    Quantity,
    Price,
    Category,
}

/// Comparator direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum SortOrder {
    #[default]
    #[strum(to_string = "asc", serialize = "ascending")]
    Ascending,
    #[strum(to_string = "desc", serialize = "descending")]
    Descending,
}

impl SortOrder {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Natural ordering of a single field: numeric for id/quantity/price,
/// lexicographic for name/category.
fn compare_by(a: &Item, b: &Item, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Quantity => a.quantity.cmp(&b.quantity),
        SortField::Price => a.price.total_cmp(&b.price),
        SortField::Category => a.category.cmp(&b.category),
    }
}

/// Derived UI state over the authoritative snapshot.
///
/// Holds the transient view state (search text, sort key and direction,
/// current page, edit target) and computes the visible page of rows.
/// The snapshot itself is replaced wholesale by refreshes; this struct
/// never mutates item data.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    items: Arc<Vec<Arc<Item>>>,
    search_query: String,
    sort_field: SortField,
    sort_order: SortOrder,
    current_page: usize,
    editing: Option<i64>,
}

impl ListView {
    pub fn new() -> Self {
        Self {
            current_page: 1,
            ..Self::default()
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn snapshot(&self) -> &Arc<Vec<Arc<Item>>> {
        &self.items
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// 1-based page index, always within `[1, page_count()]`.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Id of the item being edited, if the view is in edit mode.
    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Install a freshly fetched snapshot.
    pub fn set_snapshot(&mut self, items: Arc<Vec<Arc<Item>>>) {
        self.items = items;
        self.clamp_page();
    }

    /// Replace the search text.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.clamp_page();
    }

    /// Select a sort field. Selecting the current field flips the
    /// direction; a new field resets to ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if field == self.sort_field {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_field = field;
            self.sort_order = SortOrder::Ascending;
        }
        self.clamp_page();
    }

    /// Set field and direction in one step (CLI path).
    pub fn set_sort(&mut self, field: SortField, order: SortOrder) {
        self.sort_field = field;
        self.sort_order = order;
        self.clamp_page();
    }

    /// Jump to a 1-based page index, clamped into range.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
        self.clamp_page();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current_page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.current_page.saturating_sub(1).max(1));
    }

    /// Enter edit mode for the item with the given id.
    ///
    /// Returns the item so the caller can seed a draft from it, or
    /// `None` (leaving the mode unchanged) if the id is not in the
    /// current snapshot.
    pub fn begin_edit(&mut self, id: i64) -> Option<Arc<Item>> {
        let item = self.items.iter().find(|i| i.id == id)?.clone();
        self.editing = Some(id);
        Some(item)
    }

    /// Leave edit mode, after either a save or a cancel.
    pub fn end_edit(&mut self) {
        self.editing = None;
    }

    // ── Derivations ──────────────────────────────────────────────────

    /// Items whose name or category contains the search text,
    /// case-insensitively. Snapshot order is preserved.
    pub fn filtered(&self) -> Vec<Arc<Item>> {
        let query = self.search_query.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.matches_lowercase(&query))
            .cloned()
            .collect()
    }

    /// The full filtered sequence in display order (all pages).
    ///
    /// Stable sort: items with equal keys keep their snapshot order in
    /// both directions.
    pub fn rows(&self) -> Vec<Arc<Item>> {
        let mut rows = self.filtered();
        let (field, order) = (self.sort_field, self.sort_order);
        rows.sort_by(|a, b| {
            let ord = compare_by(a, b, field);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
        rows
    }

    /// The slice of `rows()` for the current page.
    pub fn visible_rows(&self) -> Vec<Arc<Item>> {
        self.rows()
            .into_iter()
            .skip((self.current_page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect()
    }

    pub fn filtered_len(&self) -> usize {
        let query = self.search_query.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.matches_lowercase(&query))
            .count()
    }

    /// Total pages for the current filter; at least 1 even when empty.
    pub fn page_count(&self) -> usize {
        self.filtered_len().div_ceil(PAGE_SIZE).max(1)
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Re-establish `1 <= current_page <= page_count()` after any
    /// change to filter, sort, page, or data.
    fn clamp_page(&mut self) {
        let max = self.page_count();
        self.current_page = self.current_page.clamp(1, max);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str, quantity: u32, price: f64, category: &str) -> Arc<Item> {
        Arc::new(Item {
            id,
            name: name.into(),
            quantity,
            price,
            category: category.into(),
        })
    }

    fn hardware_pair() -> Arc<Vec<Arc<Item>>> {
        Arc::new(vec![
            item(1, "Bolt", 10, 0.5, "Hardware"),
            item(2, "Nut", 100, 0.1, "Hardware"),
        ])
    }

    fn view_with(items: Arc<Vec<Arc<Item>>>) -> ListView {
        let mut view = ListView::new();
        view.set_snapshot(items);
        view
    }

    fn numbered(count: i64) -> Arc<Vec<Arc<Item>>> {
        Arc::new(
            (1..=count)
                .map(|i| item(i, &format!("Item {i:02}"), 1, 1.0, "Misc"))
                .collect(),
        )
    }

    // ── Filter ───────────────────────────────────────────────────────

    #[test]
    fn every_filtered_item_contains_the_query() {
        let items = Arc::new(vec![
            item(1, "Bolt", 10, 0.5, "Hardware"),
            item(2, "Nut", 100, 0.1, "Hardware"),
            item(3, "Cable", 30, 2.5, "Electrical"),
            item(4, "Harness", 5, 12.0, "Electrical"),
        ]);
        let mut view = view_with(items);

        for query in ["har", "BOLT", "ele", "a", "z", ""] {
            view.set_search(query);
            let q = query.to_lowercase();
            for row in view.filtered() {
                assert!(
                    row.name.to_lowercase().contains(&q)
                        || row.category.to_lowercase().contains(&q),
                    "{:?} does not contain {query:?}",
                    row.name
                );
            }
        }
    }

    #[test]
    fn filter_matches_name_and_category_case_insensitively() {
        let mut view = view_with(hardware_pair());

        view.set_search("bolt");
        let rows = view.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 1);

        view.set_search("HARDWARE");
        assert_eq!(view.rows().len(), 2);
    }

    #[test]
    fn empty_query_keeps_everything() {
        let view = view_with(numbered(8));
        assert_eq!(view.filtered_len(), 8);
    }

    // ── Sort ─────────────────────────────────────────────────────────

    #[test]
    fn price_sorts_numerically() {
        let mut view = view_with(hardware_pair());
        view.set_sort(SortField::Price, SortOrder::Ascending);

        let ids: Vec<i64> = view.rows().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 1]); // Nut 0.1 before Bolt 0.5
    }

    #[test]
    fn toggling_the_same_field_twice_restores_ascending() {
        let mut view = view_with(numbered(6));

        view.toggle_sort(SortField::Quantity);
        assert_eq!(view.sort_field(), SortField::Quantity);
        assert_eq!(view.sort_order(), SortOrder::Ascending);

        view.toggle_sort(SortField::Quantity);
        assert_eq!(view.sort_order(), SortOrder::Descending);

        view.toggle_sort(SortField::Quantity);
        assert_eq!(view.sort_order(), SortOrder::Ascending);
    }

    #[test]
    fn toggling_a_new_field_resets_to_ascending() {
        let mut view = view_with(numbered(6));

        view.toggle_sort(SortField::Name);
        view.toggle_sort(SortField::Name); // now descending
        view.toggle_sort(SortField::Price);

        assert_eq!(view.sort_field(), SortField::Price);
        assert_eq!(view.sort_order(), SortOrder::Ascending);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        // All quantities equal: snapshot (id) order must survive the
        // sort in both directions.
        let items = Arc::new(vec![
            item(1, "a", 7, 1.0, "x"),
            item(2, "b", 7, 2.0, "x"),
            item(3, "c", 7, 3.0, "x"),
        ]);
        let mut view = view_with(items);

        view.set_sort(SortField::Quantity, SortOrder::Ascending);
        let ids: Vec<i64> = view.rows().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        view.set_sort(SortField::Quantity, SortOrder::Descending);
        let ids: Vec<i64> = view.rows().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn name_sort_is_lexicographic() {
        let items = Arc::new(vec![
            item(1, "Washer", 1, 1.0, "x"),
            item(2, "Bolt", 1, 1.0, "x"),
            item(3, "Nut", 1, 1.0, "x"),
        ]);
        let mut view = view_with(items);
        view.set_sort(SortField::Name, SortOrder::Ascending);

        let rows = view.rows();
        let names: Vec<&str> = rows.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Bolt", "Nut", "Washer"]);
    }

    // ── Pagination ───────────────────────────────────────────────────

    #[test]
    fn page_count_is_ceil_over_page_size_with_minimum_one() {
        for (n, expected) in [(0i64, 1usize), (1, 1), (5, 1), (6, 2), (10, 2), (11, 3)] {
            let view = view_with(numbered(n));
            assert_eq!(view.page_count(), expected, "for {n} items");
        }
    }

    #[test]
    fn concatenating_pages_reproduces_the_full_sequence_once() {
        let mut view = view_with(numbered(13));

        let all = view.rows();
        let mut concatenated = Vec::new();
        for page in 1..=view.page_count() {
            view.set_page(page);
            concatenated.extend(view.visible_rows());
        }

        let all_ids: Vec<i64> = all.iter().map(|i| i.id).collect();
        let concat_ids: Vec<i64> = concatenated.iter().map(|i| i.id).collect();
        assert_eq!(all_ids, concat_ids);
    }

    #[test]
    fn seven_items_split_five_and_two() {
        let mut view = view_with(numbered(7));

        assert_eq!(view.page_count(), 2);
        assert_eq!(view.visible_rows().len(), 5);

        view.set_page(2);
        assert_eq!(view.visible_rows().len(), 2);

        // Page 3 is out of range: clamp, never panic.
        view.set_page(3);
        assert_eq!(view.current_page(), 2);
        assert_eq!(view.visible_rows().len(), 2);
    }

    #[test]
    fn next_and_prev_saturate_at_the_edges() {
        let mut view = view_with(numbered(7));

        view.prev_page();
        assert_eq!(view.current_page(), 1);

        view.next_page();
        assert_eq!(view.current_page(), 2);

        view.next_page();
        assert_eq!(view.current_page(), 2);
    }

    #[test]
    fn shrinking_filter_reclamps_the_page() {
        let mut view = view_with(numbered(12));
        view.set_page(3);
        assert_eq!(view.current_page(), 3);

        // "item 0" matches Item 01..09 -> 9 results, 2 pages.
        view.set_search("item 0");
        assert_eq!(view.current_page(), 2);

        // One match -> back to the single page.
        view.set_search("Item 01");
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.visible_rows().len(), 1);
    }

    #[test]
    fn snapshot_replacement_reclamps_the_page() {
        let mut view = view_with(numbered(12));
        view.set_page(3);

        view.set_snapshot(numbered(4));
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn empty_filter_result_still_has_one_page() {
        let mut view = view_with(numbered(7));
        view.set_search("no such item");

        assert_eq!(view.page_count(), 1);
        assert_eq!(view.current_page(), 1);
        assert!(view.visible_rows().is_empty());
    }

    // ── Edit mode ────────────────────────────────────────────────────

    #[test]
    fn begin_edit_returns_the_item_and_enters_edit_mode() {
        let mut view = view_with(hardware_pair());

        let target = view.begin_edit(2).unwrap();
        assert_eq!(target.name, "Nut");
        assert_eq!(view.editing(), Some(2));

        view.end_edit();
        assert_eq!(view.editing(), None);
    }

    #[test]
    fn begin_edit_with_stale_id_is_refused() {
        let mut view = view_with(hardware_pair());

        assert!(view.begin_edit(99).is_none());
        assert_eq!(view.editing(), None);
    }

    // ── Combined scenario ────────────────────────────────────────────

    #[test]
    fn bolt_nut_scenario() {
        let mut view = view_with(hardware_pair());

        view.set_search("bolt");
        let rows = view.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 1);

        view.set_search("");
        view.set_sort(SortField::Price, SortOrder::Ascending);
        let prices: Vec<f64> = view.rows().iter().map(|i| i.price).collect();
        assert_eq!(prices, vec![0.1, 0.5]);
    }

    // ── Parsing (CLI surface) ────────────────────────────────────────

    #[test]
    fn sort_field_and_order_parse_from_strings() {
        assert_eq!("price".parse::<SortField>().unwrap(), SortField::Price);
        assert_eq!("Quantity".parse::<SortField>().unwrap(), SortField::Quantity);
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Descending);
        assert_eq!(SortOrder::Descending.to_string(), "desc");
        assert_eq!(SortField::Category.to_string(), "category");
    }
}
