use std::collections::{BTreeSet, HashSet};

use tracing::{debug, warn};

use super::error::{Side, TransferError};
use super::item::{matches_query, sort_by_name, TransferItem};

/// Available/assigned partition of a fixed universe of items, plus the
/// checkbox selection on each side.
///
/// After every operation the two sides are disjoint, together they hold the
/// whole universe, and each selection only names ids present on its side.
/// Both sides are kept sorted by display name.
#[derive(Debug, Clone, PartialEq)]
pub struct DualList<T> {
    universe: Vec<T>,
    available: Vec<T>,
    assigned: Vec<T>,
    selected_available: BTreeSet<String>,
    selected_assigned: BTreeSet<String>,
}

impl<T: TransferItem + Clone> DualList<T> {
    /// Everything starts on the available side
    pub fn new(universe: Vec<T>) -> Self {
        Self::with_assigned(universe, &[])
    }

    pub fn with_assigned(universe: Vec<T>, pre_assigned: &[T]) -> Self {
        let mut list = Self {
            universe: Vec::new(),
            available: Vec::new(),
            assigned: Vec::new(),
            selected_available: BTreeSet::new(),
            selected_assigned: BTreeSet::new(),
        };
        list.initialize(universe, pre_assigned);
        list
    }

    /// Rebuilds the partition from scratch: `assigned := pre_assigned`,
    /// `available := universe \ pre_assigned`, both selections cleared.
    ///
    /// Duplicate ids in `universe` keep their first occurrence. Pre-assigned
    /// items whose id is not in `universe` are ignored.
    pub fn initialize(&mut self, universe: Vec<T>, pre_assigned: &[T]) {
        let mut seen: HashSet<String> = HashSet::with_capacity(universe.len());
        let mut items = Vec::with_capacity(universe.len());
        for item in universe {
            if seen.insert(item.id().to_string()) {
                items.push(item);
            } else {
                warn!(id = item.id(), "duplicate id in transfer universe, keeping first occurrence");
            }
        }
        sort_by_name(&mut items);

        let wanted: HashSet<&str> = pre_assigned.iter().map(|item| item.id()).collect();
        for id in &wanted {
            if !seen.contains(*id) {
                warn!(id = %id, "pre-assigned item is not part of the universe, ignoring");
            }
        }

        let (assigned, available): (Vec<T>, Vec<T>) = items
            .iter()
            .cloned()
            .partition(|item| wanted.contains(item.id()));

        self.universe = items;
        self.available = available;
        self.assigned = assigned;
        self.selected_available.clear();
        self.selected_assigned.clear();
    }

    pub fn toggle_available_selection(&mut self, id: &str, checked: bool) -> Result<(), TransferError> {
        toggle(&self.available, &mut self.selected_available, id, checked, Side::Available)
    }

    pub fn toggle_assigned_selection(&mut self, id: &str, checked: bool) -> Result<(), TransferError> {
        toggle(&self.assigned, &mut self.selected_assigned, id, checked, Side::Assigned)
    }

    /// Selects every available item, or clears the selection if it already holds all of them
    pub fn select_all_available(&mut self) {
        toggle_all(&self.available, &mut self.selected_available);
    }

    /// Selects every assigned item, or clears the selection if it already holds all of them
    pub fn select_all_assigned(&mut self) {
        toggle_all(&self.assigned, &mut self.selected_assigned);
    }

    /// Moves the selected available items to the assigned side. Returns how many moved.
    pub fn assign_selected(&mut self) -> usize {
        let moved = move_selected(&mut self.available, &mut self.assigned, &mut self.selected_available);
        if moved > 0 {
            debug!(moved, assigned = self.assigned.len(), "assigned selected items");
        }
        moved
    }

    /// Moves the selected assigned items back to the available side. Returns how many moved.
    pub fn remove_selected(&mut self) -> usize {
        let moved = move_selected(&mut self.assigned, &mut self.available, &mut self.selected_assigned);
        if moved > 0 {
            debug!(moved, assigned = self.assigned.len(), "removed selected items");
        }
        moved
    }

    /// Puts the whole universe back on the available side
    pub fn reset(&mut self) {
        self.available = self.universe.clone();
        self.assigned.clear();
        self.selected_available.clear();
        self.selected_assigned.clear();
    }

    pub fn universe(&self) -> &[T] {
        &self.universe
    }

    pub fn available(&self) -> &[T] {
        &self.available
    }

    pub fn assigned(&self) -> &[T] {
        &self.assigned
    }

    pub fn selected_available(&self) -> &BTreeSet<String> {
        &self.selected_available
    }

    pub fn selected_assigned(&self) -> &BTreeSet<String> {
        &self.selected_assigned
    }

    pub fn assigned_ids(&self) -> Vec<&str> {
        self.assigned.iter().map(|item| item.id()).collect()
    }

    /// Whether the "assign" control should be enabled
    pub fn can_assign(&self) -> bool {
        !self.selected_available.is_empty()
    }

    /// Whether the "remove" control should be enabled
    pub fn can_remove(&self) -> bool {
        !self.selected_assigned.is_empty()
    }

    /// State of the "select all" checkbox above the available list
    pub fn all_available_selected(&self) -> bool {
        !self.available.is_empty() && self.selected_available.len() == self.available.len()
    }

    pub fn all_assigned_selected(&self) -> bool {
        !self.assigned.is_empty() && self.selected_assigned.len() == self.assigned.len()
    }

    pub fn filter_available(&self, query: &str) -> Vec<&T> {
        self.available.iter().filter(|item| matches_query(*item, query)).collect()
    }

    pub fn filter_assigned(&self, query: &str) -> Vec<&T> {
        self.assigned.iter().filter(|item| matches_query(*item, query)).collect()
    }
}

fn toggle<T: TransferItem>(
    side_items: &[T],
    selection: &mut BTreeSet<String>,
    id: &str,
    checked: bool,
    side: Side,
) -> Result<(), TransferError> {
    if !side_items.iter().any(|item| item.id() == id) {
        return Err(TransferError::NotOnSide {
            id: id.to_string(),
            side,
        });
    }
    if checked {
        selection.insert(id.to_string());
    } else {
        selection.remove(id);
    }
    Ok(())
}

fn toggle_all<T: TransferItem>(side_items: &[T], selection: &mut BTreeSet<String>) {
    let all: BTreeSet<String> = side_items.iter().map(|item| item.id().to_string()).collect();
    if *selection == all {
        selection.clear();
    } else {
        *selection = all;
    }
}

fn move_selected<T: TransferItem>(
    from: &mut Vec<T>,
    to: &mut Vec<T>,
    selection: &mut BTreeSet<String>,
) -> usize {
    if selection.is_empty() {
        return 0;
    }
    let (moving, staying): (Vec<T>, Vec<T>) = std::mem::take(from)
        .into_iter()
        .partition(|item| selection.contains(item.id()));
    *from = staying;
    let moved = moving.len();
    to.extend(moving);
    sort_by_name(to);
    selection.clear();
    moved
}
