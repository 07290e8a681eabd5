use crate::geometry::{Point, ScreenRect};

/// Index of an item in the registry it was registered with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub usize);

/// Host objects the lasso can select. The rectangle is read at every drag
/// start because items may move between drags.
pub trait ItemGeometry {
    fn screen_rect(&self) -> Option<ScreenRect>;
}

impl ItemGeometry for ScreenRect {
    fn screen_rect(&self) -> Option<ScreenRect> {
        Some(*self)
    }
}

impl ItemGeometry for Point {
    fn screen_rect(&self) -> Option<ScreenRect> {
        Some(ScreenRect::new(self.x, self.y, 0.0, 0.0))
    }
}

/// Per-item selection record.
///
/// `possible` always equals `hover_assisted || loop_assisted` while a drag is
/// running; `selected` holds the outcome of the last finished drag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ItemState {
    possible: bool,
    selected: bool,
    hover_assisted: bool,
    loop_assisted: bool,
    representative_point: Point,
}

impl ItemState {
    pub fn possible(&self) -> bool {
        self.possible
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn hover_assisted(&self) -> bool {
        self.hover_assisted
    }

    pub fn loop_assisted(&self) -> bool {
        self.loop_assisted
    }

    pub fn representative_point(&self) -> Point {
        self.representative_point
    }

    pub(crate) fn reset_for_drag(&mut self, point: Option<Point>) {
        self.possible = false;
        self.selected = false;
        self.hover_assisted = false;
        self.loop_assisted = false;
        if let Some(point) = point {
            self.representative_point = point;
        }
    }

    /// Hover contact sticks until the next drag start.
    pub(crate) fn mark_hovered(&mut self) {
        self.hover_assisted = true;
        self.possible = true;
    }

    pub(crate) fn update_possible(&mut self, loop_assisted: bool) {
        self.loop_assisted = loop_assisted;
        self.possible = self.hover_assisted || self.loop_assisted;
    }

    pub(crate) fn finalize(&mut self) {
        self.selected = self.possible;
        self.possible = false;
    }

    pub(crate) fn deselect(&mut self) {
        self.selected = false;
    }
}

/// Items eligible for lasso interaction, each paired with its selection record.
pub struct ItemRegistry<H> {
    entries: Vec<(H, ItemState)>,
}

impl<H> Default for ItemRegistry<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> ItemRegistry<H> {
    pub fn new(handles: impl IntoIterator<Item = H>) -> Self {
        Self {
            entries: handles
                .into_iter()
                .map(|handle| (handle, ItemState::default()))
                .collect(),
        }
    }

    /// Swaps in a new item set; every record starts unselected.
    pub fn replace(&mut self, handles: impl IntoIterator<Item = H>) {
        *self = Self::new(handles);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&H> {
        self.entries.get(id.0).map(|(handle, _)| handle)
    }

    pub fn state(&self, id: ItemId) -> Option<&ItemState> {
        self.entries.get(id.0).map(|(_, state)| state)
    }

    pub(crate) fn state_mut(&mut self, id: ItemId) -> Option<&mut ItemState> {
        self.entries.get_mut(id.0).map(|(_, state)| state)
    }

    pub fn handles(&self) -> impl Iterator<Item = &H> {
        self.entries.iter().map(|(handle, _)| handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &H, &ItemState)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, (handle, state))| (ItemId(index), handle, state))
    }

    pub(crate) fn entries_mut(&mut self) -> impl Iterator<Item = (&H, &mut ItemState)> {
        self.entries.iter_mut().map(|(handle, state)| (&*handle, state))
    }

    pub(crate) fn states_mut(&mut self) -> impl Iterator<Item = &mut ItemState> {
        self.entries.iter_mut().map(|(_, state)| state)
    }

    fn filter_ids(&self, predicate: impl Fn(&ItemState) -> bool) -> Vec<ItemId> {
        self.iter()
            .filter(|(_, _, state)| predicate(state))
            .map(|(id, _, _)| id)
            .collect()
    }

    fn filter_handles(&self, predicate: impl Fn(&ItemState) -> bool) -> Vec<&H> {
        self.entries
            .iter()
            .filter(|(_, state)| predicate(state))
            .map(|(handle, _)| handle)
            .collect()
    }

    pub fn possible_items(&self) -> Vec<&H> {
        self.filter_handles(|state| state.possible)
    }

    pub fn selected_items(&self) -> Vec<&H> {
        self.filter_handles(|state| state.selected)
    }

    pub fn not_possible_items(&self) -> Vec<&H> {
        self.filter_handles(|state| !state.possible)
    }

    pub fn not_selected_items(&self) -> Vec<&H> {
        self.filter_handles(|state| !state.selected)
    }

    pub fn possible_ids(&self) -> Vec<ItemId> {
        self.filter_ids(|state| state.possible)
    }

    pub fn selected_ids(&self) -> Vec<ItemId> {
        self.filter_ids(|state| state.selected)
    }

    pub fn not_possible_ids(&self) -> Vec<ItemId> {
        self.filter_ids(|state| !state.possible)
    }

    pub fn not_selected_ids(&self) -> Vec<ItemId> {
        self.filter_ids(|state| !state.selected)
    }

    pub fn any_selected(&self) -> bool {
        self.entries.iter().any(|(_, state)| state.selected)
    }
}

impl<H: PartialEq> ItemRegistry<H> {
    pub fn find(&self, handle: &H) -> Option<ItemId> {
        self.entries
            .iter()
            .position(|(candidate, _)| candidate == handle)
            .map(ItemId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ItemRegistry<&'static str> {
        ItemRegistry::new(["a", "b", "c"])
    }

    #[test]
    fn new_registry_has_nothing_selected() {
        let registry = registry();
        assert!(registry.possible_items().is_empty());
        assert!(registry.selected_items().is_empty());
        assert_eq!(registry.not_selected_items(), vec![&"a", &"b", &"c"]);
        assert_eq!(registry.not_possible_ids().len(), 3);
    }

    #[test]
    fn queries_preserve_registry_order() {
        let mut registry = registry();
        registry.state_mut(ItemId(2)).unwrap().mark_hovered();
        registry.state_mut(ItemId(0)).unwrap().mark_hovered();
        assert_eq!(registry.possible_items(), vec![&"a", &"c"]);
        assert_eq!(registry.not_possible_items(), vec![&"b"]);
        assert_eq!(registry.possible_ids(), vec![ItemId(0), ItemId(2)]);
    }

    #[test]
    fn finalize_moves_possible_into_selected() {
        let mut registry = registry();
        registry.state_mut(ItemId(1)).unwrap().update_possible(true);
        for state in registry.states_mut() {
            state.finalize();
        }
        assert_eq!(registry.selected_items(), vec![&"b"]);
        assert!(registry.possible_items().is_empty());
        assert!(registry.any_selected());
    }

    #[test]
    fn hover_keeps_item_possible_when_loop_drops_it() {
        let mut state = ItemState::default();
        state.mark_hovered();
        state.update_possible(false);
        assert!(state.possible());
        assert!(state.hover_assisted());
        assert!(!state.loop_assisted());
    }

    #[test]
    fn replace_resets_every_record() {
        let mut registry = registry();
        registry.state_mut(ItemId(0)).unwrap().update_possible(true);
        registry.state_mut(ItemId(0)).unwrap().finalize();
        registry.replace(["x", "y"]);
        assert_eq!(registry.len(), 2);
        assert!(!registry.any_selected());
        assert_eq!(registry.find(&"y"), Some(ItemId(1)));
        assert_eq!(registry.find(&"a"), None);
    }

    #[test]
    fn reset_for_drag_keeps_point_when_geometry_missing() {
        let mut state = ItemState::default();
        state.reset_for_drag(Some(Point::new(4.0, 2.0)));
        state.mark_hovered();
        state.reset_for_drag(None);
        assert_eq!(state.representative_point(), Point::new(4.0, 2.0));
        assert!(!state.possible());
    }
}
