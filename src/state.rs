//! Museum State - Single Source of Truth (SSOT)
//!
//! Owns the loaded catalog and everything derived from user input:
//! selection, query, field filters, the rendered card grid, its pager,
//! and the detail modal. UI front ends translate their events into the
//! methods here and read the results back; nothing else mutates state.

use crate::card::Card;
use crate::catalog::{CatalogSource, Specimen};
use crate::filter::{matching_indices, FieldFilters, FilterInputs, FilterState, Selection};
use crate::modal::{Modal, ModalEvent};
use crate::nav::NavTree;
use crate::pager::Pager;
use crate::taxonomy::Taxonomy;

pub struct MuseumState {
    specimens: Vec<Specimen>,
    source: Option<CatalogSource>,
    taxonomy: Taxonomy,
    nav: NavTree,
    filter: FilterState,
    inputs: FilterInputs,
    /// Catalog positions passing the current filter
    filtered: Vec<usize>,
    pager: Pager,
    grid: Vec<Card>,
    modal: Modal,
}

impl MuseumState {
    /// Index the catalog and render the first page with no constraints
    pub fn new(specimens: Vec<Specimen>, page_size: usize) -> Self {
        let taxonomy = Taxonomy::build(&specimens);
        let nav = NavTree::build(&taxonomy);
        let mut state = Self {
            specimens,
            source: None,
            taxonomy,
            nav,
            filter: FilterState::default(),
            inputs: FilterInputs::default(),
            filtered: Vec::new(),
            pager: Pager::new(page_size),
            grid: Vec::new(),
            modal: Modal::default(),
        };
        state.refresh();
        state
    }

    /// Resolve card images against the catalog location
    pub fn with_source(mut self, source: CatalogSource) -> Self {
        self.source = Some(source);
        self.render_first_page();
        self
    }

    pub fn specimens(&self) -> &[Specimen] {
        &self.specimens
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn nav(&self) -> &NavTree {
        &self.nav
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn selection(&self) -> &Selection {
        &self.filter.selection
    }

    pub fn query(&self) -> &str {
        &self.filter.query
    }

    pub fn inputs(&self) -> &FilterInputs {
        &self.inputs
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    /// Cards currently rendered, in catalog order
    pub fn grid(&self) -> &[Card] {
        &self.grid
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Whether the "load more" control should be shown
    pub fn has_more(&self) -> bool {
        self.pager.has_more()
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// Change the taxonomy selection; unknown categories/subcategories are rejected
    pub fn select(&mut self, selection: Selection) -> bool {
        let known = match &selection {
            Selection::All => true,
            Selection::Category(category) => self.taxonomy.has_category(category),
            Selection::Subcategory { category, subcategory } => {
                self.taxonomy.contains(category, subcategory)
            }
        };
        if !known {
            tracing::warn!("Ignoring selection outside the catalog taxonomy: {:?}", selection);
            return false;
        }

        tracing::debug!("Selection -> {:?}", selection);
        self.filter.selection = selection;
        self.refresh();
        true
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
        self.refresh();
    }

    /// Replace the field-filter control values and re-evaluate
    pub fn set_inputs(&mut self, inputs: FilterInputs) {
        self.filter.fields = FieldFilters::from_inputs(&inputs);
        self.inputs = inputs;
        self.refresh();
    }

    /// Clear field filters, query and selection
    pub fn reset_filters(&mut self) {
        tracing::debug!("Resetting filters");
        self.inputs = FilterInputs::default();
        self.filter = FilterState::default();
        self.refresh();
    }

    /// Append the next page of already-filtered cards
    pub fn load_more(&mut self) -> usize {
        let Some(range) = self.pager.load_more() else {
            return 0;
        };
        let added = range.len();
        let cards: Vec<Card> = self.filtered[range].iter().map(|&i| self.card(i)).collect();
        self.grid.extend(cards);
        tracing::debug!("Loaded {} more cards ({} of {})", added, self.grid.len(), self.filtered.len());
        added
    }

    /// Open the detail modal for the rendered card at `position`
    pub fn open_card(&mut self, position: usize) -> bool {
        match self.grid.get(position) {
            Some(card) => {
                self.modal.open(card.clone());
                true
            }
            None => false,
        }
    }

    pub fn handle_modal(&mut self, event: ModalEvent) -> bool {
        self.modal.handle(event)
    }

    fn card(&self, index: usize) -> Card {
        Card::new(index, &self.specimens[index], self.source.as_ref())
    }

    /// Re-filter, reset the pager and render page 1
    fn refresh(&mut self) {
        self.filtered = matching_indices(&self.specimens, &self.filter);
        self.pager.reset(self.filtered.len());
        self.render_first_page();
        tracing::debug!("{} of {} specimens match", self.filtered.len(), self.specimens.len());
    }

    fn render_first_page(&mut self) {
        let shown = self.pager.displayed();
        self.grid = self.filtered[..shown].iter().map(|&i| self.card(i)).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SpecimenSize;
    use crate::fixtures::{museum, specimen};
    use crate::modal::ModalKey;

    fn amethyst() -> Selection {
        Selection::Subcategory {
            category: "Quartz".into(),
            subcategory: "Amethyst".into(),
        }
    }

    #[test]
    fn test_initial_render() {
        let state = MuseumState::new(museum(), 24);
        assert_eq!(state.filtered_count(), 50);
        assert_eq!(state.grid().len(), 24);
        assert!(state.has_more());
        assert_eq!(state.nav().active(state.selection()), Some(0));
        assert!(!state.modal().is_open());
    }

    #[test]
    fn test_quartz_then_amethyst() {
        let mut state = MuseumState::new(museum(), 24);
        assert!(state.select(Selection::Category("Quartz".into())));
        assert_eq!(state.filtered_count(), 30);
        assert_eq!(state.grid().len(), 24);

        assert!(state.select(amethyst()));
        assert_eq!(state.filtered_count(), 10);
        assert_eq!(state.grid().len(), 10);
        assert!(!state.has_more());
    }

    #[test]
    fn test_load_more_then_filter_resets_page() {
        let mut state = MuseumState::new(museum(), 24);
        assert_eq!(state.load_more(), 24);
        assert_eq!(state.load_more(), 2);
        assert_eq!(state.load_more(), 0);
        assert_eq!(state.grid().len(), 50);
        assert!(!state.has_more());

        let names: Vec<_> = state.grid().iter().map(|c| c.catalog_index).collect();
        assert_eq!(names, (0..50).collect::<Vec<_>>());

        state.set_query("specimen");
        assert_eq!(state.pager().page(), 1);
        assert_eq!(state.grid().len(), 24);
    }

    #[test]
    fn test_unknown_selection_rejected() {
        let mut state = MuseumState::new(museum(), 24);
        assert!(!state.select(Selection::Subcategory {
            category: "Fluorite".into(),
            subcategory: "Amethyst".into(),
        }));
        assert!(!state.select(Selection::Category("Meteorites".into())));
        assert_eq!(*state.selection(), Selection::All);
    }

    #[test]
    fn test_reset_returns_full_catalog() {
        let mut state = MuseumState::new(museum(), 24);
        state.select(amethyst());
        state.set_query("07");
        state.set_inputs(FilterInputs {
            size: Some(SpecimenSize::Cabinet),
            weight_min: "10".into(),
            ..Default::default()
        });
        assert_eq!(state.filtered_count(), 0);

        state.reset_filters();
        assert_eq!(state.filtered_count(), 50);
        assert_eq!(*state.selection(), Selection::All);
        assert_eq!(state.nav().active(state.selection()), Some(0));
        assert_eq!(*state.inputs(), FilterInputs::default());
    }

    #[test]
    fn test_all_clears_subcategory() {
        let mut state = MuseumState::new(museum(), 24);
        state.select(amethyst());
        state.select(Selection::All);
        assert_eq!(state.selection().subcategory(), None);
        assert_eq!(state.filtered_count(), 50);
    }

    #[test]
    fn test_modal_from_rendered_card() {
        let mut s = specimen("Fluorite Cube", "Halides");
        s.images = vec!["img/f2.jpg".into(), "img/f3.jpg".into()];
        let mut state = MuseumState::new(vec![s], 24);

        // Keys do nothing before a card is opened
        assert!(!state.handle_modal(ModalEvent::Key(ModalKey::ArrowRight)));

        assert!(state.open_card(0));
        assert_eq!(state.modal().gallery().unwrap().len(), 3);
        assert_eq!(state.modal().gallery().unwrap().index(), 0);

        state.handle_modal(ModalEvent::Key(ModalKey::ArrowLeft));
        assert_eq!(state.modal().main_image(), Some("img/f3.jpg"));

        state.handle_modal(ModalEvent::Key(ModalKey::Escape));
        assert!(!state.modal().is_open());
        assert!(!state.open_card(5));
    }

    #[test]
    fn test_empty_catalog() {
        let mut state = MuseumState::new(Vec::new(), 24);
        assert_eq!(state.grid().len(), 0);
        assert!(!state.has_more());
        assert_eq!(state.load_more(), 0);
        state.set_query("quartz");
        state.reset_filters();
        assert_eq!(state.nav().entries().len(), 1);
    }
}
