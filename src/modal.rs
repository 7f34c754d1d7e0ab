//! Specimen detail modal
//!
//! Two states: closed, or open on one card with its gallery cursor.
//! Every interaction arrives as a [`ModalEvent`]; key events are ignored
//! while closed.

use crate::card::Card;
use crate::gallery::Gallery;

/// Keys the modal reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKey {
    Escape,
    ArrowLeft,
    ArrowRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    Key(ModalKey),
    CloseClicked,
    /// Click on the dimmed area outside the content
    BackdropClicked,
    ThumbnailClicked(usize),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Modal {
    #[default]
    Closed,
    Open { card: Box<Card>, gallery: Gallery },
}

impl Modal {
    /// Show `card`, replacing whatever was open
    pub fn open(&mut self, card: Card) {
        tracing::debug!("Opening detail for '{}' ({} images)", card.name, card.gallery.len());
        let gallery = Gallery::new(card.gallery.clone());
        *self = Modal::Open { card: Box::new(card), gallery };
    }

    pub fn close(&mut self) {
        *self = Modal::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Modal::Open { .. })
    }

    pub fn card(&self) -> Option<&Card> {
        match self {
            Modal::Open { card, .. } => Some(card),
            Modal::Closed => None,
        }
    }

    pub fn gallery(&self) -> Option<&Gallery> {
        match self {
            Modal::Open { gallery, .. } => Some(gallery),
            Modal::Closed => None,
        }
    }

    /// Image currently shown large
    pub fn main_image(&self) -> Option<&str> {
        self.gallery().and_then(Gallery::current)
    }

    /// Apply one interaction; returns whether it changed anything
    pub fn handle(&mut self, event: ModalEvent) -> bool {
        let Modal::Open { gallery, .. } = self else {
            return false;
        };

        match event {
            ModalEvent::Key(ModalKey::Escape) | ModalEvent::CloseClicked | ModalEvent::BackdropClicked => {
                self.close();
                true
            }
            ModalEvent::Key(ModalKey::ArrowLeft) => {
                let before = gallery.index();
                gallery.previous();
                gallery.index() != before
            }
            ModalEvent::Key(ModalKey::ArrowRight) => {
                let before = gallery.index();
                gallery.next();
                gallery.index() != before
            }
            ModalEvent::ThumbnailClicked(index) => gallery.select(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::specimen;

    fn card_with_extras(extras: usize) -> Card {
        let mut s = specimen("Fluorite", "Halides");
        s.images = (0..extras).map(|i| format!("img/extra-{}.jpg", i)).collect();
        Card::new(0, &s, None)
    }

    #[test]
    fn test_open_builds_gallery() {
        let mut modal = Modal::default();
        modal.open(card_with_extras(2));

        let gallery = modal.gallery().unwrap();
        assert_eq!(gallery.len(), 3);
        assert_eq!(gallery.index(), 0);
        assert_eq!(modal.main_image(), Some("img/fluorite.jpg"));
    }

    #[test]
    fn test_keys_inert_while_closed() {
        let mut modal = Modal::Closed;
        assert!(!modal.handle(ModalEvent::Key(ModalKey::ArrowRight)));
        assert!(!modal.handle(ModalEvent::Key(ModalKey::Escape)));
        assert_eq!(modal, Modal::Closed);
    }

    #[test]
    fn test_arrow_navigation_wraps() {
        let mut modal = Modal::default();
        modal.open(card_with_extras(2));

        modal.handle(ModalEvent::Key(ModalKey::ArrowLeft));
        assert_eq!(modal.main_image(), Some("img/extra-1.jpg"));
        modal.handle(ModalEvent::Key(ModalKey::ArrowRight));
        assert_eq!(modal.gallery().unwrap().index(), 0);
    }

    #[test]
    fn test_single_image_navigation_noop() {
        let mut modal = Modal::default();
        modal.open(card_with_extras(0));
        assert!(!modal.handle(ModalEvent::Key(ModalKey::ArrowRight)));
        assert!(modal.is_open());
    }

    #[test]
    fn test_thumbnail_keeps_modal_open() {
        let mut modal = Modal::default();
        modal.open(card_with_extras(2));
        assert!(modal.handle(ModalEvent::ThumbnailClicked(2)));
        assert!(modal.is_open());
        assert_eq!(modal.main_image(), Some("img/extra-1.jpg"));
        assert!(!modal.handle(ModalEvent::ThumbnailClicked(7)));
    }

    #[test]
    fn test_close_paths() {
        for event in [
            ModalEvent::Key(ModalKey::Escape),
            ModalEvent::CloseClicked,
            ModalEvent::BackdropClicked,
        ] {
            let mut modal = Modal::default();
            modal.open(card_with_extras(1));
            assert!(modal.handle(event));
            assert!(!modal.is_open());
        }
    }

    #[test]
    fn test_reopen_replaces_and_resets_cursor() {
        let mut modal = Modal::default();
        modal.open(card_with_extras(2));
        modal.handle(ModalEvent::ThumbnailClicked(2));

        let mut other = specimen("Calcite", "Carbonates");
        other.images = vec!["img/c2.jpg".into()];
        modal.open(Card::new(1, &other, None));
        assert_eq!(modal.card().unwrap().name, "Calcite");
        assert_eq!(modal.gallery().unwrap().index(), 0);
    }
}
