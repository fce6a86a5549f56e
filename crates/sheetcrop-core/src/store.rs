//! The single source of truth for the current crop rectangle.
//!
//! [`RectangleStore`] owns the image-space rectangle and its [`Provenance`]
//! and notifies subscribers synchronously on every committed change. Only the
//! drag controller and the suggestion pipeline write to it, never both at
//! once: a suggestion goes through [`RectangleStore::seed`], which refuses to
//! overwrite a rectangle the user has already adjusted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::ImageRect;

/// Where the current rectangle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Provenance {
    /// Seeded by a suggestion or the default region.
    #[default]
    Guessed,
    /// Committed by a drag gesture.
    UserAdjusted,
}

impl Provenance {
    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::Guessed => "guessed",
            Provenance::UserAdjusted => "userAdjusted",
        }
    }
}

/// Handle returned by [`RectangleStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ImageRect)>;

/// Current rectangle plus provenance, with change notification.
pub struct RectangleStore {
    rect: ImageRect,
    provenance: Provenance,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl RectangleStore {
    /// Create a store holding a guessed `rect`.
    pub fn new(rect: ImageRect) -> Self {
        Self {
            rect,
            provenance: Provenance::Guessed,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn rect(&self) -> ImageRect {
        self.rect
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn is_user_adjusted(&self) -> bool {
        self.provenance == Provenance::UserAdjusted
    }

    /// Overwrite rectangle and provenance, then notify.
    pub fn set(&mut self, rect: ImageRect, provenance: Provenance) {
        self.rect = rect;
        self.provenance = provenance;
        self.notify();
    }

    /// Apply a guessed rectangle unless the user has already adjusted.
    ///
    /// Returns whether the rectangle was applied.
    pub fn seed(&mut self, rect: ImageRect) -> bool {
        if self.is_user_adjusted() {
            return false;
        }
        self.set(rect, Provenance::Guessed);
        true
    }

    /// Start over for a new image: the provenance guard is cleared.
    pub fn reset(&mut self, rect: ImageRect) {
        self.set(rect, Provenance::Guessed);
    }

    /// Register a listener called with the new rectangle on every change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ImageRect) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        let rect = self.rect;
        for (_, listener) in self.listeners.iter_mut() {
            listener(&rect);
        }
    }
}

impl fmt::Debug for RectangleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RectangleStore")
            .field("rect", &self.rect)
            .field("provenance", &self.provenance)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
