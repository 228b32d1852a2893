//! Change notification for editor state.
//!
//! Renderers subscribe a listener and redraw when it fires. Each applied
//! editor operation emits exactly one [`Change`]; rejected operations emit none.

use std::fmt;

/// Handle returned by [`PolygonEditor::subscribe`](super::PolygonEditor::subscribe).
pub type SubscriptionId = u64;

/// What part of the editor state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    /// Vertices were added, moved, inserted or removed.
    Vertices,
    /// The active tool mode changed.
    Mode,
    /// A vertex drag started or ended.
    Drag,
    /// The prospective point moved or was cleared.
    Hover,
    /// A new image was loaded.
    Image,
    /// The whole polygon was cleared.
    Cleared,
}

impl Change {
    pub fn name(&self) -> &'static str {
        match self {
            Change::Vertices => "vertices",
            Change::Mode => "mode",
            Change::Drag => "drag",
            Change::Hover => "hover",
            Change::Image => "image",
            Change::Cleared => "cleared",
        }
    }
}

type Listener = Box<dyn FnMut(Change)>;

/// Registered change listeners, notified in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: SubscriptionId,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, change: Change) {
        for (_, listener) in &mut self.entries {
            listener(change);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
