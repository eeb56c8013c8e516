// Session and navigation state: current view, focused property, pending
// booking flag, and the transient notification message.

use serde::{Deserialize, Serialize};

use crate::catalog::PropertyId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    #[default]
    Home,
    Search,
    PropertyDetail,
    Profile,
}

// The active transient message. The generation tag identifies which
// scheduled auto-clear may remove it: a clear carrying an older generation
// must not erase a newer message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub view: View,
    pub focused: Option<PropertyId>,
    pub pending_booking: bool,
    pub notification: Option<Notification>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    // No transition is ever rejected; all views are mutually reachable.
    // A supplied id updates the focus, otherwise the focus is kept.
    pub fn navigate(&mut self, view: View, focus: Option<PropertyId>) {
        self.view = view;
        if let Some(id) = focus {
            self.focused = Some(id);
        }
    }

    pub fn post_notification(&mut self, message: impl Into<String>, generation: u64) {
        self.notification = Some(Notification {
            message: message.into(),
            generation,
        });
    }

    // Clear only if the active notification still carries this generation.
    // Returns whether anything was cleared.
    pub fn clear_notification_if(&mut self, generation: u64) -> bool {
        match &self.notification {
            Some(active) if active.generation == generation => {
                self.notification = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear_notification(&mut self) -> bool {
        self.notification.take().is_some()
    }
}
