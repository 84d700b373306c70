mod state;

pub use state::{Notification, NotificationKind, UiState};

use crate::events::UiSliceEvent;

pub fn handle_ui_event(ui: &mut UiState, event: UiSliceEvent) {
    match event {
        UiSliceEvent::SetBreadcrumb(path) => ui.set_breadcrumb(&path),
        UiSliceEvent::Notify(notification) => ui.notifications.push(notification),
        UiSliceEvent::ClearNotifications => ui.notifications.clear(),
    }
}
