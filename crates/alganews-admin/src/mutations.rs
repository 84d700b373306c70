//! Cross-slice state mutations.
//!
//! Feature handlers and middleware return these to request changes outside
//! their own slice. The main reducer applies them in order.

use crate::routes::Route;
use crate::ui::Notification;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateMutation {
    /// Queue a user-visible notification.
    Notify(Notification),
    /// Change the current route and load its data.
    Navigate(Route),
}
