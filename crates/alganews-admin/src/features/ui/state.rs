use alganews_core::sdk::{ApiError, ApiErrorKind};

use crate::routes::Route;

const NETWORK_DESCRIPTION: &str = "Erro na rede";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub description: Option<String>,
    /// One line per field-level message.
    pub details: Vec<String>,
}

impl Notification {
    pub fn success(message: &str) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.to_string(),
            description: None,
            details: Vec::new(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.to_string(),
            description: None,
            details: Vec::new(),
        }
    }

    pub fn from_api_error(err: &ApiError) -> Self {
        let description = (err.kind() == ApiErrorKind::Network)
            .then(|| NETWORK_DESCRIPTION.to_string());
        let details = err
            .field_messages()
            .iter()
            .map(|field| field.user_message.clone())
            .collect();

        Self {
            kind: NotificationKind::Error,
            message: err.message().to_string(),
            description,
            details,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub route: Route,
    pub breadcrumb: Vec<String>,
    pub notifications: Vec<Notification>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            route: Route::Home,
            breadcrumb: vec![Route::Home.breadcrumb().to_string()],
            notifications: Vec::new(),
        }
    }
}

impl UiState {
    pub fn set_breadcrumb(&mut self, path: &str) {
        self.breadcrumb = path
            .split('/')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
    }

    pub fn set_route(&mut self, route: Route) {
        self.set_breadcrumb(route.breadcrumb());
        self.route = route;
    }

    /// Removes and returns every pending notification.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
