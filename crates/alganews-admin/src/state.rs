//! Application state composition.
//!
//! ## State Hierarchy
//!
//! ```text
//! AdminState
//! ├── settings: AdminSettings   (debounce delay)
//! ├── tasks: TaskSeq            (request/timer id generator)
//! ├── auth: AuthState           (session phase, current user)
//! ├── users: UserState
//! ├── payments: PaymentState
//! ├── payment_form: PaymentFormState
//! ├── cash_flow: CashFlowState  (expenses, revenues, categories)
//! ├── home: HomeState
//! ├── ui: UiState               (route, breadcrumb, notifications)
//! └── overlay: Option<DoubleConfirm>
//! ```

use std::time::Duration;

use alganews_core::config::Config;

use crate::common::TaskSeq;
use crate::features::auth::AuthState;
use crate::features::cash_flow::CashFlowState;
use crate::features::home::HomeState;
use crate::features::payment::{PaymentFormState, PaymentState};
use crate::features::ui::UiState;
use crate::features::user::UserState;
use crate::overlays::DoubleConfirm;

/// Tunables read from the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminSettings {
    pub preview_debounce: Duration,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            preview_debounce: Duration::from_millis(1000),
        }
    }
}

impl From<&Config> for AdminSettings {
    fn from(config: &Config) -> Self {
        Self {
            preview_debounce: config.preview_debounce(),
        }
    }
}

#[derive(Debug, Default)]
pub struct AdminState {
    pub settings: AdminSettings,
    pub tasks: TaskSeq,
    pub auth: AuthState,
    pub users: UserState,
    pub payments: PaymentState,
    pub payment_form: PaymentFormState,
    pub cash_flow: CashFlowState,
    pub home: HomeState,
    pub ui: UiState,
    /// Pending double confirmation, if any.
    pub overlay: Option<DoubleConfirm>,
}

impl AdminState {
    pub fn new(settings: AdminSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }
}
