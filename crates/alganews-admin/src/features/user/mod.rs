mod state;
mod update;

pub use state::UserState;
pub use update::handle_user_event;
