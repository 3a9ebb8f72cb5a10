//! The only client-side persisted state: a single serialized
//! `current_user` blob restoring the login session across restarts.

use crate::{
    core::{
        ArchipelagoError,
        User,
    },
    persistence,
};

const CURRENT_USER_FILE: &str = "current_user.json";

pub fn save(user: &User) -> Result<(), ArchipelagoError> {
    persistence::save_json(user, CURRENT_USER_FILE)
}

/// A corrupt or unreadable blob degrades to "not logged in" rather than
/// blocking startup.
pub fn load() -> Option<User> {
    match persistence::load_json::<User>(CURRENT_USER_FILE) {
        Ok(user) => user,
        Err(err) => {
            eprintln!("Failed to load session: {}. Treating as logged out.", err);
            None
        }
    }
}

pub fn clear() -> Result<(), ArchipelagoError> {
    persistence::delete_data_file(CURRENT_USER_FILE)
}

pub fn exists() -> bool {
    persistence::data_file_exists(CURRENT_USER_FILE)
}
