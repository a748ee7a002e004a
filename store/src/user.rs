use uuid::Uuid;

use crate::{Store, models::user::User};

pub fn get_user(store: &Store, id: Uuid) -> Option<User> {
    store.users.get(&id).map(|u| u.clone())
}

pub fn get_user_by_email(store: &Store, email: &str) -> Option<User> {
    store
        .users
        .iter()
        .find(|entry| entry.email.eq_ignore_ascii_case(email))
        .map(|entry| entry.clone())
}

pub fn insert_user(store: &Store, user: User) -> User {
    store.users.insert(user.id, user.clone());
    user
}
