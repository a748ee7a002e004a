use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use common::{
    error::{AppError, Res},
    jwt::Role,
};
use store::{Store, models::user::User};

use crate::dtos::auth::LoginRequest;

/// Authenticates a seeded sandbox account.
/// Unknown email or wrong password is a 401; the merchant and admin login
/// endpoints each only accept their own role.
pub fn authenticate(store: &Store, login_data: &LoginRequest, required_role: Role) -> Res<User> {
    let user = store::user::get_user_by_email(store, &login_data.email)
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::Internal(format!("Corrupt password hash: {}", e)))?;
    let is_valid = Argon2::default()
        .verify_password(login_data.password.as_bytes(), &parsed_hash)
        .is_ok();

    if !is_valid {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }
    if user.role != required_role {
        return Err(AppError::Unauthorized(
            "Account not permitted on this login".to_string(),
        ));
    }
    Ok(user)
}
