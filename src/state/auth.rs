use crate::api::ApiError;

pub(crate) const ACCOUNT_MISSING: &str = "Account does not exist. Please register first.";
pub(crate) const LOGIN_FAILED: &str = "Login failed. Please check your username and password.";
pub(crate) const USERNAME_TAKEN: &str = "Username already exists.";
pub(crate) const NICKNAME_TAKEN: &str = "Nickname already exists.";
pub(crate) const REGISTER_BAD_REQUEST: &str =
    "Registration failed: invalid parameters or server error.";
pub(crate) const REGISTER_FAILED: &str = "Registration failed. Please try again.";

/// Error bodies arrive either raw or as a JSON string.
fn body_text(e: &ApiError) -> &str {
    e.body.trim().trim_matches('"')
}

pub(crate) fn login_error_message(e: &ApiError) -> &'static str {
    if e.status == Some(400) {
        ACCOUNT_MISSING
    } else {
        LOGIN_FAILED
    }
}

pub(crate) fn register_error_message(e: &ApiError) -> &'static str {
    match body_text(e) {
        "Username already exists" => USERNAME_TAKEN,
        "Nickname already exists" => NICKNAME_TAKEN,
        _ if e.status == Some(400) => REGISTER_BAD_REQUEST,
        _ => REGISTER_FAILED,
    }
}
