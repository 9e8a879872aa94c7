use axum::http::{header::InvalidHeaderValue, HeaderValue};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn cookie(
    name: &str,
    value: &str,
    max_age_secs: u64,
    secure: bool,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = if secure { "; Secure" } else { "" };
    format!("{name}={value}; HttpOnly; Max-Age={max_age_secs}; Path=/; SameSite=Strict{secure}")
        .parse()
}

pub fn clear_cookie(name: &str, secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    cookie(name, "", 0, secure)
}
