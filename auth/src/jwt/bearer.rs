/// Authorization scheme prefix, including the single separating space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization` header value.
///
/// Only the exact form `Bearer <token>` is recognised: the scheme word is
/// case-sensitive, followed by exactly one space and a non-empty token.
pub fn extract_bearer_token(header: Option<&str>) -> Option<&str> {
    let token = header?.strip_prefix(BEARER_PREFIX)?;

    if token.is_empty() || token.starts_with(char::is_whitespace) {
        return None;
    }

    Some(token)
}
