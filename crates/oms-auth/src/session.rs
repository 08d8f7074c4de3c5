//! Session token extraction from request headers.

/// Cookie Clerk's frontend SDK stores the session JWT in.
pub const SESSION_COOKIE: &str = "__session";

/// Pull the session token from a request's `Cookie` or `Authorization`
/// header. The cookie wins when both are present.
#[must_use]
pub fn session_token(cookie_header: Option<&str>, authorization: Option<&str>) -> Option<String> {
    cookie_header
        .and_then(|header| cookie_value(header, SESSION_COOKIE))
        .or_else(|| authorization.and_then(bearer_token))
        .map(String::from)
}

fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then_some(value)
    })
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
