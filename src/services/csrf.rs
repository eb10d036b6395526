pub const CSRF_COOKIE: &str = "csrftoken";
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Value of the `csrftoken` cookie in a `document.cookie` style string,
/// or an empty string when it is not set.
pub fn token_from_cookies(cookies: &str) -> String {
    for cookie in cookies.split(';') {
        let mut parts = cookie.trim().splitn(2, '=');
        if parts.next() == Some(CSRF_COOKIE) {
            return parts.next().unwrap_or_default().to_string();
        }
    }
    log::warn!("CSRF token not found");
    String::new()
}

#[cfg(target_arch = "wasm32")]
pub fn document_cookies() -> String {
    use wasm_bindgen::JsCast;

    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
        .and_then(|d| d.cookie().ok())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn document_cookies() -> String {
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_token_among_other_cookies() {
        let cookies = "sessionid=abc; csrftoken=Tok3n; theme=dark";
        assert_eq!(token_from_cookies(cookies), "Tok3n");
    }

    #[test]
    fn missing_token_is_empty() {
        assert_eq!(token_from_cookies(""), "");
        assert_eq!(token_from_cookies("sessionid=abc; xcsrftoken=nope"), "");
    }

    #[test]
    fn keeps_padding_in_value() {
        assert_eq!(token_from_cookies("csrftoken=a=b"), "a=b");
    }
}
