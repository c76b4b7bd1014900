// Trusted origin matching.
//
// Configured origins are compared by origin (scheme, host, port), so a
// trailing slash or path in the configured value does not matter. Patterns
// may use `*` and `?` wildcards, either on the whole origin
// (`https://*.example.com`) or on the host alone (`*.example.com`).

/// Extract the origin (scheme + host + port) from an absolute URL.
pub fn get_origin(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    })
}

/// Extract the host from an absolute URL.
pub fn get_host(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}

/// Match a request URL against one configured origin pattern.
pub fn matches_origin_pattern(url: &str, pattern: &str) -> bool {
    let has_wildcard = pattern.contains('*') || pattern.contains('?');

    if has_wildcard {
        if pattern.contains("://") {
            let url_origin = get_origin(url).unwrap_or_default();
            return wildcard_match(pattern.trim_end_matches('/'), &url_origin);
        }
        let host = get_host(url).unwrap_or_default();
        return wildcard_match(pattern, &host);
    }

    match (get_origin(url), get_origin(pattern)) {
        (Some(url_origin), Some(pattern_origin)) => url_origin == pattern_origin,
        _ => false,
    }
}

/// Check a URL against every trusted origin.
pub fn is_trusted_origin(url: &str, trusted_origins: &[String]) -> bool {
    trusted_origins
        .iter()
        .any(|origin| matches_origin_pattern(url, origin))
}

/// `*` matches any run of characters, `?` exactly one.
fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    wildcard_match_inner(&pattern, &text)
}

fn wildcard_match_inner(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('*', rest)) => (0..=text.len()).any(|i| wildcard_match_inner(rest, &text[i..])),
        Some(('?', rest)) => !text.is_empty() && wildcard_match_inner(rest, &text[1..]),
        Some((c, rest)) => text.first() == Some(c) && wildcard_match_inner(rest, &text[1..]),
    }
}
