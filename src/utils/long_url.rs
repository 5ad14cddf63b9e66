/// Trim the submitted URL and accept it only with an http(s) scheme prefix.
///
/// Deliberately loose: anything a browser can follow after `http://` or
/// `https://` is accepted, including URLs a strict parser would reject.
pub fn normalize_long_url(raw: &str) -> Option<String> {
    let url = raw.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Some(url.to_string())
    } else {
        None
    }
}
