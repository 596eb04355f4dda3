use serde_json::Value;

/// Reads a nested field out of an untrusted JSON value.
///
/// Walks `path` left to right starting at `root`. If any intermediate
/// value is not an object or does not contain the next key, returns
/// `fallback` immediately. A terminal `null` also yields `fallback`.
///
/// Upstream responses routinely omit nested structures (a zero-result
/// geocode has no `geometry.location`), so every access into them goes
/// through here instead of indexing.
pub fn safe_get<'a>(root: &'a Value, path: &[&str], fallback: &'a Value) -> &'a Value {
    let mut cur = root;
    for key in path {
        match cur.as_object().and_then(|obj| obj.get(*key)) {
            Some(next) => cur = next,
            None => return fallback,
        }
    }
    if cur.is_null() {
        fallback
    } else {
        cur
    }
}
