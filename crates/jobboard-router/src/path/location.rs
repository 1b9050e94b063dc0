/// Splitting of a requested location into path, query and fragment
use std::borrow::Cow;

/// A requested location broken into its parts
///
/// `path` is the raw path portion, not yet normalized.
///
/// # Examples
///
/// ```
/// use jobboard_router::path::Location;
///
/// let loc = Location::parse("/jobs?page=2&sort=new#top");
/// assert_eq!(loc.path, "/jobs");
/// assert_eq!(loc.query, vec![
///     ("page".to_string(), "2".to_string()),
///     ("sort".to_string(), "new".to_string()),
/// ]);
/// assert_eq!(loc.hash.as_deref(), Some("top"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location<'a> {
    pub path: &'a str,
    pub query: Vec<(String, String)>,
    pub hash: Option<String>,
}

impl<'a> Location<'a> {
    /// Splits `raw` on the first `#`, then on the first `?` of what remains
    pub fn parse(raw: &'a str) -> Self {
        let (rest, hash) = match raw.split_once('#') {
            Some((rest, hash)) => (rest, Some(decode_component(hash).into_owned())),
            None => (raw, None),
        };

        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (rest, Vec::new()),
        };

        Location { path, query, hash }
    }
}

/// Parses a `key=value&flag` query string into decoded pairs
///
/// `+` is read as a space, keys without `=` get an empty value and empty keys are skipped.
/// Order and duplicates are preserved.
///
/// # Examples
///
/// ```
/// use jobboard_router::path::parse_query;
///
/// let pairs = parse_query("q=rust+dev&remote&type=full%20time");
/// assert_eq!(pairs[0], ("q".to_string(), "rust dev".to_string()));
/// assert_eq!(pairs[1], ("remote".to_string(), String::new()));
/// assert_eq!(pairs[2], ("type".to_string(), "full time".to_string()));
/// ```
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if key.is_empty() {
                return None;
            }
            let key = decode_component(&key.replace('+', " ")).into_owned();
            let value = decode_component(&value.replace('+', " ")).into_owned();
            Some((key, value))
        })
        .collect()
}

/// Percent-decodes a URL component, falling back to the raw text on malformed input
pub(crate) fn decode_component(raw: &str) -> Cow<'_, str> {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded,
        Err(_) => {
            tracing::debug!(component = raw, "keeping malformed percent-encoding as-is");
            Cow::Borrowed(raw)
        }
    }
}
