use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is when encoding a filter. The diagnostics query grammar expects these
/// unescaped, along with the RFC 3986 unreserved characters.
const FILTER_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'@')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'!')
    .remove(b'+')
    .remove(b'=')
    .remove(b':')
    .remove(b';')
    .remove(b',')
    .remove(b'?')
    .remove(b'/')
    .remove(b'\'');

/// A filter expression that is ready to be placed in a query string.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub struct EncodedFilter(String);

impl EncodedFilter {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Build the filter selecting crash events reported by `node_id`.
///
/// The expression is a JSON array of keyword predicates on `Node.ID` and `Type`. The node id is
/// not validated, an empty id matches the empty keyword.
pub fn build_crash_filter(node_id: &str) -> EncodedFilter {
    let expression = serde_json::json!([
        { "f": "Node.ID", "o": "keyword", "v": [node_id] },
        { "f": "Type", "o": "keyword", "v": ["crash"] },
    ]);

    EncodedFilter(utf8_percent_encode(&expression.to_string(), FILTER_ENCODE_SET).to_string())
}
