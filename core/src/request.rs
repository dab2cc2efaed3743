use bytes::Bytes;
use http::header::HeaderName;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;

/// Description of one request to be signed.
///
/// The descriptor is built fresh for every call and never shared between
/// requests. Values are kept raw: percent-encoding and header normalization
/// happen while signing.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// Host the request is sent to, without scheme or port.
    pub host: String,
    /// Resource path, always starts with `/`.
    pub path: String,
    /// Query pairs, not percent-encoded.
    pub query: Vec<(String, String)>,
    /// Extra headers that must be signed and sent, besides `host` and `x-amz-date`.
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub payload: Bytes,
}

impl SigningRequest {
    /// Create a bodyless request for `/` on `host`.
    pub fn new(method: Method, host: impl Into<String>) -> Self {
        Self {
            method,
            host: host.into(),
            path: "/".to_string(),
            query: Vec::new(),
            headers: Vec::new(),
            payload: Bytes::new(),
        }
    }

    /// Set the resource path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the request body.
    pub fn with_payload(mut self, payload: impl Into<Bytes>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Push a new query pair into query list.
    #[inline]
    pub fn query_push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }

    /// Push a valueless query key like `acl` or `location`.
    #[inline]
    pub fn query_append(&mut self, key: &str) {
        self.query.push((key.to_string(), String::new()));
    }

    /// Push an extra header that must be signed and sent.
    #[inline]
    pub fn header_push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// Convert pairs to a sorted string.
    ///
    /// Pairs are always written as `key{sep}value`, even when the value is empty.
    ///
    /// ```shell
    /// [(c, d), (a, b)] => "a:b\nc:d"
    /// ```
    pub fn pairs_to_string(mut pairs: Vec<(String, String)>, sep: &str, join: &str) -> String {
        let mut s = String::with_capacity(16);

        pairs.sort();

        for (idx, (k, v)) in pairs.into_iter().enumerate() {
            if idx != 0 {
                s.push_str(join);
            }

            s.push_str(&k);
            s.push_str(sep);
            s.push_str(&v);
        }

        s
    }

    /// Normalize a header value by trimming surrounding spaces.
    pub fn header_value_normalize(v: &str) -> &str {
        v.trim_matches(' ')
    }
}

/// Headers produced by signing one request.
///
/// Order is stable: `authorization`, `host`, `x-amz-content-sha256`,
/// `x-amz-date`, then every extra signed header in the order it was supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedHeaders {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl SignedHeaders {
    /// Create an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header, keeping insertion order.
    pub fn push(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.push((name, value));
    }

    /// Get the first header value by name.
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.headers
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Iterate headers in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &(HeaderName, HeaderValue)> {
        self.headers.iter()
    }

    /// Header names in emission order.
    pub fn names(&self) -> Vec<&str> {
        self.headers.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Returns true if no header has been produced.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Write all headers into `headers`, replacing existing values with the same name.
    pub fn apply(self, headers: &mut HeaderMap) {
        for (k, v) in self.headers {
            headers.insert(k, v);
        }
    }
}

impl IntoIterator for SignedHeaders {
    type Item = (HeaderName, HeaderValue);
    type IntoIter = std::vec::IntoIter<(HeaderName, HeaderValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.into_iter()
    }
}
