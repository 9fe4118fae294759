use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything JavaScript's `encodeURIComponent` escapes. Author URIs were historically minted with
/// it, so we must produce the same bytes to land on the same resources.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const DEFAULT_RESOURCE_BASE: &str = "http://news-provenance.org";
pub const DEFAULT_PUBLIC_BASE: &str = "http://localhost:3000";

/// Mints the URIs of articles and authors.
///
/// Two bases are involved: the *resource* base names RDF subjects (`{base}/article/{id}`), while
/// the *public* base is where humans (and QR codes) find an article (`{public}/articles/{id}`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UriScheme {
    resource_base: String,
    public_base: String,
}

impl UriScheme {
    pub fn new(resource_base: impl Into<String>, public_base: impl Into<String>) -> Self {
        Self {
            resource_base: trim_slash(resource_base.into()),
            public_base: trim_slash(public_base.into()),
        }
    }

    pub fn resource_base(&self) -> &str {
        &self.resource_base
    }

    pub fn public_base(&self) -> &str {
        &self.public_base
    }

    /// The subject URI of an article.
    pub fn article(&self, id: &str) -> String {
        format!("{}/article/{id}", self.resource_base)
    }

    /// The prefix shared by all article subject URIs.
    pub fn article_namespace(&self) -> String {
        format!("{}/article/", self.resource_base)
    }

    /// Recovers the id from an article subject URI.
    pub fn article_id<'uri>(&self, uri: &'uri str) -> Option<&'uri str> {
        uri.strip_prefix(self.resource_base.as_str())?
            .strip_prefix("/article/")
            .filter(|id| !id.is_empty())
    }

    /// The subject URI of an author. Authors are identified by their display name only.
    pub fn author(&self, name: &str) -> String {
        format!(
            "{}/author/{}",
            self.resource_base,
            utf8_percent_encode(name, URI_COMPONENT)
        )
    }

    /// The canonical public URL of an article.
    pub fn public_url(&self, id: &str) -> String {
        format!("{}/articles/{id}", self.public_base)
    }
}

impl Default for UriScheme {
    fn default() -> Self {
        Self::new(DEFAULT_RESOURCE_BASE, DEFAULT_PUBLIC_BASE)
    }
}

fn trim_slash(mut value: String) -> String {
    while value.ends_with('/') {
        value.pop();
    }
    value
}
