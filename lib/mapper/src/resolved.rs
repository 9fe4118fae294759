use chrono::{DateTime, Utc};
use wep_model::{timestamp, Article, UriScheme};

/// An article with every default applied. Shared by all serializations.
pub(crate) struct ResolvedArticle<'article> {
    pub article_uri: String,
    pub author_uri: String,
    pub url: String,
    pub description: &'article str,
    pub word_count: u64,
    pub created_at: DateTime<Utc>,
    pub created: String,
    pub modified: String,
}

impl<'article> ResolvedArticle<'article> {
    pub fn new(article: &'article Article, uris: &UriScheme, now: DateTime<Utc>) -> Self {
        let created_at = article.created_or(now);
        Self {
            article_uri: uris.article(&article.id),
            author_uri: uris.author(&article.author),
            url: article.resolved_url(uris),
            description: article.resolved_description(),
            word_count: article.resolved_word_count(),
            created_at,
            created: timestamp::format(&created_at),
            modified: timestamp::format(&article.modified_or(now)),
        }
    }
}
