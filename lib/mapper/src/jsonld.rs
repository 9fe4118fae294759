use crate::resolved::ResolvedArticle;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use wep_model::vocab::SCHEMA_ORG;
use wep_model::{Article, UriScheme};

pub const PUBLISHER_NAME: &str = "News Provenance Platform";
const DEFAULT_LICENSE: &str = "https://creativecommons.org/licenses/by/4.0/";

/// Maps an article onto a schema.org `NewsArticle` JSON-LD document.
pub fn to_json_ld(article: &Article, uris: &UriScheme) -> Value {
    to_json_ld_at(article, uris, Utc::now())
}

/// Like [`to_json_ld`], with `now` standing in for absent timestamps.
pub fn to_json_ld_at(article: &Article, uris: &UriScheme, now: DateTime<Utc>) -> Value {
    let r = ResolvedArticle::new(article, uris, now);
    json!({
        "@context": SCHEMA_ORG,
        "@type": "NewsArticle",
        "@id": r.article_uri,
        "headline": article.title,
        "articleBody": article.content,
        "author": {
            "@type": "Person",
            "@id": r.author_uri,
            "name": article.author,
        },
        "datePublished": r.created,
        "dateModified": r.modified,
        "inLanguage": article.language.as_str(),
        "description": r.description,
        "url": r.url,
        "wordCount": r.word_count,
        "encodingFormat": article.content_type.as_str(),
        "license": article.license.as_deref().unwrap_or(DEFAULT_LICENSE),
        "copyrightHolder": {
            "@type": "Person",
            "name": article.author,
        },
        "publisher": {
            "@type": "Organization",
            "name": PUBLISHER_NAME,
            "url": uris.resource_base(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::to_turtle_at;
    use chrono::TimeZone;
    use wep_model::{ArticleInput, UriScheme};

    fn article(content: &str) -> Article {
        ArticleInput {
            title: Some("AI in newsrooms".to_owned()),
            content: Some(content.to_owned()),
            author: Some("Ion Popescu".to_owned()),
            language: Some("ro".to_owned()),
            content_type: Some("multimedia".to_owned()),
            ..ArticleInput::default()
        }
        .validate("x9")
        .unwrap()
    }

    #[test]
    fn maps_fields_onto_news_article() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let doc = to_json_ld_at(&article("one two three"), &UriScheme::default(), now);

        assert_eq!(doc["@type"], "NewsArticle");
        assert_eq!(doc["@id"], "http://news-provenance.org/article/x9");
        assert_eq!(
            doc["author"]["@id"],
            "http://news-provenance.org/author/Ion%20Popescu"
        );
        assert_eq!(doc["copyrightHolder"]["name"], "Ion Popescu");
        assert_eq!(doc["publisher"]["name"], PUBLISHER_NAME);
        assert_eq!(doc["publisher"]["url"], "http://news-provenance.org");
        assert_eq!(doc["datePublished"], "2024-01-02T03:04:05.000Z");
        assert_eq!(doc["dateModified"], "2024-01-02T03:04:05.000Z");
        assert_eq!(doc["description"], "AI in newsrooms");
        assert_eq!(doc["encodingFormat"], "multimedia");
        assert_eq!(doc["inLanguage"], "ro");
        assert_eq!(doc["license"], DEFAULT_LICENSE);
    }

    #[test]
    fn word_count_agrees_with_turtle() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let uris = UriScheme::default();
        for content in ["hello world", "  spaced\tout\n\ncontent  ", "single"] {
            let article = article(content);
            let json_count = to_json_ld_at(&article, &uris, now)["wordCount"]
                .as_u64()
                .unwrap();
            let turtle = to_turtle_at(&article, &uris, now);
            assert!(
                turtle.contains(&format!("schema:wordCount \"{json_count}\"^^xsd:integer")),
                "{content:?} disagrees between formats"
            );
        }
    }
}
