use crate::error::{FieldError, UnknownCodeError, ValidationErrors};
use crate::uri::UriScheme;
use chrono::{DateTime, Utc};
use oxrdf::NamedNode;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The languages an article may be written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ro,
    Es,
    Fr,
    De,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::En,
        Language::Ro,
        Language::Es,
        Language::Fr,
        Language::De,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ro => "ro",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
        }
    }
}

impl FromStr for Language {
    type Err = UnknownCodeError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|language| language.as_str() == code)
            .ok_or_else(|| UnknownCodeError::new("language", code))
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The medium of an article. Stored as `schema:encodingFormat`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Text,
    Multimedia,
    Audio,
    Video,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Text,
        ContentType::Multimedia,
        ContentType::Audio,
        ContentType::Video,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Multimedia => "multimedia",
            ContentType::Audio => "audio",
            ContentType::Video => "video",
        }
    }
}

impl FromStr for ContentType {
    type Err = UnknownCodeError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|content_type| content_type.as_str() == code)
            .ok_or_else(|| UnknownCodeError::new("content type", code))
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An article as submitted by a client, before validation.
///
/// Every field is optional here so that validation can report *all* missing fields at once instead
/// of failing on the first one during deserialization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
    pub content_type: Option<String>,
    pub description: Option<String>,
    pub word_count: Option<u64>,
    pub url: Option<String>,
    pub license: Option<String>,
    pub source: Option<String>,
}

impl ArticleInput {
    /// Checks the mandatory fields and enumerations and turns the input into an [`Article`] with
    /// the given id.
    pub fn validate(self, id: impl Into<String>) -> Result<Article, ValidationErrors> {
        let mut errors = Vec::new();

        let title = required(self.title, "title", "Title is required", &mut errors);
        let content = required(self.content, "content", "Content is required", &mut errors);
        let author = required(self.author, "author", "Author is required", &mut errors);
        let language = enumerated::<Language>(
            self.language.as_deref(),
            "language",
            "Invalid language",
            &mut errors,
        );
        let content_type = enumerated::<ContentType>(
            self.content_type.as_deref(),
            "contentType",
            "Invalid content type",
            &mut errors,
        );
        let url = match self.url {
            Some(url) if NamedNode::new(url.as_str()).is_err() => {
                errors.push(FieldError::new("url", "Invalid url"));
                None
            }
            url => url,
        };

        match (title, content, author, language, content_type) {
            (Some(title), Some(content), Some(author), Some(language), Some(content_type))
                if errors.is_empty() =>
            {
                Ok(Article {
                    id: id.into(),
                    title,
                    content,
                    author,
                    language,
                    content_type,
                    description: self.description.filter(|d| !d.trim().is_empty()),
                    word_count: self.word_count,
                    created_at: None,
                    updated_at: None,
                    url,
                    license: self.license,
                    source: self.source,
                })
            }
            _ => Err(ValidationErrors(errors)),
        }
    }
}

fn required(
    value: Option<String>,
    field: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Some(value),
        _ => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

fn enumerated<T: FromStr>(
    value: Option<&str>,
    field: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    let parsed = value.and_then(|value| value.parse().ok());
    if parsed.is_none() {
        errors.push(FieldError::new(field, message));
    }
    parsed
}

/// A news article. The triple store is the only owner of articles; instances of this type are
/// always re-derived from a query or about to be written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub language: Language,
    pub content_type: ContentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::timestamp::option"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::timestamp::option"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Article {
    /// The supplied word count, or the number of whitespace-separated tokens of the content.
    pub fn resolved_word_count(&self) -> u64 {
        self.word_count
            .unwrap_or_else(|| word_count(&self.content))
    }

    /// The supplied description, or the title.
    pub fn resolved_description(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.title)
    }

    /// The supplied url, or the canonical public URL.
    pub fn resolved_url(&self, uris: &UriScheme) -> String {
        self.url
            .clone()
            .unwrap_or_else(|| uris.public_url(&self.id))
    }

    /// The creation time, defaulting to `now`.
    pub fn created_or(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.created_at.unwrap_or(now)
    }

    /// The last modification time: the update time, then the creation time, then `now`.
    pub fn modified_or(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.updated_at.or(self.created_at).unwrap_or(now)
    }

    /// Fills in every derived field so that clients see what is actually stored.
    pub fn resolve_defaults(&mut self, uris: &UriScheme) {
        self.word_count = Some(self.resolved_word_count());
        self.description = Some(self.resolved_description().to_owned());
        self.url = Some(self.resolved_url(uris));
    }
}

/// One row of an article listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub date: String,
    pub language: String,
    pub description: String,
}

/// Counts the whitespace-separated tokens of `content`.
pub fn word_count(content: &str) -> u64 {
    content.split_whitespace().count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ArticleInput {
        ArticleInput {
            title: Some("T".to_owned()),
            content: Some("hello world".to_owned()),
            author: Some("A".to_owned()),
            language: Some("en".to_owned()),
            content_type: Some("text".to_owned()),
            ..ArticleInput::default()
        }
    }

    #[test]
    fn word_count_splits_on_any_whitespace() {
        assert_eq!(word_count("hello world"), 2);
        assert_eq!(word_count("  hello\n\tworld  again "), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn validate_accepts_complete_input() {
        let article = valid_input().validate("id-1").unwrap();
        assert_eq!(article.id, "id-1");
        assert_eq!(article.language, Language::En);
        assert_eq!(article.content_type, ContentType::Text);
        assert_eq!(article.resolved_word_count(), 2);
        assert_eq!(article.resolved_description(), "T");
    }

    #[test]
    fn validate_reports_every_offending_field() {
        let input = ArticleInput {
            title: Some("   ".to_owned()),
            author: None,
            language: Some("xx".to_owned()),
            content_type: Some("podcast".to_owned()),
            ..valid_input()
        };
        let errors = input.validate("id").unwrap_err();
        let fields: Vec<_> = errors.fields().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["title", "author", "language", "contentType"]);
        assert_eq!(errors.fields()[2].message, "Invalid language");
    }

    #[test]
    fn validate_rejects_relative_url() {
        let input = ArticleInput {
            url: Some("articles/1".to_owned()),
            ..valid_input()
        };
        let errors = input.validate("id").unwrap_err();
        assert_eq!(errors.fields(), [FieldError::new("url", "Invalid url")]);
    }

    #[test]
    fn explicit_word_count_wins() {
        let input = ArticleInput {
            word_count: Some(10),
            ..valid_input()
        };
        assert_eq!(input.validate("id").unwrap().resolved_word_count(), 10);
    }

    #[test]
    fn input_deserializes_camel_case() {
        let input: ArticleInput = serde_json::from_str(
            r#"{"title":"T","content":"c","author":"A","language":"ro","contentType":"video","wordCount":7}"#,
        )
        .unwrap();
        assert_eq!(input.content_type.as_deref(), Some("video"));
        assert_eq!(input.word_count, Some(7));
    }

    #[test]
    fn article_serializes_timestamps_with_millis() {
        let mut article = valid_input().validate("id").unwrap();
        article.created_at = Some(crate::timestamp::parse("2024-05-01T10:00:00Z").unwrap());
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["createdAt"], "2024-05-01T10:00:00.000Z");
        assert_eq!(json["contentType"], "text");
        assert!(json.get("updatedAt").is_none());
    }

    #[test]
    fn language_round_trips_through_its_code() {
        for language in Language::ALL {
            assert_eq!(language.as_str().parse::<Language>(), Ok(language));
        }
        assert!("EN".parse::<Language>().is_err());
    }
}
