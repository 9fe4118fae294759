use crate::escape::escape_html;
use crate::resolved::ResolvedArticle;
use chrono::{DateTime, Utc};
use wep_model::vocab::SCHEMA_ORG;
use wep_model::{Article, UriScheme};

/// Renders an HTML page that carries the article as RDFa (schema.org vocabulary).
pub fn to_rdfa(article: &Article, uris: &UriScheme) -> String {
    to_rdfa_at(article, uris, Utc::now())
}

/// Like [`to_rdfa`], with `now` standing in for absent timestamps.
pub fn to_rdfa_at(article: &Article, uris: &UriScheme, now: DateTime<Utc>) -> String {
    let r = ResolvedArticle::new(article, uris, now);
    let title = escape_html(&article.title);
    let author = escape_html(&article.author);
    let description = escape_html(r.description);
    let content = escape_html(&article.content);
    let language = article.language.as_str();
    let content_type = article.content_type.as_str();
    let article_uri = escape_html(&r.article_uri);
    let author_uri = escape_html(&r.author_uri);
    let url = escape_html(&r.url);
    let created = &r.created;
    let display_date = r.created_at.format("%Y-%m-%d");
    let word_count = r.word_count;

    format!(
        r#"<!DOCTYPE html>
<html lang="{language}">
<head>
  <meta charset="UTF-8">
  <title>{title}</title>
</head>
<body vocab="{SCHEMA_ORG}" typeof="NewsArticle" resource="{article_uri}">
  <article>
    <h1 property="headline">{title}</h1>

    <div class="metadata">
      <span property="author" typeof="Person" resource="{author_uri}">
        <span property="name">{author}</span>
      </span>

      <time property="datePublished" datetime="{created}">{display_date}</time>

      <meta property="inLanguage" content="{language}">
      <meta property="wordCount" content="{word_count}">
    </div>

    <div property="description">{description}</div>

    <div property="articleBody">
      {content}
    </div>

    <link property="url" href="{url}">
    <meta property="encodingFormat" content="{content_type}">
  </article>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use wep_model::ArticleInput;

    #[test]
    fn annotates_fields_and_escapes_markup() {
        let article = ArticleInput {
            title: Some("<b>Breaking</b>".to_owned()),
            content: Some("x < y & z".to_owned()),
            author: Some("O'Brien".to_owned()),
            language: Some("fr".to_owned()),
            content_type: Some("audio".to_owned()),
            ..ArticleInput::default()
        }
        .validate("r1")
        .unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        let html = to_rdfa_at(&article, &UriScheme::default(), now);

        assert!(html.contains(r#"<html lang="fr">"#));
        assert!(html.contains(
            r#"typeof="NewsArticle" resource="http://news-provenance.org/article/r1""#
        ));
        assert!(html.contains(r#"<h1 property="headline">&lt;b&gt;Breaking&lt;/b&gt;</h1>"#));
        assert!(html.contains(r#"<span property="name">O&#39;Brien</span>"#));
        assert!(html.contains(
            r#"<time property="datePublished" datetime="2024-03-09T12:00:00.000Z">2024-03-09</time>"#
        ));
        assert!(html.contains(r#"<meta property="wordCount" content="5">"#));
        assert!(html.contains("x &lt; y &amp; z"));
        assert!(html.contains(r#"<meta property="encodingFormat" content="audio">"#));
        assert!(!html.contains("<b>"));
    }
}
