use crate::render::prologue;
use wep_model::vocab::SCHEMA;

/// Binds `?count`.
pub fn total_articles() -> String {
    format!(
        "{}SELECT (COUNT(DISTINCT ?article) AS ?count)\nWHERE {{ ?article a schema:NewsArticle . }}\n",
        prologue(&[SCHEMA])
    )
}

/// Binds `?count`. Authors are counted by resource, so equal names count once.
pub fn total_authors() -> String {
    format!(
        "{}SELECT (COUNT(DISTINCT ?author) AS ?count)\nWHERE {{ ?article a schema:NewsArticle ; schema:author ?author . }}\n",
        prologue(&[SCHEMA])
    )
}

/// Binds `?language` and `?count`, most frequent first.
pub fn articles_by_language() -> String {
    format!(
        "{}SELECT ?language (COUNT(DISTINCT ?article) AS ?count)
WHERE {{ ?article a schema:NewsArticle ; schema:inLanguage ?language . }}
GROUP BY ?language
ORDER BY DESC(?count) ?language
",
        prologue(&[SCHEMA])
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use spargebra::Query;

    #[test]
    fn statistics_queries_parse() {
        for query in [total_articles(), total_authors(), articles_by_language()] {
            Query::parse(&query, None).unwrap_or_else(|e| panic!("{e}\n{query}"));
        }
    }
}
