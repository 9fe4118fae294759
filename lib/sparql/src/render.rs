//! The one place where values become SPARQL text.

use crate::criteria::{Condition, Criteria, Criterion, Operator, Value};
use chrono::{DateTime, Utc};
use std::fmt::{self, Display, Formatter, Write};
use wep_mapper::escape_literal;
use wep_model::timestamp;
use wep_model::vocab::Prefix;

/// `"value"` with the content escaped.
pub fn string_literal(value: &str) -> String {
    format!("\"{}\"", escape_literal(value))
}

/// `"…"^^xsd:dateTime`. Requires the `xsd` prefix in the prologue.
pub fn date_time_literal(value: &DateTime<Utc>) -> String {
    format!("\"{}\"^^xsd:dateTime", timestamp::format(value))
}

/// `PREFIX` declarations followed by an empty line.
pub fn prologue(prefixes: &[Prefix]) -> String {
    let mut prologue = String::new();
    for prefix in prefixes {
        prologue.push_str(&prefix.sparql());
        prologue.push('\n');
    }
    prologue.push('\n');
    prologue
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(&string_literal(text)),
            Value::DateTime(value) => f.write_str(&date_time_literal(value)),
            // NamedNode renders as `<iri>` and was validated on construction.
            Value::Iri(iri) => write!(f, "{iri}"),
        }
    }
}

impl Display for Criterion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let variable = self.field.variable();
        match self.operator {
            Operator::Equals => write!(f, "?{variable} = {}", self.value),
            Operator::ContainsIgnoreCase => {
                write!(f, "CONTAINS(LCASE(STR(?{variable})), LCASE({}))", self.value)
            }
            Operator::After => write!(f, "?{variable} > {}", self.value),
            Operator::Before => write!(f, "?{variable} < {}", self.value),
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let separator = match self {
            Condition::All(_) => " && ",
            Condition::Any(_) => " || ",
        };
        f.write_str("FILTER(")?;
        for (i, criterion) in self.criteria().iter().enumerate() {
            if i > 0 {
                f.write_str(separator)?;
            }
            write!(f, "{criterion}")?;
        }
        f.write_char(')')
    }
}

/// Every condition on its own indented line, each followed by a newline.
impl Display for Criteria {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for condition in self.conditions() {
            writeln!(f, "  {condition}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::Field;
    use chrono::TimeZone;

    #[test]
    fn renders_operators() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            Criterion::contains(Field::Title, "AI").to_string(),
            r#"CONTAINS(LCASE(STR(?title)), LCASE("AI"))"#
        );
        assert_eq!(
            Criterion::equals(Field::Language, Value::text("en")).to_string(),
            r#"?language = "en""#
        );
        assert_eq!(
            Criterion::after(Field::Date, date).to_string(),
            r#"?date > "2024-01-01T00:00:00.000Z"^^xsd:dateTime"#
        );
        assert_eq!(
            Criterion::before(Field::Date, date).to_string(),
            r#"?date < "2024-01-01T00:00:00.000Z"^^xsd:dateTime"#
        );
        assert_eq!(
            Criterion::equals(Field::Resource, Value::iri("http://a.org/x").unwrap())
                .to_string(),
            "?resource = <http://a.org/x>"
        );
    }

    #[test]
    fn renders_groups() {
        let criteria = Criteria::new()
            .with(Criterion::equals(Field::Language, Value::text("ro")))
            .with(Condition::Any(vec![
                Criterion::contains(Field::Title, "x"),
                Criterion::contains(Field::Description, "x"),
            ]));
        assert_eq!(
            criteria.to_string(),
            "  FILTER(?language = \"ro\")\n  FILTER(CONTAINS(LCASE(STR(?title)), LCASE(\"x\")) || CONTAINS(LCASE(STR(?description)), LCASE(\"x\")))\n"
        );
    }

    #[test]
    fn text_cannot_break_out_of_its_literal() {
        let rendered = Criterion::contains(Field::Title, "\") || true || (\"").to_string();
        assert_eq!(
            rendered,
            r#"CONTAINS(LCASE(STR(?title)), LCASE("\") || true || (\""))"#
        );
    }
}
