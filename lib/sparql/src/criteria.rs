//! A small filter model. Queries never splice user input into SPARQL text directly: they describe
//! their filters as [`Criteria`] and the [`render`](crate::render) module turns them into `FILTER`
//! clauses.

use crate::error::BuildError;
use chrono::{DateTime, NaiveDate, Utc};
use wep_model::{timestamp, NamedNode};

/// A projected variable a criterion can constrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Title,
    Content,
    Author,
    Description,
    Language,
    Date,
    Topic,
    Resource,
    Label,
}

impl Field {
    pub fn variable(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Content => "content",
            Field::Author => "author",
            Field::Description => "description",
            Field::Language => "language",
            Field::Date => "date",
            Field::Topic => "topic",
            Field::Resource => "resource",
            Field::Label => "label",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Equals,
    /// Case-insensitive substring match on the lexical form.
    ContainsIgnoreCase,
    After,
    Before,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Text(String),
    DateTime(DateTime<Utc>),
    Iri(NamedNode),
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    /// Validates `iri` before it can be rendered between angle brackets.
    pub fn iri(iri: &str) -> Result<Self, BuildError> {
        parse_iri(iri).map(Value::Iri)
    }

    /// Accepts an RFC 3339 date-time or a plain `YYYY-MM-DD` date (midnight UTC).
    pub fn date_time(value: &str) -> Result<Self, BuildError> {
        parse_date_time(value).map(Value::DateTime)
    }
}

pub fn parse_iri(iri: &str) -> Result<NamedNode, BuildError> {
    NamedNode::new(iri).map_err(|e| BuildError::InvalidIri {
        iri: iri.to_owned(),
        message: e.to_string(),
    })
}

pub fn parse_date_time(value: &str) -> Result<DateTime<Utc>, BuildError> {
    let value = value.trim();
    if let Ok(ts) = timestamp::parse(value) {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| BuildError::InvalidDateTime(value.to_owned()))
}

/// `{field, operator, value}`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Criterion {
    pub field: Field,
    pub operator: Operator,
    pub value: Value,
}

impl Criterion {
    pub fn new(field: Field, operator: Operator, value: Value) -> Self {
        Self {
            field,
            operator,
            value,
        }
    }

    pub fn equals(field: Field, value: Value) -> Self {
        Self::new(field, Operator::Equals, value)
    }

    pub fn contains(field: Field, text: impl Into<String>) -> Self {
        Self::new(field, Operator::ContainsIgnoreCase, Value::text(text))
    }

    pub fn after(field: Field, value: DateTime<Utc>) -> Self {
        Self::new(field, Operator::After, Value::DateTime(value))
    }

    pub fn before(field: Field, value: DateTime<Utc>) -> Self {
        Self::new(field, Operator::Before, Value::DateTime(value))
    }
}

/// One `FILTER` clause: its criteria joined by `&&` (`All`) or `||` (`Any`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Condition {
    All(Vec<Criterion>),
    Any(Vec<Criterion>),
}

impl Condition {
    pub fn criteria(&self) -> &[Criterion] {
        match self {
            Condition::All(criteria) | Condition::Any(criteria) => criteria,
        }
    }
}

impl From<Criterion> for Condition {
    fn from(criterion: Criterion) -> Self {
        Condition::All(vec![criterion])
    }
}

/// The conjunction of all filter clauses of a query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Criteria {
    conditions: Vec<Condition>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, condition: impl Into<Condition>) -> Self {
        self.push(condition);
        self
    }

    pub fn push(&mut self, condition: impl Into<Condition>) {
        let condition = condition.into();
        if !condition.criteria().is_empty() {
            self.conditions.push(condition);
        }
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
