use mongodb::bson::{Bson, Document};
use validator::Validate;

use crate::domain::params::{DEFAULT_LIMIT, SearchParams};
use crate::forms::FormError;

const PAGE_KEY: &str = "page";
const LIMIT_KEY: &str = "limit";
const SORT_KEY: &str = "sort";
const FIELDS_KEY: &str = "fields";

#[derive(Debug, Default, PartialEq, Validate)]
/// Search request taken from a query string such as
/// `page=2&limit=10&sort=name,-rank&fields=name,rank&active=true`.
pub struct SearchForm {
    /// Requested 1-based page.
    pub page: Option<i64>,
    /// Requested page size.
    #[validate(range(min = 1, max = 1_000_000))]
    pub limit: Option<u64>,
    /// Sort keys in order, `-` prefixed for descending.
    pub sort: Vec<(String, i32)>,
    /// Fields to include in the projection.
    pub fields: Vec<String>,
    /// Equality filters for every other key.
    pub filters: Vec<(String, Bson)>,
}

impl SearchForm {
    /// Parse and validate a raw query string.
    pub fn parse(query_string: &str) -> Result<Self, FormError> {
        let pairs: Vec<(String, String)> = serde_html_form::from_str(query_string)?;

        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                PAGE_KEY => form.page = Some(parse_number(&key, &value)?),
                LIMIT_KEY => form.limit = Some(parse_number(&key, &value)?),
                SORT_KEY => form.sort = parse_sort(&value)?,
                FIELDS_KEY => form.fields = parse_fields(&value)?,
                _ => {
                    check_field(&key)?;
                    form.filters.push((key, coerce(&value)));
                }
            }
        }

        form.validate()?;
        Ok(form)
    }

    /// Build the search params, falling back to `default_limit` when the
    /// query string gave none.
    pub fn into_params(self, default_limit: Option<u64>) -> SearchParams {
        let mut query = Document::new();
        for (key, value) in self.filters {
            query.insert(key, value);
        }

        let mut sort = Document::new();
        for (key, direction) in self.sort {
            sort.insert(key, direction);
        }

        let mut fields = Document::new();
        for key in self.fields {
            fields.insert(key, 1);
        }

        let limit = self.limit.or(default_limit).unwrap_or(DEFAULT_LIMIT);

        SearchParams::new(query)
            .paginate(self.page.unwrap_or(1), limit)
            .sort(sort)
            .fields(fields)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, FormError> {
    value
        .trim()
        .parse()
        .map_err(|_| FormError::InvalidNumber(key.to_string()))
}

fn check_field(name: &str) -> Result<(), FormError> {
    if name.is_empty() {
        return Err(FormError::InvalidField);
    }
    if name.starts_with('$') {
        return Err(FormError::Operator(name.to_string()));
    }
    Ok(())
}

fn parse_sort(value: &str) -> Result<Vec<(String, i32)>, FormError> {
    let mut sort = Vec::new();
    for item in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (name, direction) = match item.strip_prefix('-') {
            Some(name) => (name, -1),
            None => (item, 1),
        };
        check_field(name)?;
        sort.push((name.to_string(), direction));
    }
    Ok(sort)
}

fn parse_fields(value: &str) -> Result<Vec<String>, FormError> {
    let mut fields = Vec::new();
    for name in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        check_field(name)?;
        fields.push(name.to_string());
    }
    Ok(fields)
}

/// Integers first, then booleans, otherwise the raw string.
fn coerce(value: &str) -> Bson {
    if let Ok(n) = value.parse::<i64>() {
        return Bson::Int64(n);
    }
    match value {
        "true" => Bson::Boolean(true),
        "false" => Bson::Boolean(false),
        _ => Bson::String(value.to_string()),
    }
}
