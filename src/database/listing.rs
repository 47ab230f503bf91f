//! Shared building blocks for paginated, filtered and ordered list queries.

use chrono::NaiveDate;
use sqlx::{postgres::PgRow, FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::Result;
use crate::utils::validation::FieldErrors;

pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 100;
/// Highest page number whose offset still fits in an `i64`.
pub const MAX_PAGE: i64 = i64::MAX / MAX_PER_PAGE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub per_page: i64,
}

impl Page {
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).clamp(1, MAX_PAGE),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn total_pages(&self, total: i64) -> i64 {
        (total + self.per_page - 1) / self.per_page
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

pub struct Listing<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    Uuid(Uuid),
    Text(String),
    SmallInt(i16),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `column = value`
    Eq(&'static str, Bind),
    /// Calendar date (UTC) of a timestamp column equals the value.
    OnDate(&'static str, NaiveDate),
    /// Case-insensitive substring match on any of the columns.
    Search(&'static [&'static str], String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTerm {
    pub column: &'static str,
    pub direction: Direction,
}

impl OrderTerm {
    pub const fn asc(column: &'static str) -> Self {
        Self {
            column,
            direction: Direction::Asc,
        }
    }

    pub const fn desc(column: &'static str) -> Self {
        Self {
            column,
            direction: Direction::Desc,
        }
    }
}

/// Parses a `ordering=-salary,published_at` parameter against a whitelist.
/// Falls back to `default` when the parameter is absent or blank.
pub fn parse_ordering(
    raw: Option<&str>,
    allowed: &[&'static str],
    default: &[OrderTerm],
) -> std::result::Result<Vec<OrderTerm>, FieldErrors> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(default.to_vec());
    };

    let mut terms = Vec::new();
    let mut errors = FieldErrors::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (name, direction) = match part.strip_prefix('-') {
            Some(rest) => (rest, Direction::Desc),
            None => (part, Direction::Asc),
        };
        match allowed.iter().find(|column| **column == name) {
            Some(column) => terms.push(OrderTerm {
                column: *column,
                direction,
            }),
            None => errors.add(
                "ordering",
                format!(
                    "Cannot order by {:?}; allowed fields: {}",
                    name,
                    allowed.join(", ")
                ),
            ),
        }
    }
    errors.into_result()?;

    if terms.is_empty() {
        return Ok(default.to_vec());
    }
    Ok(terms)
}

/// Wraps a search term for `ILIKE`, escaping the pattern metacharacters.
pub fn search_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn push_bind_value(qb: &mut QueryBuilder<'_, Postgres>, value: &Bind) {
    match value {
        Bind::Uuid(v) => qb.push_bind(*v),
        Bind::Text(v) => qb.push_bind(v.clone()),
        Bind::SmallInt(v) => qb.push_bind(*v),
    };
}

pub fn push_where(qb: &mut QueryBuilder<'_, Postgres>, conditions: &[Condition]) {
    for (idx, condition) in conditions.iter().enumerate() {
        qb.push(if idx == 0 { " WHERE " } else { " AND " });
        match condition {
            Condition::Eq(column, value) => {
                qb.push(*column).push(" = ");
                push_bind_value(qb, value);
            }
            Condition::OnDate(column, date) => {
                qb.push("(")
                    .push(*column)
                    .push(" AT TIME ZONE 'UTC')::date = ")
                    .push_bind(*date);
            }
            Condition::Search(columns, term) => {
                let pattern = search_pattern(term);
                qb.push("(");
                for (i, column) in columns.iter().enumerate() {
                    if i > 0 {
                        qb.push(" OR ");
                    }
                    qb.push(*column).push(" ILIKE ").push_bind(pattern.clone());
                }
                qb.push(")");
            }
        }
    }
}

pub fn push_order_by(qb: &mut QueryBuilder<'_, Postgres>, ordering: &[OrderTerm]) {
    qb.push(" ORDER BY ");
    for term in ordering {
        qb.push(term.column).push(match term.direction {
            Direction::Asc => " ASC, ",
            Direction::Desc => " DESC, ",
        });
    }
    // stable pagination across equal sort keys
    qb.push("id ASC");
}

/// Filters, ordering and page for one list request.
#[derive(Debug, Clone)]
pub struct ListRequest {
    pub conditions: Vec<Condition>,
    pub ordering: Vec<OrderTerm>,
    pub page: Page,
}

pub async fn fetch_page<T>(
    pool: &PgPool,
    table: &str,
    columns: &str,
    request: &ListRequest,
) -> Result<Listing<T>>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut count = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {}", table));
    push_where(&mut count, &request.conditions);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let mut items = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM {}", columns, table));
    push_where(&mut items, &request.conditions);
    push_order_by(&mut items, &request.ordering);
    items
        .push(" LIMIT ")
        .push_bind(request.page.per_page)
        .push(" OFFSET ")
        .push_bind(request.page.offset());
    let rows: Vec<T> = items.build_query_as().fetch_all(pool).await?;

    Ok(Listing {
        items: rows,
        total,
        page: request.page.page,
        per_page: request.page.per_page,
        total_pages: request.page.total_pages(total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALLOWED: &[&str] = &["salary", "published_at", "closed_at"];
    const DEFAULT: &[OrderTerm] = &[OrderTerm::desc("published_at")];

    #[test]
    fn page_is_clamped() {
        let page = Page::new(Some(0), Some(1000));
        assert_eq!(page, Page { page: 1, per_page: MAX_PER_PAGE });
        assert_eq!(Page::new(Some(3), Some(10)).offset(), 20);
        assert_eq!(Page::new(None, Some(10)).total_pages(21), 3);
        assert_eq!(Page::default().total_pages(0), 0);
    }

    #[test]
    fn huge_page_numbers_do_not_overflow_the_offset() {
        let page = Page::new(Some(i64::MAX), Some(MAX_PER_PAGE));
        assert_eq!(page.page, MAX_PAGE);
        assert!(page.offset() >= 0);

        let page = Page::new(Some(i64::MAX), None);
        assert_eq!(page.offset(), (MAX_PAGE - 1) * DEFAULT_PER_PAGE);

        let raw = Page { page: i64::MAX, per_page: 20 };
        assert_eq!(raw.offset(), i64::MAX);
    }

    #[test]
    fn ordering_defaults_when_absent() {
        assert_eq!(parse_ordering(None, ALLOWED, DEFAULT).unwrap(), DEFAULT.to_vec());
        assert_eq!(parse_ordering(Some("  "), ALLOWED, DEFAULT).unwrap(), DEFAULT.to_vec());
    }

    #[test]
    fn ordering_accepts_prefixed_fields_in_order() {
        let terms = parse_ordering(Some("-salary, closed_at"), ALLOWED, DEFAULT).unwrap();
        assert_eq!(terms, vec![OrderTerm::desc("salary"), OrderTerm::asc("closed_at")]);
    }

    #[test]
    fn ordering_rejects_unknown_fields() {
        let errors = parse_ordering(Some("salary,password"), ALLOWED, DEFAULT).unwrap_err();
        assert!(errors.get("ordering").unwrap()[0].contains("\"password\""));
    }

    #[test]
    fn search_pattern_escapes_wildcards() {
        assert_eq!(search_pattern("rust"), "%rust%");
        assert_eq!(search_pattern("100%_\\"), "%100\\%\\_\\\\%");
    }

    #[test]
    fn builds_where_and_order_clauses() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT id FROM vacancies");
        push_where(
            &mut qb,
            &[
                Condition::Eq("status", Bind::Text("active".into())),
                Condition::OnDate("published_at", NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()),
                Condition::Search(&["title", "description"], "rust".into()),
            ],
        );
        push_order_by(&mut qb, &[OrderTerm::desc("salary")]);
        assert_eq!(
            qb.sql(),
            "SELECT id FROM vacancies WHERE status = $1 AND (published_at AT TIME ZONE 'UTC')::date = $2 \
             AND (title ILIKE $3 OR description ILIKE $4) ORDER BY salary DESC, id ASC"
        );
    }
}
