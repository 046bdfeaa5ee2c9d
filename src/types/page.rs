//! Page requests (`page`, `size`, `sort` query parameters) and page payloads.

use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite};
use utoipa::{IntoParams, ToSchema};

use crate::config::PaginationConfig;
use crate::error::CadastroError;

/// Raw pagination query parameters, before defaults and limits are applied.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page index
    pub page: Option<u32>,
    /// Page size, capped by `pagination.max_size`
    pub size: Option<u32>,
    /// `prop[,prop...][,asc|desc]`
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(Direction::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(Direction::Desc)
        } else {
            None
        }
    }

    fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
}

impl PageParams {
    pub fn resolve(&self, cfg: &PaginationConfig) -> PageRequest {
        let max_size = cfg.max_size.max(1);
        let size = match self.size {
            None | Some(0) => cfg.default_size,
            Some(size) => size,
        }
        .clamp(1, max_size);

        PageRequest {
            number: self.page.unwrap_or(0),
            size,
            sort: self.sort.as_deref().map(parse_sort).unwrap_or_default(),
        }
    }
}

/// `"cidade,ph,desc"` sorts both properties descending; direction defaults to ascending.
fn parse_sort(raw: &str) -> Vec<SortOrder> {
    let mut tokens: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    let direction = match tokens.last().and_then(|t| Direction::parse(t)) {
        Some(direction) => {
            tokens.pop();
            direction
        }
        None => Direction::Asc,
    };

    tokens
        .into_iter()
        .map(|property| SortOrder {
            property: property.to_string(),
            direction,
        })
        .collect()
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        i64::from(self.number) * i64::from(self.size)
    }

    /// Append `ORDER BY ... LIMIT ? OFFSET ?`.
    ///
    /// `sortable` maps wire property names to SQL columns; anything outside it is
    /// rejected so sort input never reaches the SQL text. `id_column` breaks ties.
    pub fn push_order_and_limit(
        &self,
        qb: &mut QueryBuilder<'_, Sqlite>,
        sortable: &[(&str, &str)],
        id_column: &str,
    ) -> Result<(), CadastroError> {
        qb.push(" ORDER BY ");
        for order in &self.sort {
            let column = sortable
                .iter()
                .find(|(property, _)| *property == order.property)
                .map(|(_, column)| *column)
                .ok_or_else(|| CadastroError::InvalidSort(order.property.clone()))?;
            qb.push(column)
                .push(" ")
                .push(order.direction.as_sql())
                .push(", ");
        }
        qb.push(id_column).push(" ASC");

        qb.push(" LIMIT ")
            .push_bind(i64::from(self.size))
            .push(" OFFSET ")
            .push_bind(self.offset());
        Ok(())
    }
}

/// Page payload: the slice of matches plus position metadata.
#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: PageMetadata,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u32,
    pub number: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size.max(1));
        Self {
            content,
            page: PageMetadata {
                size: request.size,
                number: request.number,
                total_elements,
                total_pages: total_elements.div_ceil(size),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
        }
    }
}
