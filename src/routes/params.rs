use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_TAKE: i64 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    #[serde(alias = "asc")]
    Asc,
    #[serde(alias = "desc")]
    Desc,
}

/// Normalized pagination: a 1-based page, a page size and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    pub page: i64,
    pub take: i64,
    pub order: SortOrder,
}

impl PageOptions {
    /// Rows before this page. Saturates at `i64::MAX` so far-out pages
    /// simply come back empty.
    pub fn skip(&self) -> u64 {
        let rows = (self.page - 1).max(0).saturating_mul(self.take);
        u64::try_from(rows).unwrap_or(0)
    }
}

/// Product filters with blank values dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilters {
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl ProductFilters {
    /// Size and color live on variants, so either one needs the variant join.
    pub fn needs_variant_join(&self) -> bool {
        self.size.is_some() || self.color.is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Page number, default 1
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<i64>,
    /// Items per page, default 10, at most 50
    #[validate(range(min = 1, max = 50, message = "take must be between 1 and 50"))]
    pub take: Option<i64>,
    /// ASC or DESC by creation time, default ASC
    pub order: Option<SortOrder>,
    /// Substring matched against name, description and category
    #[validate(length(max = 255))]
    pub keyword: Option<String>,
    /// Case-insensitive exact category
    pub category: Option<String>,
    /// Case-insensitive exact variant size
    pub size: Option<String>,
    /// Case-insensitive exact variant color
    pub color: Option<String>,
}

impl ProductQuery {
    /// Fills in defaults. Bounds are checked by `validate`, not here.
    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            take: self.take.unwrap_or(DEFAULT_TAKE),
            order: self.order.unwrap_or_default(),
        }
    }

    pub fn filters(&self) -> ProductFilters {
        ProductFilters {
            keyword: non_blank(self.keyword.as_deref()).map(str::to_string),
            category: non_blank(self.category.as_deref()).map(str::to_lowercase),
            size: non_blank(self.size.as_deref()).map(str::to_lowercase),
            color: non_blank(self.color.as_deref()).map(str::to_lowercase),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
