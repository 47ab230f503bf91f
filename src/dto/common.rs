use serde::{Deserialize, Serialize};

use crate::database::listing::Listing;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl<T, U> From<Listing<U>> for ListResponse<T>
where
    U: Into<T>,
{
    fn from(value: Listing<U>) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}
