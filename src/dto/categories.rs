use serde::Serialize;

use crate::domain::category::Category;

/// Lightweight category reference carried in responses.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
        }
    }
}
