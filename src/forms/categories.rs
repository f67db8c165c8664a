use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::NewCategory;
use crate::domain::types::{CategoryName, TypeConstraintError};
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::CategoryListQuery;

/// JSON body accepted by the create/update category endpoints.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 1))]
    pub name: String,
}

/// Validated payload carried into the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPayload {
    pub name: CategoryName,
}

impl CategoryPayload {
    pub fn into_new_category(self) -> NewCategory {
        NewCategory { name: self.name }
    }
}

#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("Category form validation failed: {0}")]
    Validation(String),
    #[error("Category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CategoryForm> for CategoryPayload {
    type Error = CategoryFormError;

    fn try_from(value: CategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: CategoryName::new(value.name)?,
        })
    }
}

/// Query parameters accepted by the category listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryListParams {
    pub name: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl TryFrom<CategoryListParams> for CategoryListQuery {
    type Error = CategoryFormError;

    fn try_from(value: CategoryListParams) -> Result<Self, Self::Error> {
        let page = value.page.unwrap_or(0);
        if page < 0 {
            return Err(CategoryFormError::Validation(
                "page index must be zero or greater".to_string(),
            ));
        }
        let size = value.size.unwrap_or(DEFAULT_ITEMS_PER_PAGE as i64);
        if size <= 0 {
            return Err(CategoryFormError::Validation(
                "page size must be greater than zero".to_string(),
            ));
        }

        let mut query = CategoryListQuery::default().paginate(page as usize, size as usize);

        if let Some(name) = value.name.as_deref().map(str::trim)
            && !name.is_empty()
        {
            query = query.name(name);
        }

        Ok(query)
    }
}
