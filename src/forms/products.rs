use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::NewProduct;
use crate::domain::types::{
    CategoryId, ImageUrl, ProductDescription, ProductName, ProductPrice, TypeConstraintError,
};
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{ProductListQuery, ProductSortBy, SortDirection};

/// Reference to a category by id, as supplied by callers.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CategoryRef {
    pub id: i32,
}

/// JSON body accepted by the create/update product endpoints.
///
/// Any caller-supplied product id is ignored; ids are store-assigned.
#[derive(Debug, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
}

/// Validated payload carried into the service layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPayload {
    pub product: NewProduct,
    /// Unique category ids, ascending.
    pub categories: Vec<CategoryId>,
}

#[derive(Debug, Error)]
pub enum ProductFormError {
    #[error("Product form validation failed: {0}")]
    Validation(String),
    #[error("Product form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ProductFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ProductFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ProductForm> for ProductPayload {
    type Error = ProductFormError;

    fn try_from(value: ProductForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let description = match value.description.trim() {
            "" => None,
            text => Some(ProductDescription::new(text)?),
        };
        let image_url = match value.image_url.trim() {
            "" => None,
            url => Some(ImageUrl::new(url)?),
        };

        let mut categories = value
            .categories
            .iter()
            .map(|c| CategoryId::new(c.id))
            .collect::<Result<Vec<_>, _>>()?;
        categories.sort_unstable();
        categories.dedup();

        Ok(Self {
            product: NewProduct {
                name: ProductName::new(value.name)?,
                description,
                price: ProductPrice::new(value.price)?,
                image_url,
            },
            categories,
        })
    }
}

/// Query parameters accepted by the product listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    pub category_id: Option<i32>,
    pub name: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
    /// Sort spec in `field,direction` form, e.g. `name,asc`.
    pub sort: Option<String>,
}

fn parse_sort(spec: &str) -> Result<(ProductSortBy, SortDirection), ProductFormError> {
    let mut parts = spec.splitn(2, ',');
    let field = parts.next().unwrap_or("").trim();
    let direction = parts.next().unwrap_or("asc").trim();

    let by = match field {
        "id" => ProductSortBy::Id,
        "name" => ProductSortBy::Name,
        "price" => ProductSortBy::Price,
        "date" => ProductSortBy::CreatedAt,
        other => {
            return Err(ProductFormError::Validation(format!(
                "unknown sort field: {other}"
            )));
        }
    };
    let direction = match direction {
        "asc" => SortDirection::Asc,
        "desc" => SortDirection::Desc,
        other => {
            return Err(ProductFormError::Validation(format!(
                "unknown sort direction: {other}"
            )));
        }
    };

    Ok((by, direction))
}

impl TryFrom<ProductListParams> for ProductListQuery {
    type Error = ProductFormError;

    fn try_from(value: ProductListParams) -> Result<Self, Self::Error> {
        let page = value.page.unwrap_or(0);
        if page < 0 {
            return Err(ProductFormError::Validation(
                "page index must be zero or greater".to_string(),
            ));
        }
        let size = value.size.unwrap_or(DEFAULT_ITEMS_PER_PAGE as i64);
        if size <= 0 {
            return Err(ProductFormError::Validation(
                "page size must be greater than zero".to_string(),
            ));
        }

        let mut query = ProductListQuery::default().paginate(page as usize, size as usize);

        // Absent and zero both mean "no category filter".
        match value.category_id {
            Some(id) if id > 0 => query = query.category(CategoryId::new(id)?),
            Some(id) if id < 0 => {
                return Err(ProductFormError::Validation(
                    "category_id must be zero or greater".to_string(),
                ));
            }
            _ => {}
        }

        if let Some(name) = value.name.as_deref().map(str::trim)
            && !name.is_empty()
        {
            query = query.name(name);
        }

        if let Some(spec) = &value.sort {
            let (by, direction) = parse_sort(spec)?;
            query = query.sort(by, direction);
        }

        Ok(query)
    }
}
