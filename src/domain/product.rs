use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::types::{ImageUrl, ProductDescription, ProductId, ProductName, ProductPrice};

/// A catalog product together with its category associations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub description: Option<ProductDescription>,
    pub price: ProductPrice,
    pub image_url: Option<ImageUrl>,
    /// Assigned by the store at insert time and never changed afterwards.
    pub created_at: NaiveDateTime,
    /// Sorted by category id so reads are deterministic.
    pub categories: Vec<Category>,
}

/// Scalar fields required to create a new [`Product`] or overwrite an
/// existing one. Id and creation timestamp are always store-assigned;
/// category associations are resolved separately against the category store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: ProductName,
    pub description: Option<ProductDescription>,
    pub price: ProductPrice,
    pub image_url: Option<ImageUrl>,
}
