use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::Category as DomainCategory;
use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};
use crate::domain::types::{
    ImageUrl, ProductDescription, ProductName, ProductPrice, TypeConstraintError,
};

/// Diesel model representing the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub created_at: NaiveDateTime,
}

impl Product {
    /// Attaches resolved categories and lifts the row into the domain type.
    ///
    /// Empty text columns map to `None`; categories are sorted by id so that
    /// reads are deterministic regardless of join order.
    pub fn into_domain(
        self,
        mut categories: Vec<DomainCategory>,
    ) -> Result<DomainProduct, TypeConstraintError> {
        categories.sort_by_key(|c| c.id);

        let description = match self.description.trim() {
            "" => None,
            text => Some(ProductDescription::new(text)?),
        };
        let image_url = match self.image_url.trim() {
            "" => None,
            url => Some(ImageUrl::new(url)?),
        };

        Ok(DomainProduct {
            id: self.id.try_into()?,
            name: ProductName::new(self.name)?,
            description,
            price: ProductPrice::new(self.price)?,
            image_url,
            created_at: self.created_at,
            categories,
        })
    }
}

/// Insertable form of [`Product`]; the id is assigned by the store.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub created_at: NaiveDateTime,
}

impl NewProduct {
    /// Builds an insertable row, stamping the store-assigned creation time.
    pub fn from_domain(product: &DomainNewProduct, created_at: NaiveDateTime) -> Self {
        Self {
            name: product.name.as_str().to_string(),
            description: product
                .description
                .as_ref()
                .map(|d| d.as_str().to_string())
                .unwrap_or_default(),
            price: product.price.get(),
            image_url: product
                .image_url
                .as_ref()
                .map(|u| u.as_str().to_string())
                .unwrap_or_default(),
            created_at,
        }
    }
}

/// Field overwrite applied on update; never touches id or created_at.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct ProductChangeset {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
}

impl From<&DomainNewProduct> for ProductChangeset {
    fn from(product: &DomainNewProduct) -> Self {
        Self {
            name: product.name.as_str().to_string(),
            description: product
                .description
                .as_ref()
                .map(|d| d.as_str().to_string())
                .unwrap_or_default(),
            price: product.price.get(),
            image_url: product
                .image_url
                .as_ref()
                .map(|u| u.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}
