use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::product::Product;
use crate::dto::categories::CategoryDto;

/// Transfer representation of a product exchanged with callers.
///
/// Optional text columns are flattened to empty strings; the category set is
/// flattened to id-sorted `(id, name)` references.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    /// Creation timestamp, assigned by the store.
    pub date: NaiveDateTime,
    pub categories: Vec<CategoryDto>,
}

impl From<Product> for ProductDto {
    fn from(value: Product) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            description: value
                .description
                .map(|d| d.into_inner())
                .unwrap_or_default(),
            price: value.price.get(),
            image_url: value.image_url.map(|u| u.into_inner()).unwrap_or_default(),
            date: value.created_at,
            categories: value.categories.into_iter().map(CategoryDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::types::{
        CategoryId, CategoryName, ImageUrl, ProductDescription, ProductId, ProductName,
        ProductPrice,
    };
    use crate::forms::products::{CategoryRef, ProductForm, ProductPayload};
    use chrono::DateTime;
    use std::collections::HashSet;

    fn sample_product() -> Product {
        Product {
            id: ProductId::new(1).unwrap(),
            name: ProductName::new("Phone").unwrap(),
            description: Some(ProductDescription::new("Good Phone").unwrap()),
            price: ProductPrice::new(800.0).unwrap(),
            image_url: Some(ImageUrl::new("https://example.com/img/phone.png").unwrap()),
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
            categories: vec![
                Category {
                    id: CategoryId::new(2).unwrap(),
                    name: CategoryName::new("Phones").unwrap(),
                },
                Category {
                    id: CategoryId::new(1).unwrap(),
                    name: CategoryName::new("Electronics").unwrap(),
                },
            ],
        }
    }

    #[test]
    fn flattens_scalars_and_category_references() {
        let dto = ProductDto::from(sample_product());

        assert_eq!(dto.id, 1);
        assert_eq!(dto.name, "Phone");
        assert_eq!(dto.description, "Good Phone");
        assert_eq!(dto.price, 800.0);
        let ids: Vec<i32> = dto.categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1], "mapping itself preserves input order");
    }

    #[test]
    fn empty_optionals_flatten_to_empty_strings() {
        let product = Product {
            description: None,
            image_url: None,
            ..sample_product()
        };
        let dto = ProductDto::from(product);

        assert_eq!(dto.description, "");
        assert_eq!(dto.image_url, "");
    }

    /// Mapping out to a view and back through the input form preserves every
    /// scalar field and the set of category ids.
    #[test]
    fn round_trip_preserves_scalars_and_category_id_set() {
        let product = sample_product();
        let dto = ProductDto::from(product.clone());

        let form = ProductForm {
            name: dto.name.clone(),
            description: dto.description.clone(),
            price: dto.price,
            image_url: dto.image_url.clone(),
            categories: dto
                .categories
                .iter()
                .map(|c| CategoryRef { id: c.id })
                .collect(),
        };
        let payload = ProductPayload::try_from(form).unwrap();

        assert_eq!(payload.product.name, product.name);
        assert_eq!(payload.product.description, product.description);
        assert_eq!(payload.product.price, product.price);
        assert_eq!(payload.product.image_url, product.image_url);

        let before: HashSet<i32> = product.categories.iter().map(|c| c.id.get()).collect();
        let after: HashSet<i32> = payload.categories.iter().map(|c| c.get()).collect();
        assert_eq!(before, after);
    }
}
