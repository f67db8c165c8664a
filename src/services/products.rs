use crate::SERVICE_ACCESS_ROLE;
use crate::domain::auth::{AuthenticatedUser, check_role};
use crate::domain::types::{CategoryId, ProductId};
use crate::dto::products::ProductDto;
use crate::forms::products::{ProductListParams, ProductPayload};
use crate::pagination::{Paginated, Pagination};
use crate::repository::errors::RepositoryError;
use crate::repository::{CategoryReader, ProductListQuery, ProductReader, ProductWriter};

use super::{ServiceError, ServiceResult};

/// Paginated, filterable product listing.
///
/// Malformed pagination or sort parameters fail with
/// [`ServiceError::InvalidArgument`]; repository errors are logged and
/// reported as internal so that the HTTP route can remain a thin wrapper.
pub fn list_products<R>(params: ProductListParams, repo: &R) -> ServiceResult<Paginated<ProductDto>>
where
    R: ProductReader,
{
    let query = ProductListQuery::try_from(params)?;
    let Pagination { page, per_page } = query.pagination.unwrap_or_default();

    match repo.list_products(query) {
        Ok((total, products)) => Ok(Paginated::new(
            products.into_iter().map(ProductDto::from).collect(),
            page,
            per_page,
            total,
        )),
        Err(e) => {
            log::error!("Failed to list products: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Looks up a single product, including its full category set.
pub fn get_product<R>(id: i32, repo: &R) -> ServiceResult<ProductDto>
where
    R: ProductReader,
{
    let product_id = match ProductId::new(id) {
        Ok(product_id) => product_id,
        Err(_) => return Err(ServiceError::NotFound(format!("product {id}"))),
    };

    match repo.get_product_by_id(product_id) {
        Ok(Some(product)) => Ok(product.into()),
        Ok(None) => Err(ServiceError::NotFound(format!("product {id}"))),
        Err(e) => {
            log::error!("Failed to get product {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Resolves caller-supplied category references against the category store,
/// failing with a category-scoped NotFound when any id is unknown. Runs
/// before any write so a bad reference never leaves a partial insert.
fn resolve_categories<R>(ids: &[CategoryId], repo: &R) -> ServiceResult<()>
where
    R: CategoryReader,
{
    for id in ids {
        match repo.get_category_by_id(*id) {
            Ok(Some(_)) => {}
            Ok(None) => return Err(ServiceError::NotFound(format!("category {id}"))),
            Err(e) => {
                log::error!("Failed to get category {id}: {e}");
                return Err(ServiceError::Internal);
            }
        }
    }
    Ok(())
}

/// Creates a product from caller input. The store assigns id and creation
/// timestamp; any id supplied by the caller was already dropped at the form
/// boundary.
pub fn create_product<R>(
    payload: ProductPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<ProductDto>
where
    R: CategoryReader + ProductWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    resolve_categories(&payload.categories, repo)?;

    match repo.create_product(&payload.product, &payload.categories) {
        Ok(product) => Ok(product.into()),
        Err(e) => {
            log::error!("Failed to create product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Overwrites the mutable fields of an existing product and replaces its
/// category associations. Id and creation timestamp survive the call.
pub fn update_product<R>(
    id: i32,
    payload: ProductPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<ProductDto>
where
    R: ProductReader + CategoryReader + ProductWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let product_id = match ProductId::new(id) {
        Ok(product_id) => product_id,
        Err(_) => return Err(ServiceError::NotFound(format!("product {id}"))),
    };

    // Existence check up front, so the caller sees NotFound rather than a
    // zero-row overwrite further down.
    match repo.get_product_by_id(product_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound(format!("product {id}"))),
        Err(e) => {
            log::error!("Failed to get product {id}: {e}");
            return Err(ServiceError::Internal);
        }
    }

    resolve_categories(&payload.categories, repo)?;

    match repo.update_product(product_id, &payload.product, &payload.categories) {
        Ok(product) => Ok(product.into()),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound(format!("product {id}"))),
        Err(e) => {
            log::error!("Failed to update product {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Deletes a product by id.
///
/// A missing row maps to NotFound; a row still referenced by dependent data
/// maps to the database kind without leaking the store error.
pub fn delete_product<R>(id: i32, user: &AuthenticatedUser, repo: &R) -> ServiceResult<()>
where
    R: ProductWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let product_id = match ProductId::new(id) {
        Ok(product_id) => product_id,
        Err(_) => return Err(ServiceError::NotFound(format!("product {id}"))),
    };

    match repo.delete_product(product_id) {
        Ok(()) => Ok(()),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound(format!("product {id}"))),
        Err(RepositoryError::IntegrityViolation(e)) => {
            log::warn!("Refused to delete product {id}: {e}");
            Err(ServiceError::Database("integrity violation".to_string()))
        }
        Err(e) => {
            log::error!("Failed to delete product {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::product::{NewProduct, Product};
    use crate::domain::types::{CategoryName, ProductName, ProductPrice};
    use crate::repository::test::TestRepository;
    use chrono::DateTime;
    use std::collections::HashSet;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".into(),
            email: "test@example.com".into(),
            name: "Test".into(),
            roles: vec![SERVICE_ACCESS_ROLE.into()],
            exp: 0,
        }
    }

    fn viewer_user() -> AuthenticatedUser {
        AuthenticatedUser {
            roles: vec!["viewer".into()],
            ..sample_user()
        }
    }

    fn sample_category(id: i32, name: &str) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(name).unwrap(),
        }
    }

    fn sample_product(id: i32, name: &str, categories: Vec<Category>) -> Product {
        Product {
            id: ProductId::new(id).unwrap(),
            name: ProductName::new(name).unwrap(),
            description: None,
            price: ProductPrice::new(100.0).unwrap(),
            image_url: None,
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
            categories,
        }
    }

    fn sample_payload(name: &str, categories: &[i32]) -> ProductPayload {
        ProductPayload {
            product: NewProduct {
                name: ProductName::new(name).unwrap(),
                description: None,
                price: ProductPrice::new(50.0).unwrap(),
                image_url: None,
            },
            categories: categories
                .iter()
                .map(|id| CategoryId::new(*id).unwrap())
                .collect(),
        }
    }

    /// Twenty-five products, exactly three of which contain "PC".
    fn seeded_catalog() -> TestRepository {
        let mut products = vec![
            sample_product(1, "Macbook Pro", vec![]),
            sample_product(2, "PC Gamer", vec![]),
            sample_product(3, "PC Gamer Alfa", vec![]),
        ];
        for i in 4..=25 {
            products.push(sample_product(i, &format!("Smart TV {i:02}"), vec![]));
        }
        TestRepository::new(products, vec![sample_category(1, "Electronics")])
    }

    #[test]
    fn get_product_returns_dto_when_id_exists() {
        let repo = TestRepository::new(
            vec![sample_product(
                1,
                "Phone",
                vec![sample_category(1, "Electronics")],
            )],
            vec![sample_category(1, "Electronics")],
        );

        let dto = get_product(1, &repo).unwrap();

        assert_eq!(dto.id, 1);
        assert_eq!(dto.name, "Phone");
        assert_eq!(dto.categories.len(), 1);
        assert_eq!(dto.categories[0].name, "Electronics");
    }

    #[test]
    fn get_product_fails_with_not_found_when_id_missing() {
        let repo = TestRepository::new(vec![], vec![]);

        let err = get_product(2, &repo).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn list_returns_sorted_page_with_totals() {
        let repo = seeded_catalog();
        let params = ProductListParams {
            page: Some(0),
            size: Some(12),
            sort: Some("name,asc".to_string()),
            ..ProductListParams::default()
        };

        let page = list_products(params, &repo).unwrap();

        assert_eq!(page.total_elements, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.content.len(), 12);
        assert_eq!(page.content[0].name, "Macbook Pro");
        assert_eq!(page.content[1].name, "PC Gamer");
        assert_eq!(page.content[2].name, "PC Gamer Alfa");
    }

    #[test]
    fn list_name_filter_is_case_insensitive() {
        let repo = seeded_catalog();
        let params = ProductListParams {
            name: Some("pc".to_string()),
            ..ProductListParams::default()
        };

        let page = list_products(params, &repo).unwrap();

        assert_eq!(page.total_elements, 3);
    }

    #[test]
    fn union_of_pages_covers_full_result_set() {
        let repo = seeded_catalog();

        let mut seen = HashSet::new();
        let mut page_index = 0;
        loop {
            let params = ProductListParams {
                page: Some(page_index),
                size: Some(7),
                sort: Some("name,asc".to_string()),
                ..ProductListParams::default()
            };
            let page = list_products(params, &repo).unwrap();
            for dto in &page.content {
                assert!(seen.insert(dto.id), "page overlap on id {}", dto.id);
            }
            page_index += 1;
            if page_index as usize >= page.total_pages {
                break;
            }
        }

        assert_eq!(seen.len(), 25);
    }

    #[test]
    fn list_rejects_invalid_page_parameters() {
        let repo = seeded_catalog();

        let params = ProductListParams {
            page: Some(-1),
            ..ProductListParams::default()
        };
        assert!(matches!(
            list_products(params, &repo).unwrap_err(),
            ServiceError::InvalidArgument(_)
        ));

        let params = ProductListParams {
            size: Some(0),
            ..ProductListParams::default()
        };
        assert!(matches!(
            list_products(params, &repo).unwrap_err(),
            ServiceError::InvalidArgument(_)
        ));
    }

    #[test]
    fn list_filters_by_category() {
        let electronics = sample_category(1, "Electronics");
        let books = sample_category(2, "Books");
        let repo = TestRepository::new(
            vec![
                sample_product(1, "Phone", vec![electronics.clone()]),
                sample_product(2, "Novel", vec![books.clone()]),
            ],
            vec![electronics, books],
        );

        let params = ProductListParams {
            category_id: Some(2),
            ..ProductListParams::default()
        };
        let page = list_products(params, &repo).unwrap();

        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].name, "Novel");
    }

    #[test]
    fn create_returns_store_assigned_id() {
        let repo = TestRepository::new(vec![], vec![sample_category(1, "Electronics")]);
        let user = sample_user();

        let dto = create_product(sample_payload("Phone", &[1]), &user, &repo).unwrap();

        assert_eq!(dto.id, 1);
        assert_eq!(dto.categories.len(), 1);
        assert_eq!(dto.categories[0].id, 1);
    }

    #[test]
    fn create_fails_before_persisting_when_category_is_unknown() {
        let repo = TestRepository::new(vec![], vec![sample_category(1, "Electronics")]);
        let user = sample_user();

        let err = create_product(sample_payload("Phone", &[1, 999]), &user, &repo).unwrap_err();

        assert_eq!(err, ServiceError::NotFound("category 999".to_string()));
        let (total, _) = repo.list_products(ProductListQuery::default()).unwrap();
        assert_eq!(total, 0, "no partial insert");
    }

    #[test]
    fn create_requires_access_role() {
        let repo = TestRepository::new(vec![], vec![sample_category(1, "Electronics")]);

        let err = create_product(sample_payload("Phone", &[1]), &viewer_user(), &repo).unwrap_err();
        assert_eq!(err, ServiceError::Unauthorized);
    }

    #[test]
    fn update_preserves_id_and_creation_date() {
        let repo = TestRepository::new(
            vec![sample_product(1, "Phone", vec![])],
            vec![sample_category(1, "Electronics")],
        );
        let user = sample_user();

        let before = get_product(1, &repo).unwrap();
        let dto = update_product(1, sample_payload("Phone Pro", &[1]), &user, &repo).unwrap();

        assert_eq!(dto.id, 1);
        assert_eq!(dto.date, before.date);
        assert_eq!(dto.name, "Phone Pro");
        assert_eq!(dto.categories.len(), 1);
    }

    #[test]
    fn update_replaces_category_associations() {
        let electronics = sample_category(1, "Electronics");
        let books = sample_category(2, "Books");
        let repo = TestRepository::new(
            vec![sample_product(1, "Phone", vec![electronics.clone()])],
            vec![electronics, books],
        );
        let user = sample_user();

        let dto = update_product(1, sample_payload("Phone", &[2]), &user, &repo).unwrap();

        let ids: Vec<i32> = dto.categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn update_fails_with_not_found_when_id_missing() {
        let repo = TestRepository::new(vec![], vec![sample_category(1, "Electronics")]);
        let user = sample_user();

        let err = update_product(42, sample_payload("Phone", &[]), &user, &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound("product 42".to_string()));
    }

    #[test]
    fn delete_is_not_idempotent() {
        let repo = TestRepository::new(vec![sample_product(1, "Phone", vec![])], vec![]);
        let user = sample_user();

        delete_product(1, &user, &repo).unwrap();
        assert!(matches!(
            get_product(1, &repo).unwrap_err(),
            ServiceError::NotFound(_)
        ));
        assert!(matches!(
            delete_product(1, &user, &repo).unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }

    #[test]
    fn delete_of_referenced_product_reports_integrity_violation() {
        let repo = TestRepository::new(vec![sample_product(1, "Phone", vec![])], vec![])
            .with_dependent(ProductId::new(1).unwrap());
        let user = sample_user();

        let err = delete_product(1, &user, &repo).unwrap_err();
        assert_eq!(err, ServiceError::Database("integrity violation".to_string()));

        // The row must remain retrievable afterwards.
        assert!(get_product(1, &repo).is_ok());
    }
}
