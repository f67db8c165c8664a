use crate::SERVICE_ACCESS_ROLE;
use crate::domain::auth::{AuthenticatedUser, check_role};
use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryDto;
use crate::forms::categories::{CategoryListParams, CategoryPayload};
use crate::pagination::{Paginated, Pagination};
use crate::repository::errors::RepositoryError;
use crate::repository::{CategoryListQuery, CategoryReader, CategoryWriter};

use super::{ServiceError, ServiceResult};

/// Paginated category listing, sorted by name.
pub fn list_categories<R>(
    params: CategoryListParams,
    repo: &R,
) -> ServiceResult<Paginated<CategoryDto>>
where
    R: CategoryReader,
{
    let query = CategoryListQuery::try_from(params)?;
    let Pagination { page, per_page } = query.pagination.unwrap_or_default();

    match repo.list_categories(query) {
        Ok((total, categories)) => Ok(Paginated::new(
            categories.into_iter().map(CategoryDto::from).collect(),
            page,
            per_page,
            total,
        )),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn get_category<R>(id: i32, repo: &R) -> ServiceResult<CategoryDto>
where
    R: CategoryReader,
{
    let category_id = match CategoryId::new(id) {
        Ok(category_id) => category_id,
        Err(_) => return Err(ServiceError::NotFound(format!("category {id}"))),
    };

    match repo.get_category_by_id(category_id) {
        Ok(Some(category)) => Ok(category.into()),
        Ok(None) => Err(ServiceError::NotFound(format!("category {id}"))),
        Err(e) => {
            log::error!("Failed to get category {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn create_category<R>(
    payload: CategoryPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    match repo.create_category(&payload.into_new_category()) {
        Ok(category) => Ok(category.into()),
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_category<R>(
    id: i32,
    payload: CategoryPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let category_id = match CategoryId::new(id) {
        Ok(category_id) => category_id,
        Err(_) => return Err(ServiceError::NotFound(format!("category {id}"))),
    };

    match repo.update_category(category_id, &payload.name) {
        Ok(category) => Ok(category.into()),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound(format!("category {id}"))),
        Err(e) => {
            log::error!("Failed to update category {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Deletes a category by id. A category still attached to a product maps to
/// the database kind, mirroring product deletion.
pub fn delete_category<R>(id: i32, user: &AuthenticatedUser, repo: &R) -> ServiceResult<()>
where
    R: CategoryWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let category_id = match CategoryId::new(id) {
        Ok(category_id) => category_id,
        Err(_) => return Err(ServiceError::NotFound(format!("category {id}"))),
    };

    match repo.delete_category(category_id) {
        Ok(()) => Ok(()),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound(format!("category {id}"))),
        Err(RepositoryError::IntegrityViolation(e)) => {
            log::warn!("Refused to delete category {id}: {e}");
            Err(ServiceError::Database("integrity violation".to_string()))
        }
        Err(e) => {
            log::error!("Failed to delete category {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}
