use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::domain::product::{NewProduct, Product};
use crate::domain::types::{CategoryId, CategoryName, ProductId};
use crate::pagination::Pagination;
use crate::repository::errors::RepositoryResult;

pub mod category;
pub mod errors;
pub mod product;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Sort keys accepted by the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSortBy {
    #[default]
    Id,
    Name,
    Price,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Query parameters used when listing or searching products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Restrict to products associated with a category.
    pub category_id: Option<CategoryId>,
    /// Case-insensitive substring match on the product name.
    pub name: Option<String>,
    /// Requested ordering; ties are always broken by id ascending so that
    /// pagination stays deterministic across pages.
    pub sort: Option<(ProductSortBy, SortDirection)>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
    pub fn sort(mut self, by: ProductSortBy, direction: SortDirection) -> Self {
        self.sort = Some((by, direction));
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryListQuery {
    /// Case-insensitive substring match on the category name.
    pub name: Option<String>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl CategoryListQuery {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for product entities.
pub trait ProductReader {
    /// List products matching the supplied query, returning the total match
    /// count alongside the requested page.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Retrieve a product by its identifier.
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
}

/// Write operations for product entities and their category associations.
pub trait ProductWriter {
    /// Persist a new product associated with the given categories. The store
    /// assigns id and creation timestamp.
    fn create_product(
        &self,
        product: &NewProduct,
        categories: &[CategoryId],
    ) -> RepositoryResult<Product>;
    /// Overwrite the mutable fields of an existing product and replace its
    /// association set. Id and creation timestamp are untouched.
    fn update_product(
        &self,
        id: ProductId,
        product: &NewProduct,
        categories: &[CategoryId],
    ) -> RepositoryResult<Product>;
    /// Delete a product by id. Fails with [`errors::RepositoryError::NotFound`]
    /// when the row does not exist and with
    /// [`errors::RepositoryError::IntegrityViolation`] when dependent data
    /// still references it.
    fn delete_product(&self, id: ProductId) -> RepositoryResult<()>;
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List categories using the supplied query options.
    fn list_categories(&self, query: CategoryListQuery)
    -> RepositoryResult<(usize, Vec<Category>)>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Rename a category.
    fn update_category(&self, id: CategoryId, name: &CategoryName) -> RepositoryResult<Category>;
    /// Delete a category by id. Fails with an integrity violation when the
    /// category is still attached to a product.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<()>;
}
