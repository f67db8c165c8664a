use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::category::Category;
use crate::domain::product::{NewProduct, Product};
use crate::domain::types::{CategoryId, ProductId};
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, ProductChangeset,
};
use crate::models::product_category::ProductCategory;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, ProductListQuery, ProductReader, ProductSortBy, ProductWriter, SortDirection,
};

/// Loads the category sets for the given product rows and lifts everything
/// into domain products, preserving row order.
fn with_categories(
    conn: &mut SqliteConnection,
    rows: Vec<DbProduct>,
) -> RepositoryResult<Vec<Product>> {
    use crate::schema::{categories, product_categories};

    let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();

    let links: Vec<(i32, crate::models::category::Category)> = product_categories::table
        .inner_join(categories::table)
        .filter(product_categories::product_id.eq_any(&ids))
        .select((product_categories::product_id, categories::all_columns))
        .load(conn)?;

    let mut by_product: HashMap<i32, Vec<Category>> = HashMap::new();
    for (product_id, category) in links {
        by_product
            .entry(product_id)
            .or_default()
            .push(category.try_into()?);
    }

    rows.into_iter()
        .map(|row| {
            let categories = by_product.remove(&row.id).unwrap_or_default();
            row.into_domain(categories).map_err(RepositoryError::from)
        })
        .collect()
}

fn replace_category_links(
    conn: &mut SqliteConnection,
    product_id: i32,
    categories: &[CategoryId],
) -> RepositoryResult<()> {
    use crate::schema::product_categories;

    diesel::delete(
        product_categories::table.filter(product_categories::product_id.eq(product_id)),
    )
    .execute(conn)?;

    let links: Vec<ProductCategory> = categories
        .iter()
        .map(|category_id| ProductCategory {
            product_id,
            category_id: category_id.get(),
        })
        .collect();
    if !links.is_empty() {
        diesel::insert_into(product_categories::table)
            .values(&links)
            .execute(conn)?;
    }

    Ok(())
}

impl ProductReader for DieselRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        use crate::schema::{product_categories, products};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(category_id) = query.category_id {
                items = items.filter(
                    products::id.eq_any(
                        product_categories::table
                            .filter(product_categories::category_id.eq(category_id.get()))
                            .select(product_categories::product_id),
                    ),
                );
            }

            if let Some(name) = &query.name {
                // SQLite LIKE is case-insensitive for ASCII.
                items = items.filter(products::name.like(format!("%{name}%")));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();

        let (sort_by, direction) = query.sort.unwrap_or_default();
        items = match (sort_by, direction) {
            (ProductSortBy::Id, SortDirection::Asc) => items.order(products::id.asc()),
            (ProductSortBy::Id, SortDirection::Desc) => items.order(products::id.desc()),
            (ProductSortBy::Name, SortDirection::Asc) => items.order(products::name.asc()),
            (ProductSortBy::Name, SortDirection::Desc) => items.order(products::name.desc()),
            (ProductSortBy::Price, SortDirection::Asc) => items.order(products::price.asc()),
            (ProductSortBy::Price, SortDirection::Desc) => items.order(products::price.desc()),
            (ProductSortBy::CreatedAt, SortDirection::Asc) => {
                items.order(products::created_at.asc())
            }
            (ProductSortBy::CreatedAt, SortDirection::Desc) => {
                items.order(products::created_at.desc())
            }
        };
        // Tie-break so that pagination never duplicates or drops rows.
        items = items.then_order_by(products::id.asc());

        if let Some(pagination) = &query.pagination {
            let offset = (pagination.page * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let rows = items.load::<DbProduct>(&mut conn)?;
        let products = with_categories(&mut conn, rows)?;

        Ok((total, products))
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let row = products::table
            .filter(products::id.eq(id.get()))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(with_categories(&mut conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(
        &self,
        product: &NewProduct,
        categories: &[CategoryId],
    ) -> RepositoryResult<Product> {
        use crate::schema::{product_categories, products};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let row: DbProduct = diesel::insert_into(products::table)
                .values(DbNewProduct::from_domain(product, Utc::now().naive_utc()))
                .get_result(conn)?;

            let links: Vec<ProductCategory> = categories
                .iter()
                .map(|category_id| ProductCategory {
                    product_id: row.id,
                    category_id: category_id.get(),
                })
                .collect();
            if !links.is_empty() {
                diesel::insert_into(product_categories::table)
                    .values(&links)
                    .execute(conn)?;
            }

            with_categories(conn, vec![row])?
                .pop()
                .ok_or(RepositoryError::NotFound)
        })
    }

    fn update_product(
        &self,
        id: ProductId,
        product: &NewProduct,
        categories: &[CategoryId],
    ) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let affected = diesel::update(products::table.filter(products::id.eq(id.get())))
                .set(ProductChangeset::from(product))
                .execute(conn)?;
            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }

            replace_category_links(conn, id.get(), categories)?;

            let row = products::table
                .filter(products::id.eq(id.get()))
                .first::<DbProduct>(conn)?;

            with_categories(conn, vec![row])?
                .pop()
                .ok_or(RepositoryError::NotFound)
        })
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        // Association rows cascade; order items do not, so a referenced
        // product surfaces as a foreign key violation.
        let affected = diesel::delete(products::table.filter(products::id.eq(id.get())))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
