use diesel::prelude::*;

/// Row of the `product_categories` join table.
#[derive(Debug, Clone, Copy, Insertable, Queryable)]
#[diesel(table_name = crate::schema::product_categories)]
pub struct ProductCategory {
    pub product_id: i32,
    pub category_id: i32,
}
