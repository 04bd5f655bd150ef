use crate::db::StorageError;
use crate::forms::product::{FilterClause, ListingQuery, SortSpec};
use crate::models;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::Instrument;
use uuid::Uuid;

// The expression must match the GIN index in the migrations exactly.
const SEARCH_VECTOR: &str =
    "to_tsvector('english', name || ' ' || description || ' ' || category)";

enum Column {
    Text(&'static str),
    Int(&'static str),
    Float(&'static str),
    Id(&'static str),
}

fn filter_column(field: &str) -> Option<Column> {
    match field {
        "name" => Some(Column::Text("name")),
        "description" => Some(Column::Text("description")),
        "category" => Some(Column::Text("category")),
        "location" => Some(Column::Text("location")),
        "stock" => Some(Column::Int("stock")),
        "price" => Some(Column::Float("price")),
        "rating" => Some(Column::Float("rating")),
        "createdBy" => Some(Column::Id("created_by")),
        _ => None,
    }
}

fn sort_column(field: &str) -> Option<&'static str> {
    match field {
        "name" => Some("name"),
        "price" => Some("price"),
        "rating" => Some("rating"),
        "stock" => Some("stock"),
        "category" => Some("category"),
        "location" => Some("location"),
        "createdAt" => Some("created_at"),
        "updatedAt" => Some("updated_at"),
        _ => None,
    }
}

/// Translate the clause list into SQL predicates. This is the only place
/// the filter meets the store's query language.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, query: &ListingQuery) {
    let mut prefix = " WHERE ";

    for clause in &query.filter {
        builder.push(prefix);
        prefix = " AND ";

        match clause {
            FilterClause::Equals { field, value } => match filter_column(field) {
                Some(Column::Text(column)) => {
                    builder.push(column).push(" = ").push_bind(value.clone());
                }
                Some(Column::Int(column)) => match value.parse::<i32>() {
                    Ok(value) => {
                        builder.push(column).push(" = ").push_bind(value);
                    }
                    // a wrong-typed equality matches nothing
                    Err(_) => {
                        builder.push("FALSE");
                    }
                },
                Some(Column::Float(column)) => match value.parse::<f64>() {
                    Ok(value) => {
                        builder.push(column).push(" = ").push_bind(value);
                    }
                    Err(_) => {
                        builder.push("FALSE");
                    }
                },
                Some(Column::Id(column)) => match value.parse::<Uuid>() {
                    Ok(value) => {
                        builder.push(column).push(" = ").push_bind(value);
                    }
                    Err(_) => {
                        builder.push("FALSE");
                    }
                },
                None => {
                    builder.push("FALSE");
                }
            },
            FilterClause::Range { field, min, max } => {
                let column = match filter_column(field) {
                    Some(Column::Float(column)) | Some(Column::Int(column)) => column,
                    _ => {
                        builder.push("FALSE");
                        continue;
                    }
                };

                match (min, max) {
                    (Some(min), Some(max)) => {
                        builder
                            .push(column)
                            .push(" >= ")
                            .push_bind(*min)
                            .push(" AND ")
                            .push(column)
                            .push(" <= ")
                            .push_bind(*max);
                    }
                    (Some(min), None) => {
                        builder.push(column).push(" >= ").push_bind(*min);
                    }
                    (None, Some(max)) => {
                        builder.push(column).push(" <= ").push_bind(*max);
                    }
                    (None, None) => {
                        builder.push("TRUE");
                    }
                }
            }
            FilterClause::TextSearch { term } => {
                builder
                    .push(SEARCH_VECTOR)
                    .push(" @@ plainto_tsquery('english', ")
                    .push_bind(term.clone())
                    .push(")");
            }
        }
    }
}

fn push_order(builder: &mut QueryBuilder<'_, Postgres>, query: &ListingQuery) {
    match &query.sort {
        SortSpec::Relevance => match query.search_term() {
            Some(term) => {
                builder
                    .push(" ORDER BY ts_rank(")
                    .push(SEARCH_VECTOR)
                    .push(", plainto_tsquery('english', ")
                    .push_bind(term.to_string())
                    .push(")) DESC");
            }
            // nothing to rank against without a text clause
            None => {
                builder.push(" ORDER BY created_at DESC");
            }
        },
        SortSpec::Fields(fields) => {
            let mut prefix = " ORDER BY ";
            for sort in fields {
                if let Some(column) = sort_column(&sort.field) {
                    builder
                        .push(prefix)
                        .push(column)
                        .push(if sort.descending { " DESC" } else { " ASC" });
                    prefix = ", ";
                }
            }
            if prefix == " ORDER BY " {
                builder.push(" ORDER BY created_at DESC");
            }
        }
    }
}

pub async fn fetch_all(
    pg_pool: &PgPool,
    query: &ListingQuery,
) -> Result<Vec<models::Product>, StorageError> {
    let query_span = tracing::info_span!("Fetch a page of products.");

    let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT * FROM products");
    push_filter(&mut builder, query);
    push_order(&mut builder, query);
    builder
        .push(" LIMIT ")
        .push_bind(query.limit)
        .push(" OFFSET ")
        .push_bind(query.skip());

    builder
        .build_query_as::<models::Product>()
        .fetch_all(pg_pool)
        .instrument(query_span)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute fetch query: {:?}", e);
            StorageError::Database(e)
        })
}

pub async fn count(pg_pool: &PgPool, query: &ListingQuery) -> Result<i64, StorageError> {
    let query_span = tracing::info_span!("Count products matching the filter.");

    let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM products");
    push_filter(&mut builder, query);

    builder
        .build_query_scalar::<i64>()
        .fetch_one(pg_pool)
        .instrument(query_span)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute count query: {:?}", e);
            StorageError::Database(e)
        })
}

pub async fn fetch(pg_pool: &PgPool, id: Uuid) -> Result<Option<models::Product>, StorageError> {
    let query_span = tracing::info_span!("Fetch product by id.");

    sqlx::query_as::<_, models::Product>(
        r#"SELECT * FROM products WHERE id = $1 LIMIT 1"#,
    )
    .bind(id)
    .fetch_one(pg_pool)
    .instrument(query_span)
    .await
    .map(Some)
    .or_else(|e| match e {
        sqlx::Error::RowNotFound => Ok(None),
        e => {
            tracing::error!("Failed to execute fetch query: {:?}", e);
            Err(StorageError::Database(e))
        }
    })
}

#[derive(sqlx::FromRow)]
struct ProductOwnerRow {
    #[sqlx(flatten)]
    product: models::Product,
    owner_name: String,
    owner_email: String,
}

/// Fetch a product with the owner's name/email projection attached.
pub async fn fetch_with_owner(
    pg_pool: &PgPool,
    id: Uuid,
) -> Result<Option<(models::Product, models::OwnerSummary)>, StorageError> {
    let query_span = tracing::info_span!("Fetch product with owner by id.");

    sqlx::query_as::<_, ProductOwnerRow>(
        r#"SELECT p.*, u.name AS owner_name, u.email AS owner_email
        FROM products p
        JOIN users u ON u.id = p.created_by
        WHERE p.id = $1
        LIMIT 1"#,
    )
    .bind(id)
    .fetch_one(pg_pool)
    .instrument(query_span)
    .await
    .map(|row| {
        Some((
            row.product,
            models::OwnerSummary {
                name: row.owner_name,
                email: row.owner_email,
            },
        ))
    })
    .or_else(|e| match e {
        sqlx::Error::RowNotFound => Ok(None),
        e => {
            tracing::error!("Failed to execute fetch query: {:?}", e);
            Err(StorageError::Database(e))
        }
    })
}

pub async fn insert(
    pg_pool: &PgPool,
    product: models::Product,
) -> Result<models::Product, StorageError> {
    product.invariants()?;

    let query_span = tracing::info_span!("Saving new product into the database.");
    sqlx::query_as::<_, models::Product>(
        r#"
        INSERT INTO products (name, description, price, category, stock, location, rating,
                              created_by, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price)
    .bind(&product.category)
    .bind(product.stock)
    .bind(&product.location)
    .bind(product.rating)
    .bind(product.created_by)
    .fetch_one(pg_pool)
    .instrument(query_span)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute insert query: {:?}", e);
        StorageError::Database(e)
    })
}

/// Persist an already-merged product. Invariants are re-checked on the
/// merged entity before any SQL runs.
pub async fn update(
    pg_pool: &PgPool,
    product: models::Product,
) -> Result<Option<models::Product>, StorageError> {
    product.invariants()?;

    let query_span = tracing::info_span!("Updating product in the database.");
    sqlx::query_as::<_, models::Product>(
        r#"
        UPDATE products
        SET name = $2, description = $3, price = $4, category = $5, stock = $6,
            location = $7, rating = $8, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(product.id)
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price)
    .bind(&product.category)
    .bind(product.stock)
    .bind(&product.location)
    .bind(product.rating)
    .fetch_one(pg_pool)
    .instrument(query_span)
    .await
    .map(Some)
    .or_else(|e| match e {
        sqlx::Error::RowNotFound => Ok(None),
        e => {
            tracing::error!("Failed to execute update query: {:?}", e);
            Err(StorageError::Database(e))
        }
    })
}

pub async fn delete(pg_pool: &PgPool, id: Uuid) -> Result<Option<models::Product>, StorageError> {
    let query_span = tracing::info_span!("Deleting product from the database.");

    sqlx::query_as::<_, models::Product>(
        r#"DELETE FROM products WHERE id = $1 RETURNING *"#,
    )
    .bind(id)
    .fetch_one(pg_pool)
    .instrument(query_span)
    .await
    .map(Some)
    .or_else(|e| match e {
        sqlx::Error::RowNotFound => Ok(None),
        e => {
            tracing::error!("Failed to execute delete query: {:?}", e);
            Err(StorageError::Database(e))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn listing(pairs: &[(&str, &str)]) -> ListingQuery {
        let params: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ListingQuery::from_params(&params)
    }

    #[test]
    fn equality_and_range_translate_to_bound_predicates() {
        let query = listing(&[
            ("category", "Fruits"),
            ("minPrice", "50"),
            ("maxPrice", "200"),
        ]);

        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT * FROM products");
        push_filter(&mut builder, &query);
        let sql = builder.sql();

        assert!(sql.contains("category = $1"), "got {:?}", sql);
        assert!(sql.contains("price >= $2"), "got {:?}", sql);
        assert!(sql.contains("price <= $3"), "got {:?}", sql);
        assert!(!sql.contains("minPrice"));
        assert!(!sql.contains("maxPrice"));
    }

    #[test]
    fn text_search_uses_the_indexed_vector() {
        let query = listing(&[("search", "organic tomato")]);

        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT * FROM products");
        push_filter(&mut builder, &query);
        push_order(&mut builder, &query);
        let sql = builder.sql();

        assert!(sql.contains("@@ plainto_tsquery('english', $1)"), "got {:?}", sql);
        assert!(sql.contains("ORDER BY ts_rank("), "got {:?}", sql);
    }

    #[test]
    fn wrong_typed_equality_matches_nothing() {
        let query = listing(&[("stock", "plenty")]);

        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT * FROM products");
        push_filter(&mut builder, &query);

        assert!(builder.sql().contains("WHERE FALSE"));
    }

    #[test]
    fn default_sort_is_newest_first() {
        let query = listing(&[]);

        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT * FROM products");
        push_order(&mut builder, &query);

        assert_eq!(builder.sql(), "SELECT * FROM products ORDER BY created_at DESC");
    }

    #[test]
    fn sort_fields_map_to_columns_with_direction() {
        let query = listing(&[("sort", "-price,rating")]);

        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new("");
        push_order(&mut builder, &query);

        assert_eq!(builder.sql(), " ORDER BY price DESC, rating ASC");
    }
}
