use async_trait::async_trait;
use sea_orm::sea_query::{self, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{AvailabilityChange, CreateProduct, Product, ReplaceProduct},
    repository::ProductRepository,
};

/// PostgreSQL implementation of ProductRepository
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Log a store fault where it happens and hide it behind `ProductError::Store`.
fn store_fault(operation: &'static str) -> impl FnOnce(DbErr) -> ProductError {
    move |err| {
        tracing::error!(operation, error = %err, "Product store operation failed");
        ProductError::from(err)
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_fault("list"))?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_fault("get_by_id"))?;

        Ok(model.map(Product::from))
    }

    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model
            .insert(&self.db)
            .await
            .map_err(store_fault("create"))?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, id: i32, input: ReplaceProduct) -> ProductResult<Option<Product>> {
        let updated = entity::Entity::update_many()
            .col_expr(entity::Column::Name, Expr::value(input.name))
            .col_expr(entity::Column::Price, Expr::value(input.price))
            .col_expr(entity::Column::Availability, Expr::value(input.availability))
            .filter(entity::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(store_fault("update"))?;

        let product = updated.into_iter().next().map(Product::from);
        if product.is_some() {
            tracing::info!(product_id = id, "Updated product");
        }
        Ok(product)
    }

    async fn set_availability(
        &self,
        id: i32,
        change: AvailabilityChange,
    ) -> ProductResult<Option<Product>> {
        let value = match change {
            AvailabilityChange::Toggle => {
                sea_query::ExprTrait::not(Expr::col(entity::Column::Availability))
            }
            AvailabilityChange::Set(value) => Expr::value(value),
        };

        let updated = entity::Entity::update_many()
            .col_expr(entity::Column::Availability, value)
            .filter(entity::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(store_fault("set_availability"))?;

        let product = updated.into_iter().next().map(Product::from);
        if let Some(product) = &product {
            tracing::info!(
                product_id = id,
                availability = product.availability,
                "Changed product availability"
            );
        }
        Ok(product)
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(store_fault("delete"))?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: i32, availability: bool) -> entity::Model {
        entity::Model {
            id,
            name: "Monitor".to_string(),
            price: 300.0,
            availability,
        }
    }

    fn repo(db: MockDatabase) -> PgProductRepository {
        PgProductRepository::new(db.into_connection())
    }

    #[tokio::test]
    async fn test_list_maps_models() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![model(1, true), model(2, false)]]),
        );

        let products = repo.list().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].id, 2);
        assert!(!products[1].availability);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<entity::Model>::new()]),
        );

        assert!(repo.get_by_id(10).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_returns_inserted_row() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![model(7, true)]]),
        );

        let product = repo
            .create(CreateProduct {
                name: "Monitor".to_string(),
                price: 300.0,
            })
            .await
            .unwrap();
        assert_eq!(product.id, 7);
        assert!(product.availability);
    }

    #[tokio::test]
    async fn test_set_availability_returns_updated_row() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![model(3, false)]]),
        );

        let product = repo
            .set_availability(3, AvailabilityChange::Toggle)
            .await
            .unwrap()
            .unwrap();
        assert!(!product.availability);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_none() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<entity::Model>::new()]),
        );

        let result = repo
            .update(
                99,
                ReplaceProduct {
                    name: "Monitor".to_string(),
                    price: 1.0,
                    availability: true,
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let repo = repo(MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ]));

        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_store_fault_is_mapped() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([DbErr::Custom("connection closed".to_string())]),
        );

        let err = repo.list().await.unwrap_err();
        assert!(matches!(err, ProductError::Store(_)));
    }
}
