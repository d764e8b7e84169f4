use axum_helpers::FieldError;
use std::sync::Arc;
use tracing::instrument;
use validator::{Validate, ValidationErrors};

use crate::error::{ProductError, ProductResult};
use crate::models::{AvailabilityChange, CreateProduct, Product, ReplaceProduct};
use crate::repository::ProductRepository;

/// Service layer for product operations
///
/// Turns "no such row" outcomes into [`ProductError::NotFound`] and refuses
/// to persist inputs that break the product invariants, whoever the caller is.
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate().map_err(invalid)?;
        self.repository.create(input).await
    }

    #[instrument(skip(self, input))]
    pub async fn replace_product(&self, id: i32, input: ReplaceProduct) -> ProductResult<Product> {
        input.validate().map_err(invalid)?;
        self.repository
            .update(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn change_availability(
        &self,
        id: i32,
        change: AvailabilityChange,
    ) -> ProductResult<Product> {
        self.repository
            .set_availability(id, change)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(ProductError::NotFound(id))
        }
    }
}

/// Flatten validator output into field errors, ordered by field name.
fn invalid(errors: ValidationErrors) -> ProductError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let errors = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                FieldError::new(field.to_string(), message)
            })
        })
        .collect();

    ProductError::Validation(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;

    fn product(id: i32, availability: bool) -> Product {
        Product {
            id,
            name: "Monitor".to_string(),
            price: 300.0,
            availability,
        }
    }

    #[tokio::test]
    async fn test_get_product_missing_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(10))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let err = service.get_product(10).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(10)));
    }

    #[tokio::test]
    async fn test_create_product_rejects_non_positive_price() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().never();

        let service = ProductService::new(mock_repo);
        let err = service
            .create_product(CreateProduct {
                name: "Monitor".to_string(),
                price: -3.0,
            })
            .await
            .unwrap_err();

        match err {
            ProductError::Validation(errors) => {
                assert_eq!(errors, vec![FieldError::new("price", "the price cannot be negative.")]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_product_persists_valid_input() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Ok(product(1, true)));

        let service = ProductService::new(mock_repo);
        let created = service
            .create_product(CreateProduct {
                name: "Monitor".to_string(),
                price: 300.0,
            })
            .await
            .unwrap();
        assert!(created.availability);
    }

    #[tokio::test]
    async fn test_replace_product_missing_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_update().returning(|_, _| Ok(None));

        let service = ProductService::new(mock_repo);
        let err = service
            .replace_product(
                5,
                ReplaceProduct {
                    name: "Monitor".to_string(),
                    price: 10.0,
                    availability: true,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound(5)));
    }

    #[tokio::test]
    async fn test_change_availability_passes_change_through() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_set_availability()
            .with(eq(2), eq(AvailabilityChange::Toggle))
            .returning(|id, _| Ok(Some(product(id, false))));

        let service = ProductService::new(mock_repo);
        let updated = service
            .change_availability(2, AvailabilityChange::Toggle)
            .await
            .unwrap();
        assert!(!updated.availability);
    }

    #[tokio::test]
    async fn test_delete_product_missing_is_not_found_every_time() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_delete().times(2).returning(|_| Ok(false));

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.delete_product(1).await,
            Err(ProductError::NotFound(1))
        ));
        assert!(matches!(
            service.delete_product(1).await,
            Err(ProductError::NotFound(1))
        ));
    }

    #[tokio::test]
    async fn test_store_fault_propagates() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list()
            .returning(|| Err(ProductError::Store("connection refused".to_string())));

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.list_products().await,
            Err(ProductError::Store(_))
        ));
    }
}
