// src/services/brand_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::CatalogStore,
    models::brand::{Brand, BrandPayload},
};

fn not_found(id: i64) -> AppError {
    AppError::NotFound(anyhow::anyhow!("brand with id={id} not found"))
}

#[derive(Clone)]
pub struct BrandService {
    store: Arc<dyn CatalogStore>,
}

impl BrandService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, payload: &BrandPayload) -> Result<Brand, AppError> {
        let brand = self.store.create_brand(payload).await?;
        tracing::info!(brand_id = brand.id, slug = %brand.slug, "marca criada");
        Ok(brand)
    }

    pub async fn list(&self) -> Result<Vec<Brand>, AppError> {
        Ok(self.store.list_brands().await?)
    }

    pub async fn get(&self, id: i64) -> Result<Brand, AppError> {
        self.store.get_brand(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn update(&self, id: i64, payload: &BrandPayload) -> Result<Brand, AppError> {
        self.store
            .update_brand(id, payload)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let deleted = match self.store.delete_brand(id).await {
            Ok(rows) => rows,
            Err(err) if err.is_foreign_key_violation() => {
                return Err(AppError::UnprocessableEntity {
                    message: "brand is still referenced by products",
                    source: err.into(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        if deleted == 0 {
            return Err(not_found(id));
        }
        tracing::info!(brand_id = id, "marca removida");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{CatalogStore, MemoryCatalogStore},
        models::{category::CategoryPayload, product::ProductDraft},
    };
    use assert_matches::assert_matches;

    fn payload(name: &str, slug: &str) -> BrandPayload {
        BrandPayload { name: name.into(), slug: slug.into() }
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_conflict_and_keeps_the_first_brand() {
        let store = Arc::new(MemoryCatalogStore::new());
        let brands = BrandService::new(store.clone());
        let first = brands.create(&payload("Acme", "acme")).await.unwrap();

        let err = brands.create(&payload("Acme Two", "acme")).await.unwrap_err();

        assert_matches!(err, AppError::Conflict { message: "slug already exists", .. });
        assert_eq!(brands.list().await.unwrap(), vec![first]);
    }

    #[tokio::test]
    async fn duplicate_name_reports_the_name() {
        let brands = BrandService::new(Arc::new(MemoryCatalogStore::new()));
        brands.create(&payload("Acme", "acme")).await.unwrap();

        let err = brands.create(&payload("Acme", "acme-2")).await.unwrap_err();

        assert_matches!(err, AppError::Conflict { message: "name already exists", .. });
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_brands() {
        let brands = BrandService::new(Arc::new(MemoryCatalogStore::new()));

        assert_matches!(brands.update(9, &payload("X", "x")).await, Err(AppError::NotFound(_)));
        assert_matches!(brands.delete(9).await, Err(AppError::NotFound(_)));
        assert_matches!(brands.get(9).await, Err(AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn deleting_a_brand_in_use_is_unprocessable() {
        let store = Arc::new(MemoryCatalogStore::new());
        let brands = BrandService::new(store.clone());
        let brand = brands.create(&payload("Acme", "acme")).await.unwrap();
        let category = store
            .create_category(&CategoryPayload { name: "Shoes".into(), slug: "shoes".into(), parent_id: None })
            .await
            .unwrap();
        let mut tx = store.begin().await.unwrap();
        tx.create_product(&ProductDraft {
            brand_id: brand.id,
            category_id: category.id,
            name: "Runner".into(),
            slug: "runner".into(),
            description: String::new(),
            price_kopeck: 500,
            is_active: true,
        })
        .await
        .unwrap();
        tx.commit().await.unwrap();

        let err = brands.delete(brand.id).await.unwrap_err();

        assert_matches!(
            err,
            AppError::UnprocessableEntity { message: "brand is still referenced by products", .. }
        );
        assert!(brands.get(brand.id).await.is_ok());
    }
}
