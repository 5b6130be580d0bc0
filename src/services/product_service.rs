// src/services/product_service.rs

use std::{sync::Arc, time::Duration};

use crate::{
    common::{db_utils::with_deadline, error::AppError},
    db::CatalogStore,
    models::product::{PriceChange, Product, ProductDraft, ProductPriceHistory},
};

fn not_found(id: i64) -> AppError {
    AppError::NotFound(anyhow::anyhow!("product with id={id} not found"))
}

// Sem ator não há como atribuir a mudança de preço.
fn require_actor(actor: Option<i64>) -> Result<i64, AppError> {
    actor.ok_or_else(|| AppError::Internal(anyhow::anyhow!("no authenticated admin in request context")))
}

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn CatalogStore>,
    tx_timeout: Duration,
}

impl ProductService {
    pub fn new(store: Arc<dyn CatalogStore>, tx_timeout: Duration) -> Self {
        Self { store, tx_timeout }
    }

    /// Cria o produto e a primeira linha do histórico (`0 -> preço`).
    pub async fn create(&self, actor: Option<i64>, draft: ProductDraft) -> Result<Product, AppError> {
        self.ensure_references(&draft).await?;

        let product = with_deadline(self.tx_timeout, async {
            let mut tx = self.store.begin().await?;
            let product = tx.create_product(&draft).await?;
            tx.insert_price_history(&PriceChange {
                product_id: product.id,
                old_price_kopeck: 0,
                new_price_kopeck: product.price_kopeck,
                updated_by: require_actor(actor)?,
            })
            .await?;
            tx.commit().await?;
            Ok::<_, AppError>(product)
        })
        .await?;

        tracing::info!(product_id = product.id, price_kopeck = product.price_kopeck, "produto criado");
        Ok(product)
    }

    /// Atualiza o produto; se o preço mudou, registra exatamente uma transição.
    pub async fn update(
        &self,
        actor: Option<i64>,
        id: i64,
        draft: ProductDraft,
    ) -> Result<Product, AppError> {
        self.ensure_references(&draft).await?;

        let (product, old_price) = with_deadline(self.tx_timeout, async {
            let mut tx = self.store.begin().await?;
            let current = tx.get_product_for_update(id).await?.ok_or_else(|| not_found(id))?;
            let product = tx.update_product(id, &draft).await?.ok_or_else(|| not_found(id))?;

            if current.price_kopeck != product.price_kopeck {
                tx.insert_price_history(&PriceChange {
                    product_id: id,
                    old_price_kopeck: current.price_kopeck,
                    new_price_kopeck: product.price_kopeck,
                    updated_by: require_actor(actor)?,
                })
                .await?;
            }
            tx.commit().await?;
            Ok::<_, AppError>((product, current.price_kopeck))
        })
        .await?;

        if old_price != product.price_kopeck {
            tracing::info!(
                product_id = id,
                old_price_kopeck = old_price,
                new_price_kopeck = product.price_kopeck,
                "preço alterado"
            );
        }
        Ok(product)
    }

    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.store.list_products(false).await?)
    }

    pub async fn list_active(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.store.list_products(true).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Product, AppError> {
        self.store.get_product(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.store.delete_product(id).await? == 0 {
            return Err(not_found(id));
        }
        tracing::info!(product_id = id, "produto removido");
        Ok(())
    }

    pub async fn price_history(&self, product_id: i64) -> Result<Vec<ProductPriceHistory>, AppError> {
        self.get(product_id).await?;
        Ok(self.store.list_price_history(product_id).await?)
    }

    async fn ensure_references(&self, draft: &ProductDraft) -> Result<(), AppError> {
        if self.store.get_brand(draft.brand_id).await?.is_none() {
            return Err(AppError::NotFound(anyhow::anyhow!(
                "brand with id={} not found",
                draft.brand_id
            )));
        }
        if self.store.get_category(draft.category_id).await?.is_none() {
            return Err(AppError::NotFound(anyhow::anyhow!(
                "category with id={} not found",
                draft.category_id
            )));
        }
        Ok(())
    }
}
