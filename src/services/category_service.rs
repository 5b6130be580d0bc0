// src/services/category_service.rs

use std::{collections::HashSet, sync::Arc, time::Duration};

use crate::{
    common::{db_utils::with_deadline, error::AppError},
    db::CatalogStore,
    models::category::{CascadeSummary, Category, CategoryPayload},
};

fn not_found(id: i64) -> AppError {
    AppError::NotFound(anyhow::anyhow!("category with id={id} not found"))
}

#[derive(Clone)]
pub struct CategoryService {
    store: Arc<dyn CatalogStore>,
    tx_timeout: Duration,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CatalogStore>, tx_timeout: Duration) -> Self {
        Self { store, tx_timeout }
    }

    pub async fn create(&self, payload: &CategoryPayload) -> Result<Category, AppError> {
        if let Some(parent_id) = payload.parent_id {
            self.ensure_parent_exists(parent_id).await?;
        }

        let category = self.store.create_category(payload).await?;
        tracing::info!(category_id = category.id, parent_id = ?category.parent_id, "categoria criada");
        Ok(category)
    }

    pub async fn list(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.store.list_categories().await?)
    }

    pub async fn get(&self, id: i64) -> Result<Category, AppError> {
        self.store.get_category(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn update(&self, id: i64, payload: &CategoryPayload) -> Result<Category, AppError> {
        self.get(id).await?;
        if let Some(parent_id) = payload.parent_id {
            self.ensure_parent_exists(parent_id).await?;
            self.ensure_not_own_descendant(id, parent_id).await?;
        }

        self.store
            .update_category(id, payload)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Remove a categoria, todas as descendentes e os produtos de cada uma,
    /// numa única transação.
    pub async fn delete(&self, id: i64) -> Result<CascadeSummary, AppError> {
        let summary = with_deadline(self.tx_timeout, self.delete_cascade(id)).await?;
        tracing::info!(
            category_id = id,
            categories = summary.categories,
            products = summary.products,
            "categoria removida em cascata"
        );
        Ok(summary)
    }

    async fn delete_cascade(&self, id: i64) -> Result<CascadeSummary, AppError> {
        let mut tx = self.store.begin().await?;

        if tx.delete_category(id).await? == 0 {
            return Err(not_found(id));
        }
        let mut summary = CascadeSummary {
            categories: 1,
            products: tx.delete_products_by_category(id).await?,
        };

        // Pilha explícita: a profundidade da árvore não pesa na pilha de chamadas.
        let mut pending = tx.child_category_ids(id).await?;
        while let Some(child_id) = pending.pop() {
            pending.extend(tx.child_category_ids(child_id).await?);
            summary.categories += tx.delete_category(child_id).await?;
            summary.products += tx.delete_products_by_category(child_id).await?;
        }

        tx.commit().await?;
        Ok(summary)
    }

    async fn ensure_parent_exists(&self, parent_id: i64) -> Result<(), AppError> {
        match self.store.get_category(parent_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(anyhow::anyhow!(
                "parent category with id={parent_id} not found"
            ))),
        }
    }

    // Sobe a partir do novo pai; se passar pela própria categoria, haveria ciclo.
    async fn ensure_not_own_descendant(&self, id: i64, new_parent_id: i64) -> Result<(), AppError> {
        let mut visited = HashSet::new();
        let mut cursor = Some(new_parent_id);

        while let Some(current) = cursor {
            if current == id {
                return Err(AppError::UnprocessableEntity {
                    message: "category cannot be moved into its own subtree",
                    source: anyhow::anyhow!("category {id} is an ancestor of {new_parent_id}"),
                });
            }
            if !visited.insert(current) {
                break;
            }
            cursor = self
                .store
                .get_category(current)
                .await?
                .and_then(|category| category.parent_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::MemoryCatalogStore,
        models::{brand::BrandPayload, product::ProductDraft},
    };
    use assert_matches::assert_matches;

    const DEADLINE: Duration = Duration::from_secs(3);

    fn payload(slug: &str, parent_id: Option<i64>) -> CategoryPayload {
        CategoryPayload { name: slug.to_uppercase(), slug: slug.into(), parent_id }
    }

    async fn add_product(store: &MemoryCatalogStore, brand_id: i64, category_id: i64, slug: &str) {
        let mut tx = store.begin().await.unwrap();
        tx.create_product(&ProductDraft {
            brand_id,
            category_id,
            name: slug.to_uppercase(),
            slug: slug.into(),
            description: String::new(),
            price_kopeck: 1000,
            is_active: true,
        })
        .await
        .unwrap();
        tx.commit().await.unwrap();
    }

    /// A -> B -> C, com P1 em B e P2 em C.
    async fn seed_chain(store: &MemoryCatalogStore) -> (Category, Category, Category) {
        let categories = CategoryService::new(Arc::new(store.clone()), DEADLINE);
        let a = categories.create(&payload("a", None)).await.unwrap();
        let b = categories.create(&payload("b", Some(a.id))).await.unwrap();
        let c = categories.create(&payload("c", Some(b.id))).await.unwrap();
        let brand = store
            .create_brand(&BrandPayload { name: "Acme".into(), slug: "acme".into() })
            .await
            .unwrap();
        add_product(store, brand.id, b.id, "p1").await;
        add_product(store, brand.id, c.id, "p2").await;
        (a, b, c)
    }

    #[tokio::test]
    async fn cascade_removes_every_descendant_and_their_products() {
        let store = MemoryCatalogStore::new();
        let (a, _, _) = seed_chain(&store).await;
        let categories = CategoryService::new(Arc::new(store.clone()), DEADLINE);

        let summary = categories.delete(a.id).await.unwrap();

        assert_eq!(summary, CascadeSummary { categories: 3, products: 2 });
        assert!(store.list_categories().await.unwrap().is_empty());
        assert!(store.list_products(false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn cascade_leaves_unrelated_branches_alone() {
        let store = MemoryCatalogStore::new();
        let (_, b, _) = seed_chain(&store).await;
        let categories = CategoryService::new(Arc::new(store.clone()), DEADLINE);

        categories.delete(b.id).await.unwrap();

        let left: Vec<String> = store
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.slug)
            .collect();
        assert_eq!(left, vec!["a"]);
    }

    #[tokio::test]
    async fn failure_deep_in_the_tree_rolls_everything_back() {
        let store = MemoryCatalogStore::new();
        let (a, _, c) = seed_chain(&store).await;
        store.fail_on_category_delete(c.id);
        let categories = CategoryService::new(Arc::new(store.clone()), DEADLINE);

        let err = categories.delete(a.id).await.unwrap_err();

        assert_matches!(err, AppError::Internal(_));
        assert_eq!(store.list_categories().await.unwrap().len(), 3);
        assert_eq!(store.list_products(false).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn deleting_a_missing_category_is_not_found_every_time() {
        let store = MemoryCatalogStore::new();
        seed_chain(&store).await;
        let categories_before = store.list_categories().await.unwrap();
        let products_before = store.list_products(false).await.unwrap();
        let categories = CategoryService::new(Arc::new(store.clone()), DEADLINE);

        assert_matches!(categories.delete(404).await, Err(AppError::NotFound(_)));
        assert_matches!(categories.delete(404).await, Err(AppError::NotFound(_)));

        assert_eq!(store.list_categories().await.unwrap(), categories_before);
        assert_eq!(store.list_products(false).await.unwrap(), products_before);
    }

    #[tokio::test]
    async fn updating_a_missing_category_is_not_found() {
        let store = MemoryCatalogStore::new();
        let categories = CategoryService::new(Arc::new(store.clone()), DEADLINE);

        let err = categories.update(404, &payload("ghost", None)).await.unwrap_err();

        assert_matches!(err, AppError::NotFound(_));
        assert!(err.cause_chain().contains("category with id=404 not found"));
        assert!(store.list_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn updating_to_a_missing_parent_is_not_found_and_keeps_the_row() {
        let store = MemoryCatalogStore::new();
        let (_, b, _) = seed_chain(&store).await;
        let categories = CategoryService::new(Arc::new(store.clone()), DEADLINE);

        let err = categories.update(b.id, &payload("b-moved", Some(77))).await.unwrap_err();

        assert_matches!(err, AppError::NotFound(_));
        assert!(err.cause_chain().contains("parent category with id=77 not found"));
        assert_eq!(categories.get(b.id).await.unwrap(), b);
    }

    #[tokio::test]
    async fn missing_parent_is_caught_before_the_insert() {
        let store = MemoryCatalogStore::new();
        let categories = CategoryService::new(Arc::new(store.clone()), DEADLINE);

        let err = categories.create(&payload("orphan", Some(77))).await.unwrap_err();

        assert_matches!(err, AppError::NotFound(_));
        assert!(err.cause_chain().contains("parent category with id=77 not found"));
        assert!(store.list_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_enforced_parent_reference_is_unprocessable() {
        let store = MemoryCatalogStore::new();

        let err: AppError = store
            .create_category(&payload("orphan", Some(77)))
            .await
            .unwrap_err()
            .into();

        assert_matches!(
            err,
            AppError::UnprocessableEntity { message: "there is no category with such parent id", .. }
        );
    }

    #[tokio::test]
    async fn moving_a_category_under_its_descendant_is_rejected() {
        let store = MemoryCatalogStore::new();
        let (a, _, c) = seed_chain(&store).await;
        let categories = CategoryService::new(Arc::new(store.clone()), DEADLINE);

        let into_grandchild = categories.update(a.id, &payload("a", Some(c.id))).await;
        let into_itself = categories.update(a.id, &payload("a", Some(a.id))).await;

        assert_matches!(into_grandchild, Err(AppError::UnprocessableEntity { .. }));
        assert_matches!(into_itself, Err(AppError::UnprocessableEntity { .. }));
        assert_eq!(categories.get(a.id).await.unwrap().parent_id, None);
    }

    #[tokio::test]
    async fn category_can_move_to_another_branch() {
        let store = MemoryCatalogStore::new();
        let (a, _, c) = seed_chain(&store).await;
        let categories = CategoryService::new(Arc::new(store.clone()), DEADLINE);
        let other = categories.create(&payload("other", None)).await.unwrap();

        let moved = categories.update(c.id, &payload("c", Some(other.id))).await.unwrap();

        assert_eq!(moved.parent_id, Some(other.id));
        assert_eq!(categories.delete(a.id).await.unwrap().categories, 2);
    }
}
