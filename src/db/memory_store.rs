// src/db/memory_store.rs

use std::{
    collections::{BTreeMap, HashSet},
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    db::{CatalogStore, CatalogTx, DbError},
    models::{
        auth::AdminUser,
        brand::{Brand, BrandPayload},
        category::{Category, CategoryPayload},
        product::{PriceChange, Product, ProductDraft, ProductPriceHistory},
    },
};

/// Store em memória com as mesmas regras do schema Postgres.
///
/// Unicidade é checada na hora; chaves estrangeiras só no commit (ou no fim
/// de cada operação em auto-commit), como as FKs `DEFERRABLE INITIALLY
/// DEFERRED` da migração. Cada transação trabalha sobre uma cópia das tabelas
/// e o commit substitui o estado inteiro, desde que ninguém tenha gravado
/// nada depois do `begin` (senão o commit falha, como uma falha de
/// serialização no Postgres).
#[derive(Clone, Default)]
pub struct MemoryCatalogStore {
    tables: Arc<Mutex<Tables>>,
    failing_category_deletes: Arc<Mutex<HashSet<i64>>>,
}

#[derive(Debug, Clone, Default)]
struct Tables {
    brands: BTreeMap<i64, Brand>,
    categories: BTreeMap<i64, Category>,
    products: BTreeMap<i64, Product>,
    price_history: Vec<ProductPriceHistory>,
    admins: BTreeMap<i64, AdminUser>,
    sequences: Sequences,
    // Incrementa a cada gravação confirmada.
    version: u64,
}

#[derive(Debug, Clone, Default)]
struct Sequences {
    brands: i64,
    categories: i64,
    products: i64,
    price_history: i64,
    admins: i64,
}

fn next(sequence: &mut i64) -> i64 {
    *sequence += 1;
    *sequence
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, DbError> {
    mutex
        .lock()
        .map_err(|_| DbError::Store("memory store lock poisoned".into()))
}

fn unique_violation(constraint: &str) -> DbError {
    DbError::UniqueViolation { constraint: constraint.to_string() }
}

fn foreign_key_violation(constraint: &str) -> DbError {
    DbError::ForeignKeyViolation { constraint: constraint.to_string() }
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Faz `DELETE` dessa categoria falhar dentro de transações.
    /// Injeção de falha para testes de rollback.
    #[doc(hidden)]
    pub fn fail_on_category_delete(&self, id: i64) {
        if let Ok(mut failing) = self.failing_category_deletes.lock() {
            failing.insert(id);
        }
    }

    fn autocommit<T>(&self, op: impl FnOnce(&mut Tables) -> Result<T, DbError>) -> Result<T, DbError> {
        let mut shared = lock(&self.tables)?;
        let mut working = shared.clone();
        let out = op(&mut working)?;
        working.check_references()?;
        working.version += 1;
        *shared = working;
        Ok(out)
    }

    fn read<T>(&self, op: impl FnOnce(&Tables) -> T) -> Result<T, DbError> {
        let tables = lock(&self.tables)?;
        Ok(op(&tables))
    }
}

impl Tables {
    fn check_references(&self) -> Result<(), DbError> {
        for category in self.categories.values() {
            if let Some(parent_id) = category.parent_id {
                if !self.categories.contains_key(&parent_id) {
                    return Err(foreign_key_violation("fk_categories_parent_id"));
                }
            }
        }
        for product in self.products.values() {
            if !self.brands.contains_key(&product.brand_id) {
                return Err(foreign_key_violation("fk_products_brand_id"));
            }
            if !self.categories.contains_key(&product.category_id) {
                return Err(foreign_key_violation("fk_products_category_id"));
            }
        }
        for entry in &self.price_history {
            if !self.products.contains_key(&entry.product_id) {
                return Err(foreign_key_violation("fk_product_price_history_product_id"));
            }
            if !self.admins.contains_key(&entry.updated_by) {
                return Err(foreign_key_violation("fk_product_price_history_updated_by"));
            }
        }
        Ok(())
    }

    // --- Marcas ---

    fn check_brand_unique(&self, id: Option<i64>, input: &BrandPayload) -> Result<(), DbError> {
        let others = || self.brands.values().filter(|b| Some(b.id) != id);
        if others().any(|b| b.name == input.name) {
            return Err(unique_violation("brands_name_key"));
        }
        if others().any(|b| b.slug == input.slug) {
            return Err(unique_violation("brands_slug_key"));
        }
        Ok(())
    }

    fn insert_brand(&mut self, input: &BrandPayload) -> Result<Brand, DbError> {
        self.check_brand_unique(None, input)?;
        let now = Utc::now();
        let brand = Brand {
            id: next(&mut self.sequences.brands),
            name: input.name.clone(),
            slug: input.slug.clone(),
            created_at: now,
            updated_at: now,
        };
        self.brands.insert(brand.id, brand.clone());
        Ok(brand)
    }

    fn update_brand(&mut self, id: i64, input: &BrandPayload) -> Result<Option<Brand>, DbError> {
        if !self.brands.contains_key(&id) {
            return Ok(None);
        }
        self.check_brand_unique(Some(id), input)?;
        let Some(brand) = self.brands.get_mut(&id) else {
            return Ok(None);
        };
        brand.name = input.name.clone();
        brand.slug = input.slug.clone();
        brand.updated_at = Utc::now();
        Ok(Some(brand.clone()))
    }

    // --- Categorias ---

    fn check_category_unique(&self, id: Option<i64>, slug: &str) -> Result<(), DbError> {
        if self
            .categories
            .values()
            .any(|c| Some(c.id) != id && c.slug == slug)
        {
            return Err(unique_violation("categories_slug_key"));
        }
        Ok(())
    }

    fn insert_category(&mut self, input: &CategoryPayload) -> Result<Category, DbError> {
        self.check_category_unique(None, &input.slug)?;
        let now = Utc::now();
        let category = Category {
            id: next(&mut self.sequences.categories),
            name: input.name.clone(),
            slug: input.slug.clone(),
            parent_id: input.parent_id,
            created_at: now,
            updated_at: now,
        };
        self.categories.insert(category.id, category.clone());
        Ok(category)
    }

    fn update_category(
        &mut self,
        id: i64,
        input: &CategoryPayload,
    ) -> Result<Option<Category>, DbError> {
        if !self.categories.contains_key(&id) {
            return Ok(None);
        }
        self.check_category_unique(Some(id), &input.slug)?;
        let Some(category) = self.categories.get_mut(&id) else {
            return Ok(None);
        };
        category.name = input.name.clone();
        category.slug = input.slug.clone();
        category.parent_id = input.parent_id;
        category.updated_at = Utc::now();
        Ok(Some(category.clone()))
    }

    // --- Produtos ---

    fn check_product_unique(&self, id: Option<i64>, slug: &str) -> Result<(), DbError> {
        if self
            .products
            .values()
            .any(|p| Some(p.id) != id && p.slug == slug)
        {
            return Err(unique_violation("products_slug_key"));
        }
        Ok(())
    }

    fn insert_product(&mut self, input: &ProductDraft) -> Result<Product, DbError> {
        self.check_product_unique(None, &input.slug)?;
        let now = Utc::now();
        let product = Product {
            id: next(&mut self.sequences.products),
            brand_id: input.brand_id,
            category_id: input.category_id,
            name: input.name.clone(),
            slug: input.slug.clone(),
            description: input.description.clone(),
            price_kopeck: input.price_kopeck,
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        };
        self.products.insert(product.id, product.clone());
        Ok(product)
    }

    fn update_product(&mut self, id: i64, input: &ProductDraft) -> Result<Option<Product>, DbError> {
        if !self.products.contains_key(&id) {
            return Ok(None);
        }
        self.check_product_unique(Some(id), &input.slug)?;
        let Some(product) = self.products.get_mut(&id) else {
            return Ok(None);
        };
        product.brand_id = input.brand_id;
        product.category_id = input.category_id;
        product.name = input.name.clone();
        product.slug = input.slug.clone();
        product.description = input.description.clone();
        product.price_kopeck = input.price_kopeck;
        product.is_active = input.is_active;
        product.updated_at = Utc::now();
        Ok(Some(product.clone()))
    }

    // ON DELETE CASCADE do histórico
    fn delete_product(&mut self, id: i64) -> u64 {
        match self.products.remove(&id) {
            Some(_) => {
                self.price_history.retain(|entry| entry.product_id != id);
                1
            }
            None => 0,
        }
    }

    fn delete_products_by_category(&mut self, category_id: i64) -> u64 {
        let ids: Vec<i64> = self
            .products
            .values()
            .filter(|p| p.category_id == category_id)
            .map(|p| p.id)
            .collect();
        ids.into_iter().map(|id| self.delete_product(id)).sum()
    }

    fn insert_price_history(&mut self, change: &PriceChange) -> ProductPriceHistory {
        let entry = ProductPriceHistory {
            id: next(&mut self.sequences.price_history),
            product_id: change.product_id,
            old_price_kopeck: change.old_price_kopeck,
            new_price_kopeck: change.new_price_kopeck,
            updated_by: change.updated_by,
            changed_at: Utc::now(),
        };
        self.price_history.push(entry.clone());
        entry
    }

    // --- Administradores ---

    fn insert_admin(&mut self, email: &str, password_hash: &str) -> Result<AdminUser, DbError> {
        if self.admins.values().any(|a| a.email == email) {
            return Err(unique_violation("admin_users_email_key"));
        }
        let now = Utc::now();
        let admin = AdminUser {
            id: next(&mut self.sequences.admins),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.admins.insert(admin.id, admin.clone());
        Ok(admin)
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn ping(&self) -> Result<(), DbError> {
        self.read(|_| ())
    }

    async fn begin(&self) -> Result<Box<dyn CatalogTx>, DbError> {
        let working = self.read(Tables::clone)?;
        let failing_category_deletes = lock(&self.failing_category_deletes)?.clone();
        Ok(Box::new(MemoryCatalogTx {
            shared: Arc::clone(&self.tables),
            working,
            failing_category_deletes,
        }))
    }

    async fn create_brand(&self, input: &BrandPayload) -> Result<Brand, DbError> {
        self.autocommit(|t| t.insert_brand(input))
    }

    async fn list_brands(&self) -> Result<Vec<Brand>, DbError> {
        self.read(|t| t.brands.values().cloned().collect())
    }

    async fn get_brand(&self, id: i64) -> Result<Option<Brand>, DbError> {
        self.read(|t| t.brands.get(&id).cloned())
    }

    async fn update_brand(&self, id: i64, input: &BrandPayload) -> Result<Option<Brand>, DbError> {
        self.autocommit(|t| t.update_brand(id, input))
    }

    async fn delete_brand(&self, id: i64) -> Result<u64, DbError> {
        self.autocommit(|t| Ok(t.brands.remove(&id).map_or(0, |_| 1)))
    }

    async fn create_category(&self, input: &CategoryPayload) -> Result<Category, DbError> {
        self.autocommit(|t| t.insert_category(input))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DbError> {
        self.read(|t| t.categories.values().cloned().collect())
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, DbError> {
        self.read(|t| t.categories.get(&id).cloned())
    }

    async fn update_category(
        &self,
        id: i64,
        input: &CategoryPayload,
    ) -> Result<Option<Category>, DbError> {
        self.autocommit(|t| t.update_category(id, input))
    }

    async fn list_products(&self, active_only: bool) -> Result<Vec<Product>, DbError> {
        self.read(|t| {
            t.products
                .values()
                .filter(|p| !active_only || p.is_active)
                .cloned()
                .collect()
        })
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>, DbError> {
        self.read(|t| t.products.get(&id).cloned())
    }

    async fn delete_product(&self, id: i64) -> Result<u64, DbError> {
        self.autocommit(|t| Ok(t.delete_product(id)))
    }

    async fn list_price_history(
        &self,
        product_id: i64,
    ) -> Result<Vec<ProductPriceHistory>, DbError> {
        self.read(|t| {
            t.price_history
                .iter()
                .filter(|entry| entry.product_id == product_id)
                .cloned()
                .collect()
        })
    }

    async fn create_admin_user(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<AdminUser, DbError> {
        self.autocommit(|t| t.insert_admin(email, password_hash))
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>, DbError> {
        self.read(|t| t.admins.values().find(|a| a.email == email).cloned())
    }
}

pub struct MemoryCatalogTx {
    shared: Arc<Mutex<Tables>>,
    working: Tables,
    failing_category_deletes: HashSet<i64>,
}

#[async_trait]
impl CatalogTx for MemoryCatalogTx {
    async fn delete_category(&mut self, id: i64) -> Result<u64, DbError> {
        if self.failing_category_deletes.contains(&id) {
            return Err(DbError::Store(format!("injected failure deleting category {id}")));
        }
        Ok(self.working.categories.remove(&id).map_or(0, |_| 1))
    }

    async fn child_category_ids(&mut self, parent_id: i64) -> Result<Vec<i64>, DbError> {
        Ok(self
            .working
            .categories
            .values()
            .filter(|c| c.parent_id == Some(parent_id))
            .map(|c| c.id)
            .collect())
    }

    async fn delete_products_by_category(&mut self, category_id: i64) -> Result<u64, DbError> {
        Ok(self.working.delete_products_by_category(category_id))
    }

    async fn create_product(&mut self, input: &ProductDraft) -> Result<Product, DbError> {
        self.working.insert_product(input)
    }

    async fn get_product_for_update(&mut self, id: i64) -> Result<Option<Product>, DbError> {
        Ok(self.working.products.get(&id).cloned())
    }

    async fn update_product(
        &mut self,
        id: i64,
        input: &ProductDraft,
    ) -> Result<Option<Product>, DbError> {
        self.working.update_product(id, input)
    }

    async fn insert_price_history(
        &mut self,
        change: &PriceChange,
    ) -> Result<ProductPriceHistory, DbError> {
        Ok(self.working.insert_price_history(change))
    }

    async fn commit(self: Box<Self>) -> Result<(), DbError> {
        let MemoryCatalogTx { shared, mut working, .. } = *self;
        working.check_references()?;

        let mut shared = lock(&shared)?;
        if shared.version != working.version {
            return Err(DbError::Store(
                "could not serialize access: tables changed since the transaction began".into(),
            ));
        }
        working.version += 1;
        *shared = working;
        Ok(())
    }
}
