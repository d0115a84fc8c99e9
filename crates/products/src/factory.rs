//! Fixture builder for fully formed products.
//!
//! `ProductFactory` goes through the same `handle`/`apply` path as production
//! code, so every product it returns already owns its master variant.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use storefront_core::{Aggregate, AggregateId, DomainResult, TenantId};

use crate::product::{CreateProduct, Product, ProductCommand, ProductId};
use crate::variant::{PricingMetadata, VariantId};

static SKU_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_sku() -> String {
    format!("SKU-{}", SKU_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

/// Builder producing a created `Product` with its master variant.
///
/// ```ignore
/// let product = ProductFactory::new().with_on_sale(true).build()?;
/// assert!(product.is_on_sale());
/// ```
#[derive(Debug, Clone)]
pub struct ProductFactory {
    tenant_id: TenantId,
    product_id: ProductId,
    master_variant_id: VariantId,
    sku: String,
    name: String,
    pricing: PricingMetadata,
    on_sale: bool,
    occurred_at: DateTime<Utc>,
}

impl Default for ProductFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductFactory {
    /// Fresh ids, a sequenced `SKU-<n>` and an off-sale master.
    pub fn new() -> Self {
        Self {
            tenant_id: TenantId::new(),
            product_id: ProductId::new(AggregateId::new()),
            master_variant_id: VariantId::new(AggregateId::new()),
            sku: next_sku(),
            name: "Product".to_string(),
            pricing: PricingMetadata::default(),
            on_sale: false,
            occurred_at: Utc::now(),
        }
    }

    pub fn with_tenant_id(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = tenant_id;
        self
    }

    pub fn with_product_id(mut self, product_id: ProductId) -> Self {
        self.product_id = product_id;
        self
    }

    pub fn with_master_variant_id(mut self, variant_id: VariantId) -> Self {
        self.master_variant_id = variant_id;
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_pricing(mut self, pricing: PricingMetadata) -> Self {
        self.pricing = pricing;
        self
    }

    /// Initial on-sale flag of the master variant (defaults to `false`).
    pub fn with_on_sale(mut self, on_sale: bool) -> Self {
        self.on_sale = on_sale;
        self
    }

    pub fn with_occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }

    /// Handle + apply `CreateProduct`, returning the created product.
    pub fn build(self) -> DomainResult<Product> {
        let mut product = Product::empty(self.product_id);
        let cmd = ProductCommand::CreateProduct(CreateProduct {
            tenant_id: self.tenant_id,
            product_id: self.product_id,
            master_variant_id: self.master_variant_id,
            sku: self.sku,
            name: self.name,
            pricing: Some(self.pricing),
            on_sale: self.on_sale,
            occurred_at: self.occurred_at,
        });
        for event in product.handle(&cmd)? {
            product.apply(&event);
        }

        tracing::debug!(
            product_id = %product.id_typed(),
            sku = product.sku(),
            on_sale = product.is_on_sale(),
            "built product fixture"
        );
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{AggregateRoot, DomainError, Entity};

    #[test]
    fn builds_created_product_with_master() {
        let product = ProductFactory::new().build().unwrap();

        assert_eq!(product.version(), 1);
        assert!(product.tenant_id().is_some());
        assert!(product.master().is_master());
        assert_eq!(product.master().product_id(), product.id_typed());
        assert!(product.sku().starts_with("SKU-"));
        assert!(!product.is_on_sale());
    }

    #[test]
    fn overrides_are_applied() {
        let tenant_id = TenantId::new();
        let product_id = ProductId::new(AggregateId::new());
        let variant_id = VariantId::new(AggregateId::new());

        let product = ProductFactory::new()
            .with_tenant_id(tenant_id)
            .with_product_id(product_id)
            .with_master_variant_id(variant_id)
            .with_sku("TSHIRT-RED")
            .with_name("Red T-Shirt")
            .with_on_sale(true)
            .build()
            .unwrap();

        assert_eq!(product.tenant_id(), Some(tenant_id));
        assert_eq!(product.id_typed(), product_id);
        assert_eq!(*product.master().id(), variant_id);
        assert_eq!(product.sku(), "TSHIRT-RED");
        assert_eq!(product.name(), "Red T-Shirt");
        assert!(product.is_on_sale());
    }

    #[test]
    fn sequenced_skus_are_unique_per_factory() {
        let a = ProductFactory::new().build().unwrap();
        let b = ProductFactory::new().build().unwrap();
        assert_ne!(a.sku(), b.sku());
    }

    #[test]
    fn sku_is_fixed_when_factory_is_created() {
        let factory = ProductFactory::new();
        let a = factory.clone().build().unwrap();
        let b = factory.build().unwrap();
        assert_eq!(a.sku(), b.sku());
    }

    #[test]
    fn propagates_validation_errors() {
        let err = ProductFactory::new().with_name(" ").build().unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }
}
