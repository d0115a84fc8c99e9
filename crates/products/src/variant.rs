use serde::{Deserialize, Serialize};

use storefront_core::{AggregateId, Entity};

use crate::product::ProductId;

/// Variant identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(pub AggregateId);

impl VariantId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for VariantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Optional pricing metadata (no pricing engine).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PricingMetadata {
    pub base_price: Option<u64>, // smallest currency unit (e.g. cents)
    pub currency: Option<String>, // ISO code (e.g. "USD")
}

/// Stock-keeping entry owned by a product.
///
/// The master variant is the canonical one: it holds the authoritative SKU,
/// price and on-sale flag for its product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    id: VariantId,
    product_id: ProductId,
    sku: String,
    is_master: bool,
    on_sale: bool,
    pricing: PricingMetadata,
}

impl Variant {
    /// Build the master variant of `product_id`. Not on sale.
    pub fn master(
        id: VariantId,
        product_id: ProductId,
        sku: impl Into<String>,
        pricing: PricingMetadata,
    ) -> Self {
        Self {
            id,
            product_id,
            sku: sku.into(),
            is_master: true,
            on_sale: false,
            pricing,
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn is_master(&self) -> bool {
        self.is_master
    }

    pub fn pricing(&self) -> &PricingMetadata {
        &self.pricing
    }

    pub fn is_on_sale(&self) -> bool {
        self.on_sale
    }

    pub fn set_on_sale(&mut self, on_sale: bool) {
        self.on_sale = on_sale;
    }
}

impl Entity for Variant {
    type Id = VariantId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
