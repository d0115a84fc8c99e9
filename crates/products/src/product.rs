use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{Aggregate, AggregateId, AggregateRoot, DomainError, Entity, TenantId};
use storefront_events::{Command, Event};

use crate::variant::{PricingMetadata, Variant, VariantId};

/// Product identifier (tenant-scoped via `tenant_id` fields in events/commands).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub AggregateId);

impl ProductId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Aggregate root: Product.
///
/// Owns its master variant by value, so a product without a master cannot be
/// constructed. Catalog attributes (SKU, pricing, on-sale flag) are read from
/// and written to that master.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    tenant_id: Option<TenantId>,
    name: String,
    master: Variant,
    version: u64,
    created: bool,
}

impl Product {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    ///
    /// The placeholder master shares the product's id until `ProductCreated`
    /// is applied.
    pub fn empty(id: ProductId) -> Self {
        Self {
            id,
            tenant_id: None,
            name: String::new(),
            master: Variant::master(VariantId::new(id.0), id, "", PricingMetadata::default()),
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn master(&self) -> &Variant {
        &self.master
    }

    pub fn master_mut(&mut self) -> &mut Variant {
        &mut self.master
    }

    pub fn sku(&self) -> &str {
        self.master.sku()
    }

    pub fn pricing(&self) -> &PricingMetadata {
        self.master.pricing()
    }

    /// Whether the master variant is on sale.
    pub fn is_on_sale(&self) -> bool {
        self.master.is_on_sale()
    }

    /// Write the on-sale flag through to the master variant.
    pub fn set_on_sale(&mut self, on_sale: bool) {
        self.master.set_on_sale(on_sale);
        tracing::debug!(product_id = %self.id, variant_id = %self.master.id(), on_sale, "master on_sale updated");
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateProduct (product + its master variant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub tenant_id: TenantId,
    pub product_id: ProductId,
    pub master_variant_id: VariantId,
    pub sku: String,
    pub name: String,
    pub pricing: Option<PricingMetadata>,
    pub on_sale: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetProductOnSale (targets the master variant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetProductOnSale {
    pub tenant_id: TenantId,
    pub product_id: ProductId,
    pub on_sale: bool,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCommand {
    CreateProduct(CreateProduct),
    SetProductOnSale(SetProductOnSale),
}

impl Command for ProductCommand {
    fn target_aggregate_id(&self) -> AggregateId {
        let product_id = match self {
            ProductCommand::CreateProduct(c) => c.product_id,
            ProductCommand::SetProductOnSale(c) => c.product_id,
        };
        product_id.0
    }
}

/// Event: ProductCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCreated {
    pub tenant_id: TenantId,
    pub product_id: ProductId,
    pub master_variant_id: VariantId,
    pub sku: String,
    pub name: String,
    pub pricing: PricingMetadata,
    pub on_sale: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductOnSaleChanged (master variant's flag was written).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOnSaleChanged {
    pub tenant_id: TenantId,
    pub product_id: ProductId,
    pub variant_id: VariantId,
    pub on_sale: bool,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductEvent {
    ProductCreated(ProductCreated),
    ProductOnSaleChanged(ProductOnSaleChanged),
}

impl Event for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::ProductCreated(_) => "products.product.created",
            ProductEvent::ProductOnSaleChanged(_) => "products.product.on_sale_changed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProductEvent::ProductCreated(e) => e.occurred_at,
            ProductEvent::ProductOnSaleChanged(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Product {
    type Command = ProductCommand;
    type Event = ProductEvent;
    type Error = DomainError;

    /// Events for another variant are skipped and do not count toward the
    /// version.
    fn apply(&mut self, event: &Self::Event) {
        match event {
            ProductEvent::ProductCreated(e) => {
                self.id = e.product_id;
                self.tenant_id = Some(e.tenant_id);
                self.name = e.name.clone();
                self.master = Variant::master(
                    e.master_variant_id,
                    e.product_id,
                    e.sku.clone(),
                    e.pricing.clone(),
                );
                self.master.set_on_sale(e.on_sale);
                self.created = true;
            }
            ProductEvent::ProductOnSaleChanged(e) => {
                if e.variant_id != *self.master.id() {
                    tracing::warn!(
                        product_id = %self.id,
                        master_id = %self.master.id(),
                        variant_id = %e.variant_id,
                        "skipping on_sale change for a variant that is not the master"
                    );
                    return;
                }
                self.set_on_sale(e.on_sale);
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ProductCommand::CreateProduct(cmd) => self.handle_create(cmd),
            ProductCommand::SetProductOnSale(cmd) => self.handle_set_on_sale(cmd),
        }
    }
}

impl Product {
    fn ensure_product_id(&self, product_id: ProductId) -> Result<(), DomainError> {
        if self.id != product_id {
            return Err(DomainError::invariant("product_id mismatch"));
        }
        Ok(())
    }

    fn ensure_existing(&self, tenant_id: TenantId, product_id: ProductId) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        if self.tenant_id != Some(tenant_id) {
            return Err(DomainError::invariant("tenant mismatch"));
        }
        self.ensure_product_id(product_id)
    }

    fn handle_create(&self, cmd: &CreateProduct) -> Result<Vec<ProductEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("product already exists"));
        }
        self.ensure_product_id(cmd.product_id)?;

        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if cmd.sku.trim().is_empty() {
            return Err(DomainError::validation("SKU cannot be empty"));
        }

        Ok(vec![ProductEvent::ProductCreated(ProductCreated {
            tenant_id: cmd.tenant_id,
            product_id: cmd.product_id,
            master_variant_id: cmd.master_variant_id,
            sku: cmd.sku.clone(),
            name: cmd.name.clone(),
            pricing: cmd.pricing.clone().unwrap_or_default(),
            on_sale: cmd.on_sale,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_set_on_sale(&self, cmd: &SetProductOnSale) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_existing(cmd.tenant_id, cmd.product_id)?;

        if self.is_on_sale() == cmd.on_sale {
            tracing::debug!(product_id = %self.id, on_sale = cmd.on_sale, "on_sale unchanged, no event");
            return Ok(vec![]);
        }

        Ok(vec![ProductEvent::ProductOnSaleChanged(ProductOnSaleChanged {
            tenant_id: cmd.tenant_id,
            product_id: cmd.product_id,
            variant_id: *self.master.id(),
            on_sale: cmd.on_sale,
            occurred_at: cmd.occurred_at,
        })])
    }
}
