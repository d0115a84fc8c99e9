//! Products domain module (event-sourced).
//!
//! A product owns exactly one master variant. Catalog attributes that the
//! storefront reads off a product (SKU, pricing, the on-sale flag) are
//! delegated to that master; the product keeps no copy of its own.

pub mod factory;
pub mod product;
pub mod variant;

pub use factory::ProductFactory;
pub use product::{
    CreateProduct, Product, ProductCommand, ProductCreated, ProductEvent, ProductId,
    ProductOnSaleChanged, SetProductOnSale,
};
pub use variant::{PricingMetadata, Variant, VariantId};
