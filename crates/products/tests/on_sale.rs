use chrono::Utc;
use storefront_core::{Aggregate, AggregateRoot, Entity};
use storefront_products::{Product, ProductCommand, ProductEvent, ProductFactory, SetProductOnSale};

fn product() -> Product {
    storefront_observability::init();
    ProductFactory::new().build().expect("factory product should be valid")
}

#[test]
fn on_sale_is_true_when_master_is_on_sale() {
    let mut product = product();
    product.master_mut().set_on_sale(true);

    assert!(product.is_on_sale());
}

#[test]
fn on_sale_is_false_when_master_is_not_on_sale() {
    let mut product = product();
    product.master_mut().set_on_sale(false);

    assert!(!product.is_on_sale());
}

#[test]
fn set_on_sale_writes_master() {
    let mut product = product();
    let master_id = *product.master().id();

    product.set_on_sale(true);
    assert!(product.master().is_on_sale());

    product.set_on_sale(false);
    assert!(!product.master().is_on_sale());

    // Still the same master record.
    assert_eq!(*product.master().id(), master_id);
}

#[test]
fn repeated_writes_keep_the_last_value() {
    let mut product = product();

    product.set_on_sale(true);
    product.set_on_sale(true);
    assert!(product.is_on_sale());

    product.set_on_sale(false);
    product.set_on_sale(false);
    assert!(!product.is_on_sale());
}

#[test]
fn factory_can_start_products_on_sale() {
    storefront_observability::init();
    let product = ProductFactory::new().with_on_sale(true).build().unwrap();

    assert!(product.is_on_sale());
    assert!(product.master().is_on_sale());
}

#[test]
fn recorded_on_sale_change_matches_direct_write() {
    let mut recorded = product();
    let mut direct = recorded.clone();

    let cmd = ProductCommand::SetProductOnSale(SetProductOnSale {
        tenant_id: recorded.tenant_id().unwrap(),
        product_id: recorded.id_typed(),
        on_sale: true,
        occurred_at: Utc::now(),
    });
    let events = recorded.handle(&cmd).unwrap();
    assert!(matches!(events.as_slice(), [ProductEvent::ProductOnSaleChanged(_)]));
    for event in &events {
        recorded.apply(event);
    }

    direct.set_on_sale(true);

    assert_eq!(recorded.is_on_sale(), direct.is_on_sale());
    assert_eq!(recorded.master(), direct.master());
    assert_eq!(recorded.version(), direct.version() + 1);
}
