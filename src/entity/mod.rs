pub mod companies;
pub mod customer_specific_prices;
pub mod customer_tiers;
pub mod customers;
pub mod order_items;
pub mod orders;
pub mod products;

pub use companies::Entity as Companies;
pub use customer_specific_prices::Entity as CustomerSpecificPrices;
pub use customer_tiers::Entity as CustomerTiers;
pub use customers::Entity as Customers;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use products::Entity as Products;
