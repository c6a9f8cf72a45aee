pub mod companies;
pub mod customer_pricing;
pub mod customers;
pub mod orders;
pub mod products;
