pub mod baskets;
pub mod capital;
pub mod customers;
pub mod employees;
pub mod expenses;
pub mod health;
pub mod orders;
pub mod providers;
