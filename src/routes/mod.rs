pub mod customer;
pub mod health_check;
pub mod menu;
pub mod order;
