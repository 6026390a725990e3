pub mod customer;
pub mod name_email;
