pub mod browse;
pub mod checkout;
pub mod geocode;
pub mod reviews;
