pub mod geocode;
pub mod razorpay;
