/// Order placement and management models
pub mod order;
