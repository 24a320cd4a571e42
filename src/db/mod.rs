pub mod postgres_service;
pub mod user;
pub mod verification_code;
