pub mod input_validator;
pub mod page;
pub mod rewrite_controller;
pub mod rewrite_service;
pub mod types;
