//! Data models for the cart quoting service
//!
//! This module contains the domain models used throughout the application:
//! the inbound cart request, catalog products, processed lines, and the
//! validation machinery that checks them.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod validation;

pub use cart::{CartRequest, CustomerData, LineItem};
pub use catalog::{stock_real, CatalogProduct, ProcessedLine};
pub use error::{ValidationError, ValidationErrorKind, ValidationErrors};
