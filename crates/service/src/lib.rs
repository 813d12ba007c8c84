//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Owns ship validation, rating and list/count querying.

pub mod errors;
pub mod pagination;
pub mod ship;
#[cfg(test)]
pub mod test_support;
