mod add_domain;
mod add_query;

pub use add_domain::AddDomainUseCase;
pub use add_query::{normalize_query, AddQueryUseCase};
