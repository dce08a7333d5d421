pub mod dig;
pub mod domains;

pub use dig::{AddDomainUseCase, AddQueryUseCase};
pub use domains::ListDomainsUseCase;
