mod list;

pub use list::ListDomainsUseCase;
