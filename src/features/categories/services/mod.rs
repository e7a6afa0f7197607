pub mod category_domain_service;
pub mod category_service;

pub use category_domain_service::CategoryDomainService;
pub use category_service::CategoryService;
