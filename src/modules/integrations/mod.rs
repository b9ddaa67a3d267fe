pub mod backend;
pub mod identity;

pub use backend::BackendClient;
pub use identity::IdentityClient;
