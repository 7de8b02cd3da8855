pub mod bindings;
pub mod cache;
pub mod key;

pub use bindings::TravelQueries;
pub use cache::{QueryClient, QueryClientConfig, QueryError, QueryOptions, QueryResult};
pub use key::{KeyPart, QueryKey};
