pub mod endpoint;

pub use endpoint::{DEFAULT_EXPECTED_STATUS, Endpoint, NewEndpoint};
