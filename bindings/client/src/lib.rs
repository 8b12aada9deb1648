mod auth;
mod client;
mod diagnostics;
mod filter;

pub mod prelude {
    pub use crate::auth::{Credentials, Session, DEFAULT_LOGIN_ENDPOINT};
    pub use crate::client::{ClientOptions, InsightsClient};
    pub use crate::diagnostics::{crash_query_url, QueryResponse};
    pub use crate::filter::{build_crash_filter, EncodedFilter};
}
