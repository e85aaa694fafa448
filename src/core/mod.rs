//! Transport, session and logging infrastructure.

pub mod endpoint;
pub mod http;
pub mod logging;
pub mod session;

pub use endpoint::Endpoint;
pub use http::{HttpResponse, HttpTransport, build_client};
pub use logging::{LogFormat, LogLevel};
pub use session::{Cookie, InsightsSession, PrimarySession, Session, SessionState};
