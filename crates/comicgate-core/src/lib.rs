//! Comicgate core
//!
//! Domain types shared by the gateway and the client: resource kinds, proxy
//! requests, signed credentials and the upstream response shape.

pub mod clock;
pub mod config;
pub mod error;
pub mod sanitization;
pub mod shaper;
pub mod signer;
pub mod types;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::GatewayConfig;
pub use error::{CoreError, CoreResult};
pub use sanitization::{is_sensitive_param, redact_url};
pub use shaper::shape;
pub use signer::CredentialSigner;
pub use types::{AuthParams, ProxyRequest, QueryParams, ResourceKind, UpstreamResponse};
