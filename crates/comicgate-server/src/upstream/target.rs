//! Upstream URL construction per resource kind

use comicgate_core::{AuthParams, ProxyRequest, ResourceKind};
use url::Url;

use crate::error::{ServerError, ServerResult};

/// Build the signed upstream URL for a request.
///
/// `character` resolves to `/characters/{id}` and carries only the
/// credentials; every other kind appends the caller's filters after them.
/// Caller-supplied `ts`, `apikey` and `hash` never override the signature.
pub fn target_url(base_url: &str, request: &ProxyRequest, auth: &AuthParams) -> ServerResult<Url> {
    let mut url = Url::parse(base_url).map_err(|e| {
        ServerError::Internal(format!("Invalid upstream base URL '{}': {}", base_url, e))
    })?;

    {
        let mut segments = url.path_segments_mut().map_err(|_| {
            ServerError::Internal(format!("Upstream base URL '{}' cannot carry a path", base_url))
        })?;
        segments.pop_if_empty();
        match request.kind() {
            ResourceKind::Characters => {
                segments.push("characters");
            }
            ResourceKind::Character => {
                let id = request.subject_id().ok_or_else(|| {
                    ServerError::BadRequest("Character id is required".into())
                })?;
                segments.push("characters").push(id);
            }
            ResourceKind::Comics => {
                segments.push("comics");
            }
            ResourceKind::Series => {
                segments.push("series");
            }
        }
    }

    {
        let mut query = url.query_pairs_mut();
        query.clear();
        for (name, value) in auth.query_pairs() {
            query.append_pair(name, &value);
        }
        if request.kind() != ResourceKind::Character {
            for (name, value) in request.params() {
                if !AuthParams::RESERVED.contains(&name.as_str()) {
                    query.append_pair(name, value);
                }
            }
        }
    }

    Ok(url)
}
