//! Anonymous identifier resolution — a stable pseudo-identifier persisted
//! in the host cookie store, read once per tracker and written at most
//! once.

use tracing::debug;
use uuid::Uuid;

use beacon_core::context::ClientContext;

/// Cookie holding the persisted identifier.
pub const IDENTIFIER_COOKIE: &str = "user_id";

/// Placeholder identifier reported from detached contexts, where no
/// generation or persistence is attempted.
pub const DETACHED_USER_ID: &str = "server-generated-id";

const IDENTIFIER_TTL_DAYS: u32 = 365;

/// Resolve the identifier for this context: reuse the persisted cookie
/// value, or generate a UUID v4 and persist it with a one-year expiry.
pub fn resolve_user_id(context: &dyn ClientContext) -> String {
    if !context.is_attached() {
        return DETACHED_USER_ID.to_string();
    }

    if let Some(existing) = context.cookie(IDENTIFIER_COOKIE) {
        return existing;
    }

    let generated = Uuid::new_v4().to_string();
    context.set_cookie(IDENTIFIER_COOKIE, &generated, IDENTIFIER_TTL_DAYS);
    debug!(user_id = %generated, "generated anonymous identifier");
    generated
}
