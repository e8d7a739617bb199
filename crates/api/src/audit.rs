//! Best-effort audit sink.
//!
//! Entries are written on a detached task: the request path never awaits the
//! insert, and a failed write is logged at debug level and dropped. The
//! audit trail must never fail -- or slow down -- the operation it records.

use tandem_core::types::UserId;
use tandem_db::models::audit::CreateAuditEntry;
use tandem_db::repositories::AuditRepo;
use tandem_db::DbPool;

use crate::extract::RequestMeta;

pub const ACTION_REGISTER: &str = "register";
pub const ACTION_REGISTER_ADMIN: &str = "register_admin";
pub const ACTION_LOGIN: &str = "login";
pub const ACTION_UPDATE_PROFILE: &str = "update_profile";
pub const ACTION_DELETE_ACCOUNT: &str = "delete_account";
pub const ACTION_ROLLBACK_PROFILE_FAIL: &str = "rollback_profile_fail";

/// Build an audit entry for the given account and request metadata.
pub fn entry(user_id: Option<UserId>, action: &str, meta: &RequestMeta) -> CreateAuditEntry {
    CreateAuditEntry {
        user_id,
        action: action.to_string(),
        ip: meta.ip.clone(),
        user_agent: meta.user_agent.clone(),
    }
}

/// Fire-and-forget write of an audit entry to the credential store.
pub fn record(pool: &DbPool, entry: CreateAuditEntry) {
    let pool = pool.clone();
    tokio::spawn(async move {
        if let Err(err) = AuditRepo::insert(&pool, &entry).await {
            tracing::debug!(error = %err, action = %entry.action, "dropping failed audit write");
        }
    });
}
