//! In-memory snapshot of the user's saved gang members

use crate::session::CurrentUser;
use crate::store::{GangMember, StoreClient, StoreError};

/// Holds the last successfully fetched member snapshot.
///
/// The snapshot only changes through [`MemberCache::set_members`] and a
/// completed refresh. When refreshes overlap, whichever completion runs last
/// wins; there is no request generation guard.
#[derive(Debug, Default)]
pub struct MemberCache {
    members: Vec<GangMember>,
}

impl MemberCache {
    /// Current snapshot, in the order the store returned it (name ascending).
    pub fn members(&self) -> &[GangMember] {
        &self.members
    }

    /// Replace the snapshot directly, e.g. to splice in an optimistic update
    /// before the next refresh lands.
    pub fn set_members(&mut self, members: Vec<GangMember>) {
        self.members = members;
    }

    /// Re-fetch the snapshot for the signed-in user.
    ///
    /// Without a user this does nothing: the prior snapshot stays as it was,
    /// it is not cleared. Fetch failures are swallowed the same way, leaving
    /// stale data in place.
    pub async fn refresh(&mut self, user: Option<&CurrentUser>, client: &StoreClient) {
        let Some(user) = user else {
            return;
        };

        let result = client.list_saved_members(&user.id).await;
        self.apply(result);
    }

    /// Fold a fetch completion into the snapshot.
    ///
    /// Success replaces the whole snapshot; any failure leaves it untouched
    /// and is only logged, never surfaced to the caller.
    pub fn apply(&mut self, result: Result<Vec<GangMember>, StoreError>) {
        match result {
            Ok(members) => {
                tracing::debug!("member snapshot refreshed ({} entries)", members.len());
                self.members = members;
            }
            Err(e) => {
                tracing::warn!("member refresh failed, keeping stale snapshot: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, name: &str) -> GangMember {
        GangMember {
            id: id.to_string(),
            name: name.to_string(),
            member_type: "single".to_string(),
            email: None,
        }
    }

    /// A client pointing at a loopback port nothing listens on, so any
    /// request fails fast with a connection error.
    async fn refused_client() -> StoreClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        StoreClient::from_url(&format!("http://{}/", addr), None).unwrap()
    }

    #[tokio::test]
    async fn test_refresh_without_user_is_noop() {
        // Never contacted: the guard returns before any request is built
        let client = StoreClient::from_url("http://store.invalid/", None).unwrap();
        let mut cache = MemberCache::default();
        cache.set_members(vec![member("m1", "Alice")]);

        cache.refresh(None, &client).await;

        assert_eq!(cache.members(), &[member("m1", "Alice")]);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_prior_snapshot() {
        let client = refused_client().await;
        let user = CurrentUser {
            id: "u1".to_string(),
            name: None,
        };
        let mut cache = MemberCache::default();
        cache.set_members(vec![member("m1", "Alice"), member("m2", "Bob")]);

        cache.refresh(Some(&user), &client).await;

        assert_eq!(cache.members().len(), 2);
        assert_eq!(cache.members()[0].name, "Alice");
    }

    #[test]
    fn test_apply_success_replaces_whole_snapshot() {
        let mut cache = MemberCache::default();
        cache.set_members(vec![member("m1", "Alice")]);

        cache.apply(Ok(vec![member("m2", "Bob"), member("m3", "Carol")]));

        assert_eq!(cache.members().len(), 2);
        assert_eq!(cache.members()[0].id, "m2");
    }

    #[test]
    fn test_overlapping_completions_last_write_wins() {
        // Two in-flight refreshes resolve in arrival order; the snapshot ends
        // up reflecting whichever completion applied last.
        let mut cache = MemberCache::default();

        cache.apply(Ok(vec![member("m1", "Alice")]));
        cache.apply(Ok(vec![member("m2", "Bob")]));

        assert_eq!(cache.members().len(), 1);
        assert_eq!(cache.members()[0].id, "m2");
    }

    #[test]
    fn test_apply_error_after_success_keeps_data() {
        let mut cache = MemberCache::default();
        cache.apply(Ok(vec![member("m1", "Alice")]));
        cache.apply(Err(StoreError::Status(reqwest::StatusCode::FORBIDDEN)));

        assert_eq!(cache.members().len(), 1);
    }
}
