use crate::access::AccessPolicy;
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Draft, Intent, Reply, UserId};
use crate::session_actor::SessionError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Client for interacting with the Session actor.
///
/// The access predicate is evaluated here, before anything reaches the
/// registry, so a denied user never gets a draft.
#[derive(Clone)]
pub struct SessionClient {
    inner: ResourceClient<Draft>,
    access: Arc<dyn AccessPolicy>,
}

impl SessionClient {
    pub fn new(inner: ResourceClient<Draft>, access: Arc<dyn AccessPolicy>) -> Self {
        Self { inner, access }
    }

    /// Delivers one intent from `user` and returns what to show them.
    #[instrument(skip(self, intent), fields(user = %user))]
    pub async fn dispatch(&self, user: UserId, intent: Intent) -> Result<Reply, SessionError> {
        if !self.access.is_allowed(&user) {
            warn!("Access denied");
            return Ok(Reply::AccessDenied);
        }
        debug!(?intent, "dispatch called");
        self.inner
            .perform_action(user, intent)
            .await
            .map_err(Self::map_error)
    }

    /// Number of drafts currently held, idle ones excluded.
    #[instrument(skip(self))]
    pub async fn active_sessions(&self) -> Result<usize, SessionError> {
        self.inner.count().await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Draft> for SessionClient {
    type Error = SessionError;

    fn inner(&self) -> &ResourceClient<Draft> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        SessionError::ActorCommunicationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{AllowAll, AllowList};
    use crate::framework::mock::{create_mock_client, expect_action, MockClient};
    use crate::model::Step;

    #[tokio::test]
    async fn forwards_intents_for_allowed_users() {
        let (inner, mut receiver) = create_mock_client::<Draft>(10);
        let client = SessionClient::new(inner, Arc::new(AllowAll));

        let task = tokio::spawn(async move { client.dispatch(UserId::from("chef"), Intent::Start).await });

        let (id, intent, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, UserId::from("chef"));
        assert_eq!(intent, Intent::Start);
        responder.send(Ok(Reply::AskLabel)).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), Reply::AskLabel);
    }

    #[tokio::test]
    async fn denied_users_never_reach_the_registry() {
        // No expectations: any request would panic the mock.
        let mock = MockClient::<Draft>::new();
        let client = SessionClient::new(mock.client(), Arc::new(AllowList::new(["chef"])));

        let reply = client.dispatch(UserId::from("stranger"), Intent::Start).await.unwrap();
        assert_eq!(reply, Reply::AccessDenied);
        mock.verify();
    }

    #[tokio::test]
    async fn inherited_get_and_delete() {
        let mut mock = MockClient::<Draft>::new();
        let mut draft = Draft::new(UserId::from("chef"));
        draft.step = Step::AwaitingDuration;
        mock.expect_get(UserId::from("chef")).return_ok(Some(draft));
        mock.expect_delete(UserId::from("chef")).return_ok(true);

        let client = SessionClient::new(mock.client(), Arc::new(AllowAll));
        let fetched = client.get(UserId::from("chef")).await.unwrap().unwrap();
        assert_eq!(fetched.step, Step::AwaitingDuration);
        assert!(client.delete(UserId::from("chef")).await.unwrap());
        mock.verify();
    }

    #[tokio::test]
    async fn channel_failures_map_to_session_error() {
        let mut mock = MockClient::<Draft>::new();
        mock.expect_action(UserId::from("chef"))
            .return_err(FrameworkError::ActorDropped);

        let client = SessionClient::new(mock.client(), Arc::new(AllowAll));
        let err = client.dispatch(UserId::from("chef"), Intent::Submit).await.unwrap_err();
        assert!(matches!(err, SessionError::ActorCommunicationError(_)));
    }
}
