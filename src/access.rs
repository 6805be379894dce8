//! Who may talk to the session actor.

use crate::model::UserId;
use std::collections::HashSet;

/// Opaque `is_allowed(user)` predicate consulted before any session input.
pub trait AccessPolicy: Send + Sync {
    fn is_allowed(&self, user: &UserId) -> bool;
}

/// Lets everyone in.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn is_allowed(&self, _user: &UserId) -> bool {
        true
    }
}

/// Only the listed users.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    users: HashSet<UserId>,
}

impl AllowList {
    pub fn new<I, U>(users: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<UserId>,
    {
        Self {
            users: users.into_iter().map(Into::into).collect(),
        }
    }
}

impl AccessPolicy for AllowList {
    fn is_allowed(&self, user: &UserId) -> bool {
        self.users.contains(user)
    }
}

impl<F> AccessPolicy for F
where
    F: Fn(&UserId) -> bool + Send + Sync,
{
    fn is_allowed(&self, user: &UserId) -> bool {
        self(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_matches_exact_ids() {
        let policy = AllowList::new(["100", "200"]);
        assert!(policy.is_allowed(&UserId::from("100")));
        assert!(!policy.is_allowed(&UserId::from("300")));
        assert!(AllowAll.is_allowed(&UserId::from("300")));
    }

    #[test]
    fn closures_are_policies() {
        let even = |user: &UserId| user.0.parse::<i64>().is_ok_and(|n| n % 2 == 0);
        assert!(even.is_allowed(&UserId::from(42)));
        assert!(!even.is_allowed(&UserId::from("chef")));
    }
}
