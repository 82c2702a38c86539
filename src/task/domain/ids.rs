//! Identifier types for tasks and the tenancy keys that own them.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! surrogate_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw surrogate key.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw surrogate key.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

surrogate_id!(
    /// Store-assigned identifier of a task row.
    TaskId
);

surrogate_id!(
    /// Tenant identifier. All task data is partitioned by account.
    AccountId
);

surrogate_id!(
    /// Identifier of a user within an account.
    UserId
);

/// The `(account, user)` pair that gates every task operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskOwner {
    account: AccountId,
    user: UserId,
}

impl TaskOwner {
    /// Creates an ownership key.
    #[must_use]
    pub const fn new(account: AccountId, user: UserId) -> Self {
        Self { account, user }
    }

    /// Returns the owning account.
    #[must_use]
    pub const fn account(self) -> AccountId {
        self.account
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user(self) -> UserId {
        self.user
    }
}

impl fmt::Display for TaskOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "account {} / user {}", self.account, self.user)
    }
}
