//! Row identifier newtypes.
//!
//! Every spine table has an `INTEGER PRIMARY KEY` row id. Wrapping each one
//! in a distinct type stops a `SessionRowId` from being passed where an
//! `ArtifactId` is expected, the same motivation behind the teacher's
//! `IssueId` newtype.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! row_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub i64);

        impl $name {
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

row_id!(ProjectId);
row_id!(SessionRowId);
row_id!(ArtifactId);
row_id!(ComponentId);
row_id!(ClaimId);
row_id!(PromotionRecordId);
row_id!(EventId);
