//! Match status codes and status groups
//!
//! A [`MatchStatus`] is the per-match lifecycle state stored by the primary
//! store as an integer code. A [`MatchStatusGroup`] is the feed tab a caller
//! asks for; each group covers a fixed set of statuses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a single match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Delivered, not yet acted on
    New,
    /// Communication is waiting on the owner
    MyTurn,
    /// Communication is waiting on the matched user
    TheirTurn,
    /// Open communication
    Open,
    /// Closed by either side
    Closed,
    /// Archived by the owner
    Archived,
}

impl MatchStatus {
    /// All statuses in code order
    pub const ALL: [MatchStatus; 6] = [
        MatchStatus::New,
        MatchStatus::MyTurn,
        MatchStatus::TheirTurn,
        MatchStatus::Open,
        MatchStatus::Closed,
        MatchStatus::Archived,
    ];

    /// Integer code understood by the primary store
    #[inline]
    #[must_use]
    pub fn to_int(self) -> i32 {
        match self {
            MatchStatus::New => 0,
            MatchStatus::MyTurn => 1,
            MatchStatus::TheirTurn => 2,
            MatchStatus::Open => 3,
            MatchStatus::Closed => 4,
            MatchStatus::Archived => 5,
        }
    }

    /// Reverse of [`MatchStatus::to_int`]
    #[must_use]
    pub fn from_int(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.to_int() == code)
    }
}

/// Feed section a request is answering for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatusGroup {
    /// Newly delivered matches
    New,
    /// Matches in communication
    Communication,
    /// Archived matches
    Archive,
    /// Closed matches
    Closed,
}

impl MatchStatusGroup {
    /// Stable name used in timer names and log fields
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MatchStatusGroup::New => "new",
            MatchStatusGroup::Communication => "communication",
            MatchStatusGroup::Archive => "archive",
            MatchStatusGroup::Closed => "closed",
        }
    }

    /// Statuses covered by this group
    #[must_use]
    pub fn statuses(self) -> &'static [MatchStatus] {
        match self {
            MatchStatusGroup::New => &[MatchStatus::New],
            MatchStatusGroup::Communication => {
                &[MatchStatus::MyTurn, MatchStatus::TheirTurn, MatchStatus::Open]
            }
            MatchStatusGroup::Archive => &[MatchStatus::Archived],
            MatchStatusGroup::Closed => &[MatchStatus::Closed],
        }
    }
}

impl fmt::Display for MatchStatusGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
