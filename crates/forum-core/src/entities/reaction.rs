//! Reaction entity - a user's like or dislike on a post or comment

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::UserId;

/// Kind of subject a reaction is attached to
///
/// Each kind owns its own storage partition; a post and a comment sharing a
/// numeric id never share reaction rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    Post,
    Comment,
}

impl SubjectKind {
    pub const ALL: [SubjectKind; 2] = [SubjectKind::Post, SubjectKind::Comment];

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a stored reaction
///
/// "No reaction" is not a sign; it is the absence of a row (`Option<Sign>::None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Like,
    Dislike,
}

impl Sign {
    /// Stored integer value (+1 / -1)
    #[inline]
    pub const fn value(self) -> i16 {
        match self {
            Self::Like => 1,
            Self::Dislike => -1,
        }
    }

    /// Decode a stored value. Anything other than +1 / -1 yields `None`.
    pub const fn from_value(value: i16) -> Option<Self> {
        match value {
            1 => Some(Self::Like),
            -1 => Some(Self::Dislike),
            _ => None,
        }
    }
}

impl TryFrom<i64> for Sign {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Like),
            -1 => Ok(Self::Dislike),
            other => Err(DomainError::InvalidSign(other)),
        }
    }
}

impl Serialize for Sign {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i16(self.value())
    }
}

impl<'de> Deserialize<'de> for Sign {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Sign::try_from(value).map_err(serde::de::Error::custom)
    }
}

/// Presentation value of an optional sign: 0 when the user has not reacted
#[inline]
pub fn sign_value(sign: Option<Sign>) -> i16 {
    sign.map_or(0, Sign::value)
}

/// Identity of a single reaction slot: (kind, subject, user)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReactionKey {
    pub kind: SubjectKind,
    pub subject_id: i64,
    pub user_id: UserId,
}

impl ReactionKey {
    pub fn new(kind: SubjectKind, subject_id: i64, user_id: UserId) -> Self {
        Self {
            kind,
            subject_id,
            user_id,
        }
    }

    pub fn post(post_id: i64, user_id: UserId) -> Self {
        Self::new(SubjectKind::Post, post_id, user_id)
    }

    pub fn comment(comment_id: i64, user_id: UserId) -> Self {
        Self::new(SubjectKind::Comment, comment_id, user_id)
    }
}

impl fmt::Display for ReactionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.kind, self.subject_id, self.user_id)
    }
}

/// Reaction entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub kind: SubjectKind,
    pub subject_id: i64,
    pub user_id: UserId,
    pub sign: Sign,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(key: ReactionKey, sign: Sign) -> Self {
        Self {
            kind: key.kind,
            subject_id: key.subject_id,
            user_id: key.user_id,
            sign,
        }
    }

    /// Key identifying this reaction's slot
    pub fn key(&self) -> ReactionKey {
        ReactionKey::new(self.kind, self.subject_id, self.user_id.clone())
    }
}

/// Aggregated like/dislike counts for one subject
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCounts {
    pub likes: i64,
    pub dislikes: i64,
}

impl ReactionCounts {
    pub fn new(likes: i64, dislikes: i64) -> Self {
        Self { likes, dislikes }
    }

    /// Count a single stored sign
    pub fn record(&mut self, sign: Sign) {
        match sign {
            Sign::Like => self.likes += 1,
            Sign::Dislike => self.dislikes += 1,
        }
    }
}

/// The single store mutation a vote resolves to
///
/// Per (user, subject) pair the state machine is None -> Liked/Disliked on a
/// first vote, Liked <-> Disliked on an opposite vote, and back to None when
/// the same vote is repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "sign", rename_all = "lowercase")]
pub enum ReactionTransition {
    /// No reaction yet: create one
    Insert(Sign),
    /// Opposite reaction stored: flip it
    Swap(Sign),
    /// Same reaction stored: cancel it
    Remove,
}

impl ReactionTransition {
    /// Decide the transition for a requested vote given the stored sign
    pub fn plan(existing: Option<Sign>, requested: Sign) -> Self {
        match existing {
            None => Self::Insert(requested),
            Some(current) if current == requested => Self::Remove,
            Some(_) => Self::Swap(requested),
        }
    }

    /// Sign stored after the transition is applied
    pub fn resulting_sign(self) -> Option<Sign> {
        match self {
            Self::Insert(sign) | Self::Swap(sign) => Some(sign),
            Self::Remove => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::Swap(_) => "swap",
            Self::Remove => "remove",
        }
    }
}
