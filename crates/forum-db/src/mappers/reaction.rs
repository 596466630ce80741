//! Reaction entity <-> model mapper

use forum_core::entities::{Reaction, ReactionCounts, Sign, SubjectKind};
use forum_core::error::DomainError;
use forum_core::value_objects::UserId;

use crate::models::{ReactionCountModel, ReactionModel};

/// Decode a stored sign column
pub(crate) fn decode_sign(value: i16) -> Result<Sign, DomainError> {
    Sign::from_value(value)
        .ok_or_else(|| DomainError::DatabaseError(format!("invalid stored reaction sign: {value}")))
}

impl ReactionModel {
    /// Convert a row of the `kind` partition to a Reaction entity
    pub fn into_entity(self, kind: SubjectKind) -> Result<Reaction, DomainError> {
        let user_id = UserId::new(self.user_id)
            .map_err(|_| DomainError::DatabaseError("empty user_id in reaction row".to_string()))?;

        Ok(Reaction {
            kind,
            subject_id: self.subject_id,
            user_id,
            sign: decode_sign(self.sign)?,
        })
    }
}

impl From<ReactionCountModel> for ReactionCounts {
    fn from(model: ReactionCountModel) -> Self {
        ReactionCounts::new(model.likes, model.dislikes)
    }
}

/// Values bound for an insert into a reaction partition
pub struct ReactionInsert<'a> {
    pub user_id: &'a str,
    pub subject_id: i64,
    pub sign: i16,
}

impl<'a> ReactionInsert<'a> {
    pub fn new(reaction: &'a Reaction) -> Self {
        Self {
            user_id: reaction.user_id.as_str(),
            subject_id: reaction.subject_id,
            sign: reaction.sign.value(),
        }
    }
}
