use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

use crate::{
    common::{is_blank, random_id},
    error::{Result, ValidationError},
    models::session::Session,
};

/// A star score, 1 to 5 inclusive.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Score {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::ScoreOutOfRange(value))
        }
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

/// One user's review of a listing. Never edited after it is written.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    #[serde(default)]
    pub id: String,
    /// The listing this review belongs to.
    #[serde(default, alias = "foodId")]
    pub listing_id: String,
    pub rating: Score,
    #[serde(default)]
    pub text: String,
    /// `None` while the backend has not stamped the record yet.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_photo: Option<String>,
}

/// The "add your review" form.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct RatingDraft {
    pub text: String,
    /// 0 until the user picks a star.
    pub rating: u8,
}

impl RatingDraft {
    /// Validate the form and turn it into a [`Rating`] on `listing_id`, authored by the session's user.
    pub fn submit(self, session: &Session, listing_id: &str, now: DateTime<Utc>) -> Result<Rating> {
        if is_blank(&self.text) {
            return Err(ValidationError::MissingField("text"));
        }
        if self.rating == 0 {
            return Err(ValidationError::MissingField("rating"));
        }
        let score = Score::try_from(self.rating)?;
        let user = session
            .user()
            .ok_or(ValidationError::SignInRequired("submit a review"))?;

        Ok(Rating {
            id: random_id("review"),
            listing_id: listing_id.to_string(),
            rating: score,
            text: self.text,
            created_at: Some(now),
            user_id: user.uid.clone(),
            user_name: Some(session.author_name()),
            user_photo: Some(session.author_photo()),
        })
    }
}

/// Reviews as shown on a listing's page: newest first, unstamped ones last.
pub fn newest_first(ratings: &[Rating]) -> Vec<Rating> {
    let mut sorted = ratings.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}
