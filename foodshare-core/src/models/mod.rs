pub mod listing;
pub mod order;
pub mod rating;
pub mod session;

pub use listing::{Listing, ListingDraft};
pub use order::{BuyerDetails, Order};
pub use rating::{Rating, RatingDraft, Score};
pub use session::{Profile, Session, User};
