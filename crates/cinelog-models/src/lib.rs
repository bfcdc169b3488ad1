pub mod aggregate;
pub mod identity;
pub mod movie;
pub mod review;

pub use aggregate::AggregateRating;
pub use identity::AnonymousIdentity;
pub use movie::{Genre, Movie, MovieDetails, PosterSize};
pub use review::{MovieSnapshot, NewReview, Review, ReviewCandidate};
