pub mod recommender;

pub use recommender::*;
