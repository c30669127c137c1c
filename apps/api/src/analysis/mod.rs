// Keyword extraction and resume scoring.
// Everything except `handlers` is pure and synchronous.

pub mod ats_score;
pub mod handlers;
pub mod keywords;
pub mod lexicon;
pub mod matcher;
pub mod suggestions;
