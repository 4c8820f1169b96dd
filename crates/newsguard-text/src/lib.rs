#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! newsguard-text
//!
//! Text cleaning, tokenization and TF-IDF features. `normalize` lives here and
//! only here so the trainer and the service cannot disagree about it.
pub mod normalize;
pub mod tfidf;
pub mod tokenize;

pub use normalize::normalize;
pub use tfidf::TfidfVectorizer;
