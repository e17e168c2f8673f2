pub mod lemma;
pub mod literal;
pub mod string_distance;
pub mod tfidf;
pub mod tokenizer;
