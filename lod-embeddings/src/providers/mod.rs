mod hashing;

pub use hashing::HashingEmbedder;
