/// Computes similarity scores for many candidates at once.
///
/// Implementations must return exactly one score per candidate, in candidate
/// order, and must agree with every other implementation so rankings do not
/// depend on which scorer is installed.
pub trait IBatchScorer: Send + Sync {
    fn score_batch(&self, query: &[f32], candidates: &[&[f32]]) -> Vec<f64>;

    fn name(&self) -> &str;
}
