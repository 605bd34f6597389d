//! Route finalization and solution checking.

mod evaluator;

pub use evaluator::RouteEvaluator;
