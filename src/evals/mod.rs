pub mod context_accuracy;
pub mod hallucination;
pub mod runner;

pub use context_accuracy::score_context_accuracy;
pub use hallucination::{detect_hallucination, HallucinationVerdict};
pub use runner::{EvalReport, EvalSummary, Evaluator, QuestionOutcome, ReportWriter};
