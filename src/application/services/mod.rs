mod analysis_dispatcher;
mod analysis_pipeline;
pub mod analysis_prompt;
mod deviation_service;

pub use analysis_dispatcher::{
    AnalysisDispatcher, DispatchError, DispatchPolicy, JobOutcome, JobReceipt,
};
pub use analysis_pipeline::{AnalysisError, AnalysisJob, AnalysisPipeline};
pub use analysis_prompt::{
    PromptOptions, build_solution_prompt, parse_solution, strip_code_fences,
};
pub use deviation_service::{DeviationDraft, DeviationError, DeviationService, Submission};
