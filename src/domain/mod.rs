mod deviation;
mod deviation_analysis;
mod deviation_id;
mod evidence_map;
mod media_id;
mod namespace;
mod object_key;
mod solution;

pub use deviation::Deviation;
pub use deviation_analysis::DeviationAnalysis;
pub use deviation_id::{ANALYSIS_KEY_SUFFIX, DeviationId};
pub use evidence_map::EvidenceMap;
pub use media_id::MediaId;
pub use namespace::Namespace;
pub use object_key::ObjectKey;
pub use solution::Solution;
