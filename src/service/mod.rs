pub mod brief;
pub mod domain;
pub mod evidence;
pub mod llm;
pub mod synthesis;
pub mod tech_stack;

pub use brief::{BriefService, BriefServiceError};
pub use evidence::EvidenceCollector;
pub use llm::LlmClient;
pub use synthesis::NarrativeSynthesizer;
