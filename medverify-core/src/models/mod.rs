pub mod request;
pub mod result;
pub mod stage;

pub use request::VerificationRequest;
pub use result::VerificationResult;
pub use stage::AnalysisStage;
