pub mod client;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod models;
pub mod report;
pub mod shell;

pub use client::{ClientError, HttpVerificationClient, VerificationBackend};
pub use crate::config::MedVerifyConfig;
pub use coordinator::{
    example_label, Coordinator, DashboardError, DashboardEvent, DashboardState, EXAMPLE_QUERIES,
};
pub use error::{ErrorKind, MedVerifyError, VerifyError};
pub use models::{AnalysisStage, VerificationRequest, VerificationResult};
pub use report::{Report, SeverityBand};
pub use shell::{AuthForm, AuthTab, Navigator, Page, Session, ShellError};
