pub mod error;
pub mod request;
pub mod result;

pub use error::{AdvisorError, ErrorCategory, Result};
pub use request::{
    AnalysisRequest, ArchitectureStyle, CallType, Criticality, Database, Environment,
    ExternalIntegration, Goal, GoalStep,
};
pub use result::{AnalysisResult, ArchitectureOption, Evidence, ResultMeta};
