// Application layer - Use case interactors

pub mod container;
pub mod extract_interactor;
pub mod report_interactor;
pub mod session;

// Re-export interactors
pub use extract_interactor::ExtractInteractor;
pub use report_interactor::ReportInteractor;
pub use session::{ComparisonSet, Session};
