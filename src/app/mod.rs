// Application layer - Session controller and use case interactors

pub mod analyze_interactor;
pub mod container;
pub mod info_interactor;
pub mod session;

// Re-export interactors
pub use analyze_interactor::{AnalyzeInteractor, AnalyzeRequest, AnalyzeResponse};
pub use info_interactor::InfoInteractor;
pub use session::UploadSession;
