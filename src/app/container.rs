use std::sync::Arc;

use crate::adapters::{HttpAnalysisAdapter, TracingLogAdapter};
use crate::app::{analyze_interactor::AnalyzeInteractor, info_interactor::InfoInteractor};
use crate::domain::errors::DomainError;
use crate::ports::{AnalysisPort, LogPort};

pub trait AppContainer: Send + Sync {
    fn analyze_interactor(&self) -> Arc<AnalyzeInteractor>;
    fn info_interactor(&self) -> Arc<InfoInteractor>;
}

pub struct DefaultAppContainer {
    analyze_interactor: Arc<AnalyzeInteractor>,
    info_interactor: Arc<InfoInteractor>,
}

impl DefaultAppContainer {
    /// Wire the HTTP adapter for `api_url`
    pub fn new(api_url: &str) -> Result<Self, DomainError> {
        let analysis_port = Arc::new(HttpAnalysisAdapter::new(api_url)?);
        Ok(Self::with_ports(analysis_port, Arc::new(TracingLogAdapter::new())))
    }

    /// Wire interactors over arbitrary ports
    pub fn with_ports(analysis_port: Arc<dyn AnalysisPort>, log_port: Arc<dyn LogPort>) -> Self {
        let analyze_interactor = Arc::new(AnalyzeInteractor::new(
            Arc::clone(&analysis_port),
            Arc::clone(&log_port),
        ));

        let info_interactor = Arc::new(InfoInteractor::new(
            Arc::clone(&analysis_port),
            Arc::clone(&log_port),
        ));

        Self {
            analyze_interactor,
            info_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn analyze_interactor(&self) -> Arc<AnalyzeInteractor> {
        Arc::clone(&self.analyze_interactor)
    }

    fn info_interactor(&self) -> Arc<InfoInteractor> {
        Arc::clone(&self.info_interactor)
    }
}
