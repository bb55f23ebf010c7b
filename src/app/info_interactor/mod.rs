// Info interactor - Fetches the analysis service descriptor

use std::sync::Arc;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Interactor for the service info use case
pub struct InfoInteractor {
    analysis_port: Arc<dyn AnalysisPort>,
    log_port: Arc<dyn LogPort>,
}

impl InfoInteractor {
    pub fn new(analysis_port: Arc<dyn AnalysisPort>, log_port: Arc<dyn LogPort>) -> Self {
        Self {
            analysis_port,
            log_port,
        }
    }

    /// Ask the service to describe itself
    pub async fn execute(&self) -> Result<AnalysisResult, DomainError> {
        self.log_port
            .info(&format!("Querying service at {}", self.analysis_port.base_url()))
            .await;

        match self.analysis_port.service_info().await {
            Ok(info) => {
                self.log_port.debug("Service descriptor received").await;
                Ok(info)
            }
            Err(err) => {
                self.log_port
                    .error(&format!("Service query failed: {}", err))
                    .await;
                Err(err)
            }
        }
    }
}
