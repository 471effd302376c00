//! Shared application state
//!
//! Built once at start-up and never mutated; handlers receive cheap clones.

use std::sync::Arc;

use crate::advisory::AdvisoryService;
use crate::api::index::IndexPage;
use crate::model::YieldModel;
use crate::predictor::YieldPredictor;
use crate::vocabulary::Vocabulary;

#[derive(Clone)]
pub struct AppState {
    pub vocabulary: Arc<Vocabulary>,
    pub predictor: YieldPredictor,
    pub advisory: AdvisoryService,
    pub index_page: Arc<IndexPage>,
}

impl AppState {
    pub fn new(
        vocabulary: Arc<Vocabulary>,
        model: Arc<dyn YieldModel>,
        advisory: AdvisoryService,
    ) -> anyhow::Result<Self> {
        let predictor = YieldPredictor::new(Arc::clone(&vocabulary), model);
        let index_page = Arc::new(IndexPage::new()?);
        Ok(Self {
            vocabulary,
            predictor,
            advisory,
            index_page,
        })
    }
}
