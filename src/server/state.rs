//! HTTP 共享状态

use std::path::PathBuf;

use crate::orchestrator::BatchProcessor;

pub struct AppState {
    pub processor: BatchProcessor,
    /// 静态页面目录（API 之外的路径都从这里取）
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(processor: BatchProcessor, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            processor,
            static_dir: static_dir.into(),
        }
    }
}
