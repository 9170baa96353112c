//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! server (POST /check-topup-bulk)
//!     ↓
//! batch_processor (处理 Vec<号码>，分批 + 限速)
//!     ↓
//! clients::TopUpLookup (处理单个号码)
//!     ↓
//! 上游充值接口
//! ```
//!
//! 编排层只做调度和统计，不关心单个号码的握手细节。

pub mod batch_processor;

pub use batch_processor::{BatchOptions, BatchOutcome, BatchProcessor, BatchStats, NO_NUMBERS};
