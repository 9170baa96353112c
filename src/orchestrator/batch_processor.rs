//! 批量号码处理器 - 编排层
//!
//! ## 职责
//!
//! 把一组号码转换成同样顺序的 `LookupResult` 列表，同时限制上游并发和请求频率。
//!
//! ## 核心流程
//!
//! 1. **前置校验**：空列表直接返回 `Validation` 错误，不执行任何批次
//! 2. **分批**：按 `batch_size` 切成连续的批次，批次之间严格串行
//! 3. **批内并发**：批内所有号码同时查询，等全部结束后才进入下一批
//! 4. **限速**：除最后一批外，每批结束后等待 `delay`
//! 5. **失败隔离**：单个号码失败只记录到它自己的结果里，不影响其他号码
//!
//! 批内结果按下标写回预分配的槽位，输出顺序与输入顺序一致，和上游返回快慢无关。

use crate::clients::TopUpLookup;
use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError};
use crate::models::number_policy::INVALID_NUMBER;
use crate::models::{LookupResult, NumberPolicy};
use crate::utils::logging;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

pub const NO_NUMBERS: &str = "No mobile numbers provided.";

/// 分批参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    pub batch_size: usize,
    pub delay: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            batch_size: 20,
            delay: Duration::from_millis(1000),
        }
    }
}

impl BatchOptions {
    pub fn new(batch_size: usize, delay: Duration) -> Self {
        Self { batch_size, delay }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.batch_size, config.batch_delay())
    }
}

/// 处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchStats {
    pub total: usize,
    pub available: usize,
    pub unavailable: usize,
    pub failed: usize,
    pub batches: usize,
    pub pauses: usize,
}

impl BatchStats {
    fn record(&mut self, results: &[LookupResult]) {
        for result in results {
            if result.is_failed() {
                self.failed += 1;
            } else if result.is_top_up_available {
                self.available += 1;
            } else {
                self.unavailable += 1;
            }
        }
    }
}

/// 一次完整运行的输出
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub results: Vec<LookupResult>,
    pub stats: BatchStats,
}

/// 批量处理器
pub struct BatchProcessor {
    lookup: Arc<dyn TopUpLookup>,
    options: BatchOptions,
    policy: NumberPolicy,
}

impl BatchProcessor {
    pub fn new(lookup: Arc<dyn TopUpLookup>, options: BatchOptions, policy: NumberPolicy) -> Self {
        Self {
            lookup,
            options,
            policy,
        }
    }

    /// 处理全部号码，只返回结果列表
    pub async fn run(&self, numbers: &[String]) -> AppResult<Vec<LookupResult>> {
        Ok(self.process(numbers).await?.results)
    }

    /// 处理全部号码，返回结果和统计
    pub async fn process(&self, numbers: &[String]) -> AppResult<BatchOutcome> {
        if numbers.is_empty() {
            return Err(AppError::Validation(NO_NUMBERS.to_string()));
        }
        let batch_size = self.options.batch_size;
        if batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize.into());
        }

        let total = numbers.len();
        let total_batches = total.div_ceil(batch_size);
        logging::log_numbers_loaded(total, batch_size);

        let mut results = Vec::with_capacity(total);
        let mut stats = BatchStats {
            total,
            ..Default::default()
        };

        for (batch_index, batch) in numbers.chunks(batch_size).enumerate() {
            let batch_num = batch_index + 1;
            let batch_start = batch_index * batch_size;

            logging::log_batch_start(
                batch_num,
                total_batches,
                batch_start + 1,
                batch_start + batch.len(),
                total,
            );

            let batch_results = self.process_batch(batch).await;

            let mut batch_stats = BatchStats::default();
            batch_stats.record(&batch_results);
            logging::log_batch_complete(
                batch_num,
                batch_stats.available,
                batch_stats.failed,
                batch_results.len(),
            );

            stats.record(&batch_results);
            stats.batches += 1;
            results.extend(batch_results);

            if batch_num < total_batches {
                tokio::time::sleep(self.options.delay).await;
                stats.pauses += 1;
            }
        }

        if results.len() != total {
            return Err(AppError::Internal(format!(
                "结果数量不一致: 输入 {} 个, 输出 {} 个",
                total,
                results.len()
            )));
        }

        logging::print_final_stats(&stats);

        Ok(BatchOutcome { results, stats })
    }

    /// 并发处理单个批次，结果顺序与批内输入顺序一致
    async fn process_batch(&self, batch: &[String]) -> Vec<LookupResult> {
        let mut slots: Vec<Option<LookupResult>> = vec![None; batch.len()];

        let mut pending: FuturesUnordered<_> = batch
            .iter()
            .enumerate()
            .map(|(idx, raw)| async move { (idx, self.lookup_one(raw).await) })
            .collect();

        while let Some((idx, result)) = pending.next().await {
            slots[idx] = Some(result);
        }

        slots.into_iter().flatten().collect()
    }

    /// 查询单个号码，所有错误都在这里转成结果
    ///
    /// 结果里的号码始终是调用方传入的原始字符串
    async fn lookup_one(&self, raw: &str) -> LookupResult {
        let Some(number) = self.policy.apply(raw) else {
            warn!("[{}] ⚠️ 号码格式不符合配置，跳过查询", raw);
            return LookupResult::failed(raw, INVALID_NUMBER);
        };

        match self.lookup.check_availability(number).await {
            Ok(is_top_up_available) => LookupResult::available(raw, is_top_up_available),
            Err(e) => {
                warn!("[{}] ❌ 查询失败: {}", raw, e);
                LookupResult::failed(raw, e.to_string())
            }
        }
    }
}
