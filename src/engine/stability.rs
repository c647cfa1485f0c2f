use std::collections::VecDeque;

use crate::constants::{SCORE_HISTORY_CAPACITY, STABILITY_VARIANCE_LIMIT, STABILITY_WINDOW};

/// 单个辅导会话的评分历史与稳定性判定。
///
/// 严格容量 10 的环形缓冲：超出时先逐出最旧记录。
/// 状态机：Empty →（≥1 条）Filling →（≥5 条）Evaluable，`reset` 回到 Empty；
/// 无终止状态，可跨多次 reset 复用。
#[derive(Debug, Clone, Default)]
pub struct StabilityTracker {
    history: VecDeque<u8>,
}

impl StabilityTracker {
    pub fn new() -> Self {
        Self {
            history: VecDeque::with_capacity(SCORE_HISTORY_CAPACITY),
        }
    }

    pub fn record(&mut self, score: u8) {
        if self.history.len() == SCORE_HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(score);
    }

    /// 最近 5 个评分的均值 ≥ threshold 且总体方差 < 50 时判定稳定。
    /// 历史不足 5 条时恒为 false（前置条件，不是错误）。
    pub fn is_stable(&self, threshold: u8) -> bool {
        if self.history.len() < STABILITY_WINDOW {
            return false;
        }

        let recent: Vec<f64> = self
            .history
            .iter()
            .rev()
            .take(STABILITY_WINDOW)
            .map(|&s| f64::from(s))
            .collect();

        let mean = recent.iter().sum::<f64>() / recent.len() as f64;
        let variance =
            recent.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / recent.len() as f64;

        mean >= f64::from(threshold) && variance < STABILITY_VARIANCE_LIMIT
    }

    /// 清空历史。模板切换或采集启停时必须调用，避免旧会话历史泄入新会话。
    pub fn reset(&mut self) {
        self.history.clear();
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
