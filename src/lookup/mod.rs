//! 检索服务 - 网页检索与趋势信号两类外部能力的接口

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

pub mod google;

pub use google::GoogleSearchClient;

/// 检索结果为空时返回的文本
pub const NO_RESULTS: &str = "No good Google Search Result was found";

/// 网页检索服务：输入查询，返回按相关性排列的摘要文本
#[async_trait]
pub trait LookupService: Send + Sync {
    async fn search(&self, query: &str) -> Result<String, LookupError>;
}

/// 趋势服务：输入关键词与时间范围，返回趋势信号；无数据时返回None
#[async_trait]
pub trait TrendService: Send + Sync {
    async fn trend(&self, term: &str, timeframe: &str) -> Result<Option<TrendSignal>, LookupError>;
}

/// 关键词的搜索热度信号
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSignal {
    pub peak: f64,
    pub latest: f64,
    pub mean: f64,
    pub rising: bool,
}

impl TrendSignal {
    /// 由时间序列计算信号，最新值高于均值即视为上升
    pub fn from_series(series: &[f64]) -> Option<Self> {
        let latest = *series.last()?;
        let peak = series.iter().copied().fold(f64::MIN, f64::max);
        let mean = series.iter().sum::<f64>() / series.len() as f64;

        Some(Self {
            peak,
            latest,
            mean,
            rising: latest > mean,
        })
    }

    /// 供Agent阅读的文本
    pub fn describe(&self, term: &str, timeframe: &str) -> String {
        format!(
            "Search interest for '{}' over '{}': peak {:.1}, latest {:.1}, mean {:.1}, trend {}.",
            term,
            timeframe,
            self.peak,
            self.latest,
            self.mean,
            if self.rising { "rising" } else { "flat or falling" }
        )
    }
}
