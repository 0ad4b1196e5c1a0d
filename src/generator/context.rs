use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};

use crate::config::Config;
use crate::llm::client::ReActConfig;
use crate::llm::service::{GenerationService, Toolset};
use crate::llm::tools::{search::AgentToolSearch, trend::AgentToolTrend};
use crate::lookup::{LookupService, TrendService};

/// 一次分析所需的全部外部依赖，由调用方显式注入
#[derive(Clone)]
pub struct AnalysisContext {
    /// 文本生成服务
    pub generation: Arc<dyn GenerationService>,
    /// 网页检索服务
    pub lookup: Arc<dyn LookupService>,
    /// 搜索趋势服务，未注入时市场分析不提供趋势工具
    pub trend: Option<Arc<dyn TrendService>>,
    /// 配置
    pub config: Config,
    /// 每次外部调用的时间上限
    pub timeout: Duration,
}

impl AnalysisContext {
    pub fn new(
        config: Config,
        generation: Arc<dyn GenerationService>,
        lookup: Arc<dyn LookupService>,
    ) -> Self {
        let timeout = config.llm.timeout();
        Self {
            generation,
            lookup,
            trend: None,
            config,
            timeout,
        }
    }

    pub fn with_trend(mut self, trend: Arc<dyn TrendService>) -> Self {
        self.trend = Some(trend);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 为Agent组装工具集，`include_trend`仅在趋势服务存在时生效
    pub fn toolset(&self, include_trend: bool) -> Toolset {
        let search = AgentToolSearch::new(self.lookup.clone());
        let trend = self
            .trend
            .clone()
            .filter(|_| include_trend)
            .map(AgentToolTrend::new);
        Toolset::new(search, trend)
    }

    pub fn react_config(&self) -> ReActConfig {
        ReActConfig::with_max_iterations(self.config.llm.max_iterations)
    }

    /// 在上下文的时间上限内执行一次外部调用
    pub async fn bounded<T, F>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.timeout, operation).await {
            Ok(result) => result,
            Err(_) => Err(anyhow!("timed out after {}s", self.timeout.as_secs_f64())),
        }
    }
}
