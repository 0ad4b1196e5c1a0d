use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::Instrument;
use uuid::Uuid;

use crate::error::ExtractionFailure;
use crate::generator::context::AnalysisContext;
use crate::generator::intent::IntentExtractor;
use crate::generator::research::agents::{
    competitive_analyst::CompetitiveAnalyst, financial_analyst::FinancialAnalyst,
    market_analyst::MarketAnalyst,
};
use crate::generator::section_agent::SectionAgent;
use crate::generator::synthesis::Synthesizer;
use crate::types::analysis::{AnalysisKind, AnalysisOutcome, AnalysisReport};

/// 时间跟踪作用域
pub struct TimingScope {
    start_time: Instant,
    phase_start_times: HashMap<&'static str, Instant>,
    phase_durations: Vec<(&'static str, Duration)>,
}

impl Default for TimingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase_start_times: HashMap::new(),
            phase_durations: Vec::new(),
        }
    }

    /// 开始一个新的阶段计时
    pub fn start_phase(&mut self, phase_name: &'static str) {
        self.phase_start_times.insert(phase_name, Instant::now());
    }

    /// 结束一个阶段的计时
    pub fn end_phase(&mut self, phase_name: &'static str) -> Option<Duration> {
        let duration = self.phase_start_times.remove(phase_name)?.elapsed();
        self.phase_durations.push((phase_name, duration));
        Some(duration)
    }

    pub fn phase_durations(&self) -> &[(&'static str, Duration)] {
        &self.phase_durations
    }

    /// 获取格式化的执行时间报告
    pub fn generate_timing_report(&self) -> String {
        let mut report = format!(
            "总执行时间: {:.2}秒",
            self.start_time.elapsed().as_secs_f64()
        );
        for (phase, duration) in &self.phase_durations {
            report.push_str(&format!("\n- {}: {:.3}秒", phase, duration.as_secs_f64()));
        }
        report
    }
}

/// 时间跟踪常量
pub struct TimingKeys;

impl TimingKeys {
    pub const EXTRACTION: &'static str = "extraction";
    pub const RESEARCH: &'static str = "research";
    pub const SYNTHESIS: &'static str = "synthesis";
}

/// 分析工作流：意图提取 → 并行章节分析 → 综合
pub struct AnalysisWorkflow {
    context: AnalysisContext,
}

impl AnalysisWorkflow {
    pub fn new(context: AnalysisContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &AnalysisContext {
        &self.context
    }

    /// 执行完整分析（三项分析并综合）
    pub async fn analyze(&self, user_query: &str) -> Result<AnalysisReport, ExtractionFailure> {
        self.run(user_query, AnalysisKind::Overall).await
    }

    /// 以调用方指定的时间上限执行分析
    pub async fn run_with_timeout(
        &self,
        user_query: &str,
        kind: AnalysisKind,
        timeout: Duration,
    ) -> Result<AnalysisReport, ExtractionFailure> {
        let context = self.context.clone().with_timeout(timeout);
        Self::run_in(&context, user_query, kind).await
    }

    /// 按选择的分析类型执行
    pub async fn run(
        &self,
        user_query: &str,
        kind: AnalysisKind,
    ) -> Result<AnalysisReport, ExtractionFailure> {
        Self::run_in(&self.context, user_query, kind).await
    }

    async fn run_in(
        context: &AnalysisContext,
        user_query: &str,
        kind: AnalysisKind,
    ) -> Result<AnalysisReport, ExtractionFailure> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("analysis", %run_id, %kind);

        async move {
            tracing::info!("🚀 开始执行 {} ...", kind.display_name());
            let mut timing = TimingScope::new();

            timing.start_phase(TimingKeys::EXTRACTION);
            let intent = IntentExtractor.extract(context, user_query).await;
            timing.end_phase(TimingKeys::EXTRACTION);

            if !intent.has_business() {
                let reason = intent
                    .error
                    .clone()
                    .unwrap_or_else(|| "no business type identified".to_string());
                tracing::warn!("⚠️ 未能识别业务类型，终止分析: {}", reason);
                return Err(ExtractionFailure {
                    reason,
                    extracted_info: intent,
                });
            }

            timing.start_phase(TimingKeys::RESEARCH);
            let outcome = match kind {
                AnalysisKind::Market => {
                    let report = MarketAnalyst.execute(context, &intent).await;
                    timing.end_phase(TimingKeys::RESEARCH);
                    AnalysisOutcome::Market(report)
                }
                AnalysisKind::Competitive => {
                    let report = CompetitiveAnalyst.execute(context, &intent).await;
                    timing.end_phase(TimingKeys::RESEARCH);
                    AnalysisOutcome::Competitive(report)
                }
                AnalysisKind::Financial => {
                    let report = FinancialAnalyst.execute(context, &intent).await;
                    timing.end_phase(TimingKeys::RESEARCH);
                    AnalysisOutcome::Financial(report)
                }
                AnalysisKind::Overall => {
                    let (market, competitive, financial) = tokio::join!(
                        MarketAnalyst.execute(context, &intent),
                        CompetitiveAnalyst.execute(context, &intent),
                        FinancialAnalyst.execute(context, &intent),
                    );
                    timing.end_phase(TimingKeys::RESEARCH);

                    timing.start_phase(TimingKeys::SYNTHESIS);
                    let synthesis = Synthesizer
                        .synthesize(context, &intent, &market, &competitive, &financial)
                        .await;
                    timing.end_phase(TimingKeys::SYNTHESIS);

                    AnalysisOutcome::Overall(synthesis)
                }
            };

            tracing::info!("🎉 分析完成\n{}", timing.generate_timing_report());
            Ok(AnalysisReport { intent, outcome })
        }
        .instrument(span)
        .await
    }
}
