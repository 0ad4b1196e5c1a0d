use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::types::analysis::{AnalysisOutcome, AnalysisReport};
use crate::types::combined::SynthesisOutcome;
use crate::types::intent::IntentRecord;
use crate::types::report::SectionReport;

/// 章节内容为空时的展示文本
pub const NO_DATA: &str = "No data available.";

/// 将分析结果渲染为Markdown
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn render(report: &AnalysisReport) -> String {
        let mut doc = String::new();
        doc.push_str(&format!(
            "# 💡 VentureVision: {}\n\n",
            report.outcome.kind().display_name()
        ));
        doc.push_str(&Self::render_intent(&report.intent));
        doc.push_str("\n---\n\n");

        match &report.outcome {
            AnalysisOutcome::Overall(outcome) => doc.push_str(&Self::render_synthesis(outcome)),
            AnalysisOutcome::Market(market) => doc.push_str(&Self::render_sections(market)),
            AnalysisOutcome::Competitive(competitive) => {
                doc.push_str(&Self::render_sections(competitive))
            }
            AnalysisOutcome::Financial(financial) => {
                doc.push_str(&Self::render_sections(financial))
            }
        }

        doc
    }

    pub fn render_intent(intent: &IntentRecord) -> String {
        format!(
            "**Business Type:** {}\n\n**Location:** {}\n\n**Description:** {}\n",
            intent.business, intent.location, intent.description
        )
    }

    /// 按固定章节顺序渲染报告，空章节显示占位文本
    pub fn render_sections<R: SectionReport>(report: &R) -> String {
        report
            .contents()
            .into_iter()
            .map(|(section, content)| {
                let content = if content.trim().is_empty() {
                    NO_DATA
                } else {
                    content
                };
                format!("#### {} {}\n\n{}\n", section.icon, section.title, content)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render_synthesis(outcome: &SynthesisOutcome) -> String {
        match outcome {
            SynthesisOutcome::Combined(combined) => [
                ("🌍 Market Trends", &combined.market_analysis),
                ("💰 Competitors", &combined.competitive_analysis),
                ("📈 Financial Overview", &combined.financial_analysis),
                ("📝 Executive Summary", &combined.executive_summary),
            ]
            .iter()
            .map(|(title, content)| {
                let content = if content.trim().is_empty() {
                    NO_DATA
                } else {
                    content.as_str()
                };
                format!("#### {}\n\n{}\n", title, content)
            })
            .collect::<Vec<_>>()
            .join("\n"),
            SynthesisOutcome::Unstructured { raw_output, cause } => {
                let mut doc = format!("> ⚠️ The combined analysis could not be structured: {}\n", cause);
                if !raw_output.trim().is_empty() {
                    doc.push('\n');
                    doc.push_str(raw_output);
                    doc.push('\n');
                }
                doc
            }
        }
    }
}

pub trait Outlet {
    fn save(&self, report: &AnalysisReport) -> Result<()>;
}

/// 将Markdown写入磁盘
pub struct DiskOutlet {
    path: PathBuf,
}

impl DiskOutlet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Outlet for DiskOutlet {
    fn save(&self, report: &AnalysisReport) -> Result<()> {
        tracing::info!("🖊️ 报告存储中...");
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
        fs::write(&self.path, MarkdownRenderer::render(report))
            .with_context(|| format!("Failed to write report to {:?}", self.path))?;
        tracing::info!("💾 报告已保存到 {}", self.path.display());
        Ok(())
    }
}
