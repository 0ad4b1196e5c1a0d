use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::Display;

/// 报告中的一个章节
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub key: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
}

const fn section(key: &'static str, title: &'static str, icon: &'static str) -> Section {
    Section { key, title, icon }
}

/// 固定章节的分析报告
///
/// 每个实现都保证所有章节字段始终存在：成功时为模型内容，失败时主字段为
/// `"Error: <原因>"`，其余字段为空字符串。
pub trait SectionReport:
    JsonSchema + DeserializeOwned + Serialize + Clone + Send + Sync + 'static
{
    /// 失败时承载错误信息的字段
    const PRIMARY_FIELD: &'static str;

    /// 按展示顺序排列的章节
    fn sections() -> &'static [Section];

    /// 构造完整的失败报告
    fn failure(cause: impl Display) -> Self;

    /// 按章节顺序返回内容
    fn contents(&self) -> Vec<(Section, &str)>;

    fn is_failure(&self) -> bool {
        self.contents()
            .iter()
            .any(|(s, content)| s.key == Self::PRIMARY_FIELD && content.starts_with("Error: "))
    }
}

fn error_text(cause: impl Display) -> String {
    format!("Error: {}", cause)
}

/// 市场调研报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MarketReport {
    /// Current market size, projected growth and key drivers, with statistics and forecasts.
    pub market_overview: String,
    /// Overview of the main competitors and how crowded the market is.
    pub competitive_landscape: String,
    /// Ideal customer profile, needs, pain points and purchasing habits.
    pub target_customers: String,
    /// Relevant laws, licenses, permits and industry-specific regulations.
    pub regulatory_environment: String,
    /// Strengths, weaknesses, opportunities and threats specific to this startup.
    pub swot_analysis: String,
    /// New technologies, consumer shifts and disruptors that could impact the market.
    pub emerging_trends: String,
    /// Clear, strategic recommendations for the entrepreneur.
    pub key_recommendations: String,
}

static MARKET_SECTIONS: [Section; 7] = [
    section("market_overview", "Market Overview", "🏢"),
    section("competitive_landscape", "Competitive Landscape", "🏆"),
    section("target_customers", "Target Customers", "🎯"),
    section("regulatory_environment", "Regulatory Environment", "⚖️"),
    section("swot_analysis", "SWOT Analysis", "💡"),
    section("emerging_trends", "Emerging Trends", "🚀"),
    section("key_recommendations", "Key Recommendations", "📌"),
];

impl SectionReport for MarketReport {
    const PRIMARY_FIELD: &'static str = "market_overview";

    fn sections() -> &'static [Section] {
        &MARKET_SECTIONS
    }

    fn failure(cause: impl Display) -> Self {
        Self {
            market_overview: error_text(cause),
            competitive_landscape: String::new(),
            target_customers: String::new(),
            regulatory_environment: String::new(),
            swot_analysis: String::new(),
            emerging_trends: String::new(),
            key_recommendations: String::new(),
        }
    }

    fn contents(&self) -> Vec<(Section, &str)> {
        let values = [
            &self.market_overview,
            &self.competitive_landscape,
            &self.target_customers,
            &self.regulatory_environment,
            &self.swot_analysis,
            &self.emerging_trends,
            &self.key_recommendations,
        ];
        MARKET_SECTIONS
            .iter()
            .copied()
            .zip(values.into_iter().map(String::as_str))
            .collect()
    }
}

/// 竞争分析报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CompetitiveReport {
    /// The most significant direct and indirect competitors in the market and location.
    pub competitors: String,
    /// Business model, offerings, pricing, target customers and USP of each key competitor.
    pub competitor_profiles: String,
    /// How the startup and its competitors are positioned in the market.
    pub market_positioning: String,
    /// Main strengths and weaknesses of each competitor relative to the startup.
    pub strengths_weaknesses: String,
    /// Opportunities for differentiation and threats posed by competitors.
    pub opportunities_threats: String,
    /// Prioritized recommendations to compete and build a sustainable position.
    pub strategic_recommendations: String,
}

static COMPETITIVE_SECTIONS: [Section; 6] = [
    section("competitors", "Key Competitors", "🏢"),
    section("competitor_profiles", "Competitor Profiles", "🧑‍💼"),
    section("market_positioning", "Market Positioning", "📊"),
    section("strengths_weaknesses", "Strengths & Weaknesses", "💪"),
    section("opportunities_threats", "Opportunities & Threats", "⚡"),
    section("strategic_recommendations", "Strategic Recommendations", "🧭"),
];

impl SectionReport for CompetitiveReport {
    const PRIMARY_FIELD: &'static str = "competitors";

    fn sections() -> &'static [Section] {
        &COMPETITIVE_SECTIONS
    }

    fn failure(cause: impl Display) -> Self {
        Self {
            competitors: error_text(cause),
            competitor_profiles: String::new(),
            market_positioning: String::new(),
            strengths_weaknesses: String::new(),
            opportunities_threats: String::new(),
            strategic_recommendations: String::new(),
        }
    }

    fn contents(&self) -> Vec<(Section, &str)> {
        let values = [
            &self.competitors,
            &self.competitor_profiles,
            &self.market_positioning,
            &self.strengths_weaknesses,
            &self.opportunities_threats,
            &self.strategic_recommendations,
        ];
        COMPETITIVE_SECTIONS
            .iter()
            .copied()
            .zip(values.into_iter().map(String::as_str))
            .collect()
    }
}

/// 财务分析报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FinancialReport {
    /// Estimated costs to launch the business, with a breakdown if possible.
    pub startup_costs: String,
    /// Main revenue streams, market size and realistic revenue estimates.
    pub revenue_potential: String,
    /// Possible funding sources (loans, grants, investors) and strategies.
    pub funding_options: String,
    /// Expected profit margins and what affects them in this industry.
    pub profit_margins: String,
    /// Major financial risks and how to mitigate them.
    pub financial_risks: String,
    /// Clear, prioritized financial actions for the entrepreneur.
    pub strategic_recommendations: String,
}

static FINANCIAL_SECTIONS: [Section; 6] = [
    section("startup_costs", "Startup Costs", "🏗️"),
    section("revenue_potential", "Revenue Potential", "💵"),
    section("funding_options", "Funding Options", "🏦"),
    section("profit_margins", "Profit Margins", "📈"),
    section("financial_risks", "Financial Risks", "⚠️"),
    section("strategic_recommendations", "Strategic Recommendations", "🧭"),
];

impl SectionReport for FinancialReport {
    const PRIMARY_FIELD: &'static str = "startup_costs";

    fn sections() -> &'static [Section] {
        &FINANCIAL_SECTIONS
    }

    fn failure(cause: impl Display) -> Self {
        Self {
            startup_costs: error_text(cause),
            revenue_potential: String::new(),
            funding_options: String::new(),
            profit_margins: String::new(),
            financial_risks: String::new(),
            strategic_recommendations: String::new(),
        }
    }

    fn contents(&self) -> Vec<(Section, &str)> {
        let values = [
            &self.startup_costs,
            &self.revenue_potential,
            &self.funding_options,
            &self.profit_margins,
            &self.financial_risks,
            &self.strategic_recommendations,
        ];
        FINANCIAL_SECTIONS
            .iter()
            .copied()
            .zip(values.into_iter().map(String::as_str))
            .collect()
    }
}
