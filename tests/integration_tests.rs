mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use venture_vision::config::ModelTier;
use venture_vision::generator::intent::IntentExtractor;
use venture_vision::generator::research::{
    run_competitive_analysis, run_financial_analysis, run_market_analysis,
};
use venture_vision::generator::research::agents::{
    competitive_analyst::CompetitiveAnalyst, financial_analyst::FinancialAnalyst,
    market_analyst::MarketAnalyst,
};
use venture_vision::generator::section_agent::SectionAgent;
use venture_vision::generator::synthesis::Synthesizer;
use venture_vision::generator::workflow::AnalysisWorkflow;
use venture_vision::types::intent::{ANY_LOCATION, NO_DESCRIPTION, UNKNOWN_BUSINESS};
use venture_vision::types::{
    AnalysisKind, AnalysisOutcome, CompetitiveReport, EXECUTIVE_SUMMARY_POINTS, FinancialReport,
    IntentRecord, MarketReport, SectionReport, SynthesisOutcome,
};

fn bakery() -> IntentRecord {
    IntentRecord::new("Bakery", "Mumbai", "A cozy bakery")
}

fn assert_all_keys_present<R: SectionReport>(report: &R) {
    let value = serde_json::to_value(report).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), R::sections().len());
    for section in R::sections() {
        assert!(object[section.key].is_string(), "missing {}", section.key);
    }
}

#[tokio::test]
async fn test_failed_agents_still_return_every_field() {
    let generation = Arc::new(
        MockGeneration::new()
            .on(MARKET, Behavior::Fail("quota exceeded".into()))
            .on(COMPETITIVE, Behavior::Reply(r#"{"competitors": "only one key"}"#.into()))
            .on(FINANCIAL, Behavior::Reply("Sorry, I cannot help with that.".into())),
    );
    let ctx = context(generation, Arc::new(MockLookup::default()));
    let intent = bakery();

    let market = MarketAnalyst.execute(&ctx, &intent).await;
    let competitive = CompetitiveAnalyst.execute(&ctx, &intent).await;
    let financial = FinancialAnalyst.execute(&ctx, &intent).await;

    assert_all_keys_present(&market);
    assert_all_keys_present(&competitive);
    assert_all_keys_present(&financial);

    assert!(market.is_failure());
    assert!(market.market_overview.contains("quota exceeded"));
    assert!(competitive.competitors.starts_with("Error: "));
    assert!(competitive.competitor_profiles.is_empty());
    assert!(financial.startup_costs.starts_with("Error: "));
}

#[tokio::test]
async fn test_blank_query_makes_no_calls() {
    let generation = Arc::new(MockGeneration::happy());
    let ctx = context(generation.clone(), Arc::new(MockLookup::default()));

    let intent = IntentExtractor.extract(&ctx, " \n\t ").await;

    assert_eq!(intent.business, UNKNOWN_BUSINESS);
    assert_eq!(intent.location, ANY_LOCATION);
    assert_eq!(intent.description, NO_DESCRIPTION);
    assert_eq!(intent.error.as_deref(), Some("empty query"));
    assert!(generation.calls().is_empty());
}

#[tokio::test]
async fn test_malformed_intent_keeps_raw_output_and_stops_pipeline() {
    let generation = Arc::new(
        MockGeneration::happy().on(INTENT, Behavior::Reply("I think it is a bakery".into())),
    );
    let workflow = AnalysisWorkflow::new(context(
        generation.clone(),
        Arc::new(MockLookup::default()),
    ));

    let failure = workflow.analyze("bakery stuff").await.unwrap_err();

    assert_eq!(failure.extracted_info.business, UNKNOWN_BUSINESS);
    assert_eq!(failure.extracted_info.location, ANY_LOCATION);
    assert_eq!(
        failure.extracted_info.raw_output.as_deref(),
        Some("I think it is a bakery")
    );
    assert!(failure.extracted_info.error.is_some());
    assert_eq!(generation.calls().len(), 1);
}

#[tokio::test]
async fn test_intent_service_failure_has_no_raw_output() {
    let generation =
        Arc::new(MockGeneration::new().on(INTENT, Behavior::Fail("503 unavailable".into())));
    let ctx = context(generation, Arc::new(MockLookup::default()));

    let intent = IntentExtractor.extract(&ctx, "a bakery in Mumbai").await;

    assert!(!intent.has_business());
    assert!(intent.error.unwrap().contains("503 unavailable"));
    assert!(intent.raw_output.is_none());
}

#[tokio::test]
async fn test_unknown_business_is_a_hard_gate() {
    let generation = Arc::new(
        MockGeneration::happy().on(INTENT, Behavior::Reply(intent_json("Unknown", "Delhi"))),
    );
    let lookup = Arc::new(MockLookup::default());
    let workflow = AnalysisWorkflow::new(context(generation.clone(), lookup.clone()));

    let failure = workflow.analyze("something in Delhi").await.unwrap_err();

    assert_eq!(failure.extracted_info.location, "Delhi");
    assert_eq!(generation.calls().len(), 1);
    assert!(lookup.queries().is_empty());
}

#[tokio::test]
async fn test_one_failing_agent_does_not_affect_the_others() {
    let generation = Arc::new(
        MockGeneration::happy().on(COMPETITIVE, Behavior::Fail("rate limited".into())),
    );
    let workflow = AnalysisWorkflow::new(context(
        generation.clone(),
        Arc::new(MockLookup::default()),
    ));

    let report = workflow.analyze("a bakery in Mumbai").await.unwrap();

    assert!(matches!(report.outcome, AnalysisOutcome::Overall(SynthesisOutcome::Combined(_))));
    let synthesis = &generation.calls_for(SYNTHESIS)[0];
    assert!(synthesis.user_prompt.contains("The Mumbai bakery market grows 9% a year."));
    assert!(synthesis.user_prompt.contains("\"competitors\": \"Error: rate limited\""));
    assert!(synthesis.user_prompt.contains("INR 25-40 lakh."));
}

#[tokio::test]
async fn test_resynthesis_is_idempotent() {
    let generation = Arc::new(MockGeneration::happy());
    let ctx = context(generation.clone(), Arc::new(MockLookup::default()));
    let intent = bakery();
    let market: MarketReport = serde_json::from_str(&market_json()).unwrap();
    let competitive = CompetitiveReport::failure("offline");
    let financial = FinancialReport::failure("offline");

    let first = Synthesizer
        .synthesize(&ctx, &intent, &market, &competitive, &financial)
        .await;
    let second = Synthesizer
        .synthesize(&ctx, &intent, &market, &competitive, &financial)
        .await;

    assert_eq!(first, second);
    let calls = generation.calls_for(SYNTHESIS);
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].user_prompt, calls[1].user_prompt);
}

#[tokio::test]
async fn test_all_agents_failing_still_reaches_synthesis() {
    let generation = Arc::new(
        MockGeneration::happy()
            .on(MARKET, Behavior::Fail("down".into()))
            .on(COMPETITIVE, Behavior::Fail("down".into()))
            .on(FINANCIAL, Behavior::Fail("down".into())),
    );
    let workflow = AnalysisWorkflow::new(context(
        generation.clone(),
        Arc::new(MockLookup::default()),
    ));

    let report = workflow.analyze("a bakery in Mumbai").await.unwrap();

    let AnalysisOutcome::Overall(outcome) = report.outcome else {
        panic!("expected overall outcome");
    };
    assert!(outcome.combined().is_some());
    let synthesis = &generation.calls_for(SYNTHESIS)[0];
    assert_eq!(synthesis.user_prompt.matches("Error: down").count(), 3);
}

#[tokio::test]
async fn test_unstructured_synthesis_passes_raw_text_through() {
    let generation = Arc::new(
        MockGeneration::happy().on(SYNTHESIS, Behavior::Reply("Here is my summary.".into())),
    );
    let ctx = context(generation, Arc::new(MockLookup::default()));
    let market: MarketReport = serde_json::from_str(&market_json()).unwrap();

    let outcome = Synthesizer
        .synthesize(
            &ctx,
            &bakery(),
            &market,
            &CompetitiveReport::failure("x"),
            &FinancialReport::failure("x"),
        )
        .await;

    match outcome {
        SynthesisOutcome::Unstructured { raw_output, cause } => {
            assert_eq!(raw_output, "Here is my summary.");
            assert!(!cause.is_empty());
        }
        other => panic!("expected unstructured outcome, got {:?}", other),
    }
}

#[tokio::test]
async fn test_end_to_end_bakery_in_mumbai() {
    let generation = Arc::new(MockGeneration::happy());
    let lookup = Arc::new(MockLookup::default());
    let workflow = AnalysisWorkflow::new(
        context(generation.clone(), lookup.clone()).with_trend(Arc::new(FixedTrend)),
    );

    let report = workflow
        .analyze("I want to open a bakery in Mumbai")
        .await
        .unwrap();

    assert_eq!(report.intent.business, "Bakery");
    assert_eq!(report.intent.location, "Mumbai");
    let AnalysisOutcome::Overall(SynthesisOutcome::Combined(combined)) = &report.outcome else {
        panic!("expected combined outcome, got {:?}", report.outcome);
    };
    for point in EXECUTIVE_SUMMARY_POINTS {
        assert!(combined.executive_summary.contains(point), "missing {}", point);
    }

    let calls = generation.calls();
    assert_eq!(calls.len(), 5);
    assert_eq!(calls[0].stage, INTENT);
    assert_eq!(calls[0].mode, Mode::Plain);
    assert_eq!(calls[0].temperature, 0.0);
    assert_eq!(calls[0].max_tokens, 200);
    assert_eq!(calls[4].stage, SYNTHESIS);
    assert_eq!(calls[4].mode, Mode::Plain);

    let market = &generation.calls_for(MARKET)[0];
    assert_eq!(market.mode, Mode::Tools);
    assert_eq!(market.tools, vec!["search", "trend"]);
    assert_eq!((market.temperature, market.max_tokens), (0.3, 1500));

    let competitive = &generation.calls_for(COMPETITIVE)[0];
    assert_eq!(competitive.tools, vec!["search"]);
    assert_eq!(competitive.max_tokens, 1800);

    let financial = &generation.calls_for(FINANCIAL)[0];
    assert_eq!((financial.temperature, financial.max_tokens), (0.7, 1500));
    assert_eq!(lookup.queries().len(), 4);
}

#[tokio::test]
async fn test_agent_prompts_carry_schema_and_startup() {
    let generation = Arc::new(MockGeneration::happy());
    let ctx = context(generation.clone(), Arc::new(MockLookup::default()));

    CompetitiveAnalyst.execute(&ctx, &bakery()).await;

    let call = &generation.calls_for(COMPETITIVE)[0];
    for section in CompetitiveReport::sections() {
        assert!(call.system_prompt.contains(&format!("\"{}\"", section.key)));
    }
    assert!(call.system_prompt.contains("Information not available for this section"));
    assert!(call.user_prompt.contains("- Business: Bakery"));
    assert!(call.user_prompt.contains("- Location: Mumbai"));
    assert!(!call.user_prompt.contains("## Research Material"));
}

#[tokio::test]
async fn test_hanging_agent_is_contained_by_timeout() {
    let generation = Arc::new(MockGeneration::happy().on(MARKET, Behavior::Hang));
    let workflow = AnalysisWorkflow::new(context(
        generation.clone(),
        Arc::new(MockLookup::default()),
    ));

    let report = tokio::time::timeout(
        Duration::from_secs(10),
        workflow.run_with_timeout(
            "a bakery in Mumbai",
            AnalysisKind::Overall,
            Duration::from_millis(200),
        ),
    )
    .await
    .expect("workflow must finish despite the hanging agent")
    .unwrap();

    assert!(matches!(report.outcome, AnalysisOutcome::Overall(SynthesisOutcome::Combined(_))));
    let synthesis = &generation.calls_for(SYNTHESIS)[0];
    assert!(synthesis.user_prompt.contains("\"market_overview\": \"Error: timed out"));
    assert!(synthesis.user_prompt.contains("Theobroma, Birdsong."));
}

#[tokio::test]
async fn test_financial_battery_folds_results_and_skips_failures() {
    let generation = Arc::new(MockGeneration::happy());
    let lookup = Arc::new(MockLookup::failing_on(vec!["funding options"]));
    let ctx = context(generation.clone(), lookup.clone());

    let report = FinancialAnalyst.execute(&ctx, &bakery()).await;

    assert_eq!(report.startup_costs, "INR 25-40 lakh.");
    assert_eq!(lookup.queries().len(), 4);

    let prompt = &generation.calls_for(FINANCIAL)[0].user_prompt;
    assert!(prompt.contains("## Research Material"));
    assert_eq!(prompt.matches("--- Search Results for '").count(), 3);
    assert!(prompt.contains("--- Search Results for 'startup costs for Bakery in Mumbai' ---"));
    assert!(prompt.contains("--- Search Results for 'profit margins for Bakery industry' ---"));
    assert!(!prompt.contains("--- Search Results for 'funding options for Bakery startup' ---"));
}

#[tokio::test]
async fn test_single_kind_selector_runs_only_that_agent() {
    let generation = Arc::new(MockGeneration::happy());
    let lookup = Arc::new(MockLookup::default());
    let workflow = AnalysisWorkflow::new(context(generation.clone(), lookup.clone()));

    let report = workflow
        .run("a bakery in Mumbai", AnalysisKind::Financial)
        .await
        .unwrap();

    assert_eq!(report.outcome.kind(), AnalysisKind::Financial);
    let stages: Vec<_> = generation.calls().into_iter().map(|c| c.stage).collect();
    assert_eq!(stages, vec![INTENT, FINANCIAL]);
}

#[test]
fn test_powerful_tier_for_research_stages() {
    let config = venture_vision::Config::default();
    assert_eq!(config.stages.market.tier, ModelTier::Powerful);
    assert_eq!(config.stages.financial.tier, ModelTier::Efficient);
}

#[tokio::test]
async fn test_market_garbage_degrades_only_the_market_report() {
    let generation = Arc::new(
        MockGeneration::happy().on(MARKET, Behavior::Reply("<<garbage>> not json".into())),
    );
    let ctx = context(generation.clone(), Arc::new(MockLookup::default()));
    let intent = bakery();

    let (market, competitive, financial) = tokio::join!(
        MarketAnalyst.execute(&ctx, &intent),
        CompetitiveAnalyst.execute(&ctx, &intent),
        FinancialAnalyst.execute(&ctx, &intent),
    );

    assert!(market.market_overview.starts_with("Error: "));
    for (section, content) in market.contents().into_iter().skip(1) {
        assert_eq!(content, "", "{} should be empty", section.key);
    }
    let expected: CompetitiveReport = serde_json::from_str(&competitive_json()).unwrap();
    assert_eq!(competitive, expected);
    assert_eq!(financial.startup_costs, "INR 25-40 lakh.");
    assert_eq!(financial.funding_options, "MUDRA loans, angel investors.");
}

#[tokio::test]
async fn test_research_entry_points_keep_every_field() {
    let generation = Arc::new(MockGeneration::happy());
    let ctx = context(generation, Arc::new(MockLookup::default()));

    let market = run_market_analysis(&ctx, "Bakery", "Mumbai", "A cozy bakery").await;
    let competitive = run_competitive_analysis(&ctx, "Bakery", "Mumbai", "A cozy bakery").await;
    let financial = run_financial_analysis(&ctx, "Bakery", "Mumbai", "A cozy bakery").await;

    assert_all_keys_present(&market);
    assert_all_keys_present(&competitive);
    assert_all_keys_present(&financial);
    assert_eq!(market, serde_json::from_str::<MarketReport>(&market_json()).unwrap());
    assert_eq!(
        competitive,
        serde_json::from_str::<CompetitiveReport>(&competitive_json()).unwrap()
    );
    assert_eq!(financial.profit_margins, "15-20% net.");

    let failing = Arc::new(
        MockGeneration::new()
            .on(MARKET, Behavior::Fail("offline".into()))
            .on(COMPETITIVE, Behavior::Fail("offline".into()))
            .on(FINANCIAL, Behavior::Fail("offline".into())),
    );
    let ctx = context(failing, Arc::new(MockLookup::default()));

    let market = run_market_analysis(&ctx, "Bakery", "Mumbai", "A cozy bakery").await;
    let competitive = run_competitive_analysis(&ctx, "Bakery", "Mumbai", "A cozy bakery").await;
    let financial = run_financial_analysis(&ctx, "Bakery", "Mumbai", "A cozy bakery").await;

    assert_all_keys_present(&market);
    assert_all_keys_present(&competitive);
    assert_all_keys_present(&financial);
    assert_eq!(market, MarketReport::failure("offline"));
    assert_eq!(competitive, CompetitiveReport::failure("offline"));
    assert_eq!(financial, FinancialReport::failure("offline"));
}

#[tokio::test]
async fn test_agent_results_do_not_depend_on_execution_order() {
    let ctx = context(
        Arc::new(MockGeneration::happy()),
        Arc::new(MockLookup::default()),
    );
    let intent = bakery();

    let market = MarketAnalyst.execute(&ctx, &intent).await;
    let competitive = CompetitiveAnalyst.execute(&ctx, &intent).await;
    let financial = FinancialAnalyst.execute(&ctx, &intent).await;
    let forward = (market, competitive, financial);

    let financial = FinancialAnalyst.execute(&ctx, &intent).await;
    let competitive = CompetitiveAnalyst.execute(&ctx, &intent).await;
    let market = MarketAnalyst.execute(&ctx, &intent).await;
    let reverse = (market, competitive, financial);

    let concurrent = tokio::join!(
        MarketAnalyst.execute(&ctx, &intent),
        CompetitiveAnalyst.execute(&ctx, &intent),
        FinancialAnalyst.execute(&ctx, &intent),
    );

    assert!(!forward.0.is_failure());
    assert!(!forward.1.is_failure());
    assert!(!forward.2.is_failure());
    assert_eq!(forward, reverse);
    assert_eq!(forward, concurrent);
}
