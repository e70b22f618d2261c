//! Comprehensive tests for domain_appeals

use std::sync::Arc;

use rust_decimal_macros::dec;

use core_kernel::{CoreError, Money, Probability};
use domain_appeals::{
    AppealError, AppealPipeline, AppealRanker, ClaimBatch, Classifier, ErrorKind, FeatureAligner,
    PipelineSettings, ResultAssembler, ScoringEngine,
};
use test_utils::*;

fn signal_pipeline() -> AppealPipeline {
    AppealPipeline::new(
        SchemaFixtures::signal_registry(),
        Arc::new(FeatureEchoClassifier::signal()),
        PipelineSettings::default(),
    )
    .expect("valid pipeline")
}

fn constant_pipeline(p: f64) -> AppealPipeline {
    AppealPipeline::new(
        SchemaFixtures::training_registry(),
        Arc::new(ConstantClassifier(p)),
        PipelineSettings::default(),
    )
    .expect("valid pipeline")
}

fn default_fields() -> Vec<String> {
    PipelineSettings::default().categorical_fields
}

// ============================================================================
// Feature Aligner Tests
// ============================================================================

mod feature_aligner_tests {
    use super::*;

    fn aligner() -> FeatureAligner {
        FeatureAligner::new(SchemaFixtures::training_registry(), &default_fields())
    }

    #[test]
    fn test_vectors_match_registry_width_and_order() {
        let batch = ClaimBatchBuilder::new().add_default_claims(4).build();
        let vectors = aligner().align(&batch).unwrap();

        assert_eq!(vectors.len(), 4);
        assert_vectors_match_registry(&vectors, &SchemaFixtures::training_registry());
    }

    #[test]
    fn test_indicator_lands_on_registry_position() {
        let registry = SchemaFixtures::training_registry();
        let batch = ClaimBatchBuilder::new()
            .add(
                ClaimRecordBuilder::new()
                    .with_procedure_code("70553")
                    .with_denial_reason("Out of network")
                    .with_provider_specialty("Radiology")
                    .with_field("patient_age", "52")
                    .build(),
            )
            .build();

        let vector = &aligner().align(&batch).unwrap()[0];

        let hot: Vec<&str> = registry
            .columns()
            .iter()
            .zip(vector.values())
            .filter(|(name, v)| **v == 1.0 && !NUMERIC_COLUMNS.contains(&name.as_str()))
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(
            hot,
            vec![
                "procedure_code_70553",
                "denial_reason_Out of network",
                "provider_specialty_Radiology"
            ]
        );
        assert_eq!(vector.get(registry.position("patient_age").unwrap()), Some(52.0));
        assert_eq!(vector.get(registry.position("billed_amount").unwrap()), Some(1500.0));
    }

    #[test]
    fn test_unknown_procedure_code_is_dropped_without_error() {
        let batch = ClaimBatchBuilder::new()
            .add(ClaimRecordBuilder::new().with_procedure_code("00000").build())
            .build();

        let vector = &aligner().align(&batch).unwrap()[0];
        let registry = SchemaFixtures::training_registry();
        let procedure_hot = registry
            .columns()
            .iter()
            .zip(vector.values())
            .filter(|(name, v)| name.starts_with("procedure_code_") && **v != 0.0)
            .count();

        assert_eq!(vector.len(), registry.len());
        assert_eq!(procedure_hot, 0);
    }

    #[test]
    fn test_blank_category_is_missing_not_an_error() {
        let batch = ClaimBatchBuilder::new()
            .add(ClaimRecordBuilder::new().with_denial_reason("  ").build())
            .build();

        let vector = &aligner().align(&batch).unwrap()[0];
        let registry = SchemaFixtures::training_registry();
        let denial_hot = registry
            .columns()
            .iter()
            .zip(vector.values())
            .filter(|(name, v)| name.starts_with("denial_reason_") && **v != 0.0)
            .count();
        assert_eq!(denial_hot, 0);
    }

    #[test]
    fn test_single_record_batch_encodes_like_larger_batch() {
        let target = ClaimRecordBuilder::new()
            .with_claim_id("CLM00042")
            .with_procedure_code("45378")
            .with_denial_reason("Incorrect coding")
            .build();
        let other = ClaimRecordBuilder::new()
            .with_claim_id("CLM00043")
            .with_procedure_code("99215")
            .with_denial_reason("Missing documentation")
            .build();

        let alone = aligner()
            .align(&ClaimBatchBuilder::new().add(target.clone()).build())
            .unwrap();
        let together = aligner()
            .align(&ClaimBatchBuilder::new().add(other).add(target).build())
            .unwrap();

        assert_eq!(alone[0], together[1]);
    }

    #[test]
    fn test_numeric_text_is_malformed_input() {
        let batch = ClaimBatchBuilder::new()
            .add(
                ClaimRecordBuilder::new()
                    .with_claim_id("CLM00077")
                    .with_field("days_since_denial", "soon")
                    .build(),
            )
            .build();

        let err = aligner().align(&batch).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.to_string().contains("CLM00077"));
        assert!(err.to_string().contains("days_since_denial"));
    }

    #[test]
    fn test_first_malformed_record_in_input_order_is_reported() {
        let batch = ClaimBatchBuilder::new()
            .add_default_claims(3)
            .add(
                ClaimRecordBuilder::new()
                    .with_claim_id("CLM00010")
                    .with_field("patient_age", "x")
                    .build(),
            )
            .add(
                ClaimRecordBuilder::new()
                    .with_claim_id("CLM00011")
                    .with_field("patient_age", "y")
                    .build(),
            )
            .build();

        for _ in 0..5 {
            let err = aligner().align(&batch).unwrap_err();
            assert!(err.to_string().contains("CLM00010"));
        }
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        let err = aligner().align(&ClaimBatch::from_records(vec![])).unwrap_err();
        assert!(err.is_caller_error());
    }
}

// ============================================================================
// Scoring Engine Tests
// ============================================================================

mod scoring_engine_tests {
    use super::*;

    #[test]
    fn test_recovery_is_billed_times_probability() {
        let batch = BatchFixtures::three_claim_scenario();
        let aligner = FeatureAligner::new(SchemaFixtures::signal_registry(), &default_fields());
        let vectors = aligner.align(&batch).unwrap();
        let engine = ScoringEngine::new(Arc::new(FeatureEchoClassifier::signal()));

        let scored = engine.score(&batch, &vectors).unwrap();

        let recoveries: Vec<_> = scored
            .claims()
            .iter()
            .map(|c| c.predicted_recovery().amount())
            .collect();
        assert_eq!(recoveries, vec![dec!(800), dec!(600), dec!(900)]);
        assert_eq!(scored.claims()[1].position(), 1);
    }

    #[test]
    fn test_recovery_is_not_rounded_internally() {
        let batch = BatchFixtures::from_signals(&[(dec!(100.01), 0.3333)]);
        let aligner = FeatureAligner::new(SchemaFixtures::signal_registry(), &default_fields());
        let vectors = aligner.align(&batch).unwrap();
        let engine = ScoringEngine::new(Arc::new(FeatureEchoClassifier::signal()));

        let scored = engine.score(&batch, &vectors).unwrap();

        assert_eq!(scored.claims()[0].predicted_recovery().amount(), dec!(33.333333));
    }

    #[test]
    fn test_probability_out_of_range_fails_batch() {
        let batch = ClaimBatchBuilder::new().add_default_claims(2).build();
        let aligner = FeatureAligner::new(SchemaFixtures::training_registry(), &default_fields());
        let vectors = aligner.align(&batch).unwrap();
        let engine = ScoringEngine::new(Arc::new(ConstantClassifier(1.5)));

        let err = engine.score(&batch, &vectors).unwrap_err();
        assert!(matches!(err, AppealError::Classifier(_)));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_out_of_range_probability_names_claim() {
        let batch = ClaimBatchBuilder::new().add_default_claims(1).build();
        let aligner = FeatureAligner::new(SchemaFixtures::training_registry(), &default_fields());
        let vectors = aligner.align(&batch).unwrap();

        let err = ScoringEngine::new(Arc::new(ConstantClassifier(-0.1)))
            .score(&batch, &vectors)
            .unwrap_err();

        assert!(err.to_string().contains("claim 'CLM00001'"));
        assert!(err.to_string().contains("within [0, 1]"));
    }

    #[test]
    fn test_kernel_errors_map_to_appeal_kinds() {
        let money: AppealError = CoreError::from(Money::parse_non_negative("-5").unwrap_err()).into();
        assert_eq!(money.kind(), ErrorKind::MalformedInput);

        let probability: AppealError = CoreError::from(Probability::new(f64::NAN).unwrap_err()).into();
        assert!(matches!(probability, AppealError::Classifier(_)));

        let config: AppealError = CoreError::configuration("threshold").into();
        assert_eq!(config.kind(), ErrorKind::Configuration);

        let validation = AppealError::from_kernel("batch", CoreError::validation("no rows"));
        assert_eq!(validation.to_string(), "Malformed input: batch: no rows");
    }

    #[test]
    fn test_classifier_failure_fails_batch() {
        let batch = ClaimBatchBuilder::new().add_default_claims(3).build();
        let aligner = FeatureAligner::new(SchemaFixtures::training_registry(), &default_fields());
        let vectors = aligner.align(&batch).unwrap();
        let engine = ScoringEngine::new(Arc::new(FailingClassifier("model offline".into())));

        let err = engine.score(&batch, &vectors).unwrap_err();
        assert!(err.to_string().contains("model offline"));
        assert!(!err.is_caller_error());
    }

    #[test]
    fn test_vector_count_mismatch_is_internal() {
        let batch = ClaimBatchBuilder::new().add_default_claims(2).build();
        let engine = ScoringEngine::new(Arc::new(ConstantClassifier(0.7)));

        let err = engine.score(&batch, &[]).unwrap_err();
        assert!(matches!(err, AppealError::Internal(_)));
    }

    #[test]
    fn test_scoring_leaves_vectors_untouched() {
        let batch = ClaimBatchBuilder::new().add_default_claims(2).build();
        let aligner = FeatureAligner::new(SchemaFixtures::training_registry(), &default_fields());
        let vectors = aligner.align(&batch).unwrap();
        let before = vectors.clone();

        ScoringEngine::new(Arc::new(ConstantClassifier(0.9)))
            .score(&batch, &vectors)
            .unwrap();

        assert_eq!(vectors, before);
    }
}

// ============================================================================
// Appeal Ranker Tests
// ============================================================================

mod appeal_ranker_tests {
    use super::*;

    fn rank_ids(
        signals: &[(rust_decimal::Decimal, f64)],
        ranker: AppealRanker,
    ) -> (Vec<String>, Vec<String>) {
        let batch = BatchFixtures::from_signals(signals);
        let aligner = FeatureAligner::new(SchemaFixtures::signal_registry(), &default_fields());
        let vectors = aligner.align(&batch).unwrap();
        let scored = ScoringEngine::new(Arc::new(FeatureEchoClassifier::signal()))
            .score(&batch, &vectors)
            .unwrap();
        let ranking = ranker.rank(&scored);
        let all = ranking
            .recommended()
            .iter()
            .map(|c| c.record().claim_id().to_string())
            .collect();
        let top = ranking
            .top()
            .iter()
            .map(|c| c.record().claim_id().to_string())
            .collect();
        (all, top)
    }

    #[test]
    fn test_exactly_half_is_not_recommended() {
        let (all, _) = rank_ids(&[(dec!(1000), 0.5), (dec!(1000), 0.5001)], AppealRanker::default());
        assert_eq!(all, vec!["CLM00002"]);
    }

    #[test]
    fn test_orders_by_recovery_descending() {
        let (all, _) = rank_ids(
            &[(dec!(1000), 0.8), (dec!(2000), 0.3), (dec!(1500), 0.6)],
            AppealRanker::default(),
        );
        assert_eq!(all, vec!["CLM00003", "CLM00001"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let (all, _) = rank_ids(
            &[
                (dec!(1000), 0.9),
                (dec!(5000), 0.9),
                (dec!(1000), 0.9),
                (dec!(900), 1.0),
            ],
            AppealRanker::default(),
        );
        assert_eq!(all, vec!["CLM00002", "CLM00001", "CLM00003", "CLM00004"]);
    }

    #[test]
    fn test_top_view_truncates_to_k() {
        let signals: Vec<_> = (1..=7)
            .map(|i| (rust_decimal::Decimal::from(i * 100), 0.9))
            .collect();
        let (all, top) = rank_ids(&signals, AppealRanker::default());

        assert_eq!(all.len(), 7);
        assert_eq!(top, vec!["CLM00007", "CLM00006", "CLM00005", "CLM00004", "CLM00003"]);
    }

    #[test]
    fn test_top_view_shorter_than_k_is_fine() {
        let (all, top) = rank_ids(&[(dec!(10), 0.9), (dec!(20), 0.1)], AppealRanker::default());
        assert_eq!(all, top);
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn test_custom_threshold_and_k() {
        let (all, top) = rank_ids(
            &[(dec!(100), 0.75), (dec!(200), 0.7), (dec!(300), 0.71)],
            AppealRanker::new(0.7, 1),
        );
        assert_eq!(all, vec!["CLM00003", "CLM00001"]);
        assert_eq!(top, vec!["CLM00003"]);
    }
}

// ============================================================================
// Result Assembler Tests
// ============================================================================

mod result_assembler_tests {
    use super::*;

    #[test]
    fn test_empty_recommendation_set_degrades_to_zero() {
        let summary = constant_pipeline(0.2)
            .evaluate(&ClaimBatchBuilder::new().add_default_claims(3).build())
            .unwrap();

        assert_eq!(summary.total_claims, 3);
        assert_eq!(summary.recommended_appeals, 0);
        assert_eq!(summary.total_estimated_recovery, dec!(0));
        assert_eq!(summary.avg_success_probability, dec!(0));
        assert!(summary.top_5_appeals.is_empty());
    }

    #[test]
    fn test_totals_cover_all_recommended_not_just_top_five() {
        let summary = signal_pipeline()
            .evaluate(&BatchFixtures::from_signals(&[
                (dec!(100), 0.55),
                (dec!(200), 0.6),
                (dec!(300), 0.65),
                (dec!(400), 0.7),
                (dec!(500), 0.75),
                (dec!(600), 0.8),
                (dec!(700), 0.85),
            ]))
            .unwrap();

        assert_eq!(summary.recommended_appeals, 7);
        assert_eq!(summary.top_5_appeals.len(), 5);
        assert_eq!(summary.total_estimated_recovery, dec!(2100.00));
        assert_eq!(summary.avg_success_probability, dec!(0.7));
    }

    #[test]
    fn test_rounding_happens_at_output_only() {
        let summary = signal_pipeline()
            .evaluate(&BatchFixtures::from_signals(&[
                (dec!(100.01), 0.66666),
                (dec!(100.01), 0.77777),
            ]))
            .unwrap();

        // Exact recoveries 66.6726666 and 77.7847777 sum to 144.4574443.
        assert_eq!(summary.total_estimated_recovery, dec!(144.46));
        assert_eq!(summary.top_5_appeals[0].predicted_recovery, dec!(77.78));
        assert_eq!(summary.top_5_appeals[1].predicted_recovery, dec!(66.67));
        assert_eq!(summary.top_5_appeals[0].success_probability, dec!(0.7778));
        assert_eq!(summary.avg_success_probability, dec!(0.7222));
        assert_summary_rounding(&summary);
    }

    #[test]
    fn test_near_tie_probabilities_round_like_their_binary_value() {
        let batch = ClaimBatchBuilder::new()
            .add(ClaimRecordBuilder::new().with_billed_amount(dec!(1500.00)).build())
            .build();

        let summary = constant_pipeline(0.51235).evaluate(&batch).unwrap();

        assert_eq!(summary.recommended_appeals, 1);
        assert_eq!(summary.top_5_appeals[0].success_probability, dec!(0.5123));
        assert_eq!(summary.avg_success_probability, dec!(0.5123));
    }

    #[test]
    fn test_recovery_total_overflow_is_caller_error() {
        let huge = dec!(50000000000000000000000000000);
        let batch = ClaimBatchBuilder::new()
            .add(ClaimRecordBuilder::new().with_claim_id("CLM1").with_billed_amount(huge).build())
            .add(ClaimRecordBuilder::new().with_claim_id("CLM2").with_billed_amount(huge).build())
            .build();

        let err = constant_pipeline(0.9).evaluate(&batch).unwrap_err();

        assert!(err.is_caller_error());
        assert!(err.to_string().contains("total estimated recovery"));
    }

    #[test]
    fn test_assembler_is_reusable() {
        let assembler = ResultAssembler::new();
        let batch = BatchFixtures::three_claim_scenario();
        let aligner = FeatureAligner::new(SchemaFixtures::signal_registry(), &default_fields());
        let vectors = aligner.align(&batch).unwrap();
        let scored = ScoringEngine::new(Arc::new(FeatureEchoClassifier::signal()))
            .score(&batch, &vectors)
            .unwrap();
        let ranking = AppealRanker::default().rank(&scored);

        let first = assembler.assemble(&scored, &ranking).unwrap();
        let second = assembler.assemble(&scored, &ranking).unwrap();
        assert_eq!(first, second);
    }
}

// ============================================================================
// Pipeline Tests
// ============================================================================

mod pipeline_tests {
    use super::*;

    #[test]
    fn test_three_claim_scenario() {
        let summary = signal_pipeline()
            .evaluate(&BatchFixtures::three_claim_scenario())
            .unwrap();

        assert_eq!(summary.total_claims, 3);
        assert_eq!(summary.recommended_appeals, 2);
        assert_eq!(summary.total_estimated_recovery, dec!(1700.00));
        assert_eq!(summary.avg_success_probability, dec!(0.7000));
        assert_top_claim_ids(&summary, &["CLM00003", "CLM00001"]);
        assert_eq!(summary.top_5_appeals[0].predicted_recovery, dec!(900.00));
        assert_eq!(summary.top_5_appeals[1].predicted_recovery, dec!(800.00));
        assert_eq!(summary.top_5_appeals[0].billed_amount, dec!(1500));
        assert_eq!(summary.top_5_appeals[0].success_probability, dec!(0.6));
    }

    #[test]
    fn test_summary_serializes_to_output_contract() {
        let summary = signal_pipeline()
            .evaluate(&BatchFixtures::three_claim_scenario())
            .unwrap();

        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["total_claims"], 3);
        assert_eq!(json["recommended_appeals"], 2);
        assert_eq!(json["total_estimated_recovery"].as_f64(), Some(1700.0));
        assert_eq!(json["avg_success_probability"].as_f64(), Some(0.7));
        let top = json["top_5_appeals"].as_array().unwrap();
        assert_eq!(top[0]["claim_id"], "CLM00003");
        assert_eq!(top[0]["billed_amount"].as_f64(), Some(1500.0));
        assert_eq!(top[0]["success_probability"].as_f64(), Some(0.6));
        assert_eq!(top[0]["predicted_recovery"].as_f64(), Some(900.0));
    }

    #[test]
    fn test_identical_batches_give_byte_identical_output() {
        let pipeline = signal_pipeline();
        let batch = BatchFixtures::three_claim_scenario();

        let first = serde_json::to_string(&pipeline.evaluate(&batch).unwrap()).unwrap();
        let second = serde_json::to_string(&pipeline.evaluate(&batch).unwrap()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_batch_is_malformed_input() {
        let err = signal_pipeline()
            .evaluate(&ClaimBatch::from_records(vec![]))
            .unwrap_err();

        assert!(matches!(err, AppealError::MalformedInput(_)));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_absent_categorical_column_is_malformed_input() {
        let batch = ClaimBatchBuilder::new()
            .add(ClaimRecordBuilder::new().build())
            .with_columns(["claim_id", "billed_amount", "procedure_code", "provider_specialty"])
            .build();

        let err = constant_pipeline(0.9).evaluate(&batch).unwrap_err();
        assert!(err.is_caller_error());
        assert!(err.to_string().contains("denial_reason"));
    }

    #[test]
    fn test_duplicate_claim_ids_are_malformed_input() {
        let batch = ClaimBatchBuilder::new()
            .add(ClaimRecordBuilder::new().with_claim_id("CLM00001").build())
            .add(ClaimRecordBuilder::new().with_claim_id("CLM00001").build())
            .build();

        let err = constant_pipeline(0.9).evaluate(&batch).unwrap_err();
        assert!(err.to_string().contains("duplicate claim_id 'CLM00001'"));
    }

    #[test]
    fn test_unknown_category_scores_normally() {
        let batch = ClaimBatchBuilder::new()
            .add(ClaimRecordBuilder::new().with_procedure_code("12345").build())
            .build();

        let summary = constant_pipeline(0.9).evaluate(&batch).unwrap();
        assert_eq!(summary.recommended_appeals, 1);
        assert_eq!(summary.total_estimated_recovery, dec!(1350.00));
    }

    #[test]
    fn test_classifier_width_mismatch_is_schema_unavailable() {
        let err = AppealPipeline::new(
            SchemaFixtures::training_registry(),
            Arc::new(FixedWidthClassifier(3)),
            PipelineSettings::default(),
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::SchemaUnavailable);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = PipelineSettings {
            top_k: 0,
            ..PipelineSettings::default()
        };
        let err = AppealPipeline::new(
            SchemaFixtures::training_registry(),
            Arc::new(ConstantClassifier(0.5)),
            settings,
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_pipeline_is_shareable_across_threads() {
        let pipeline = Arc::new(signal_pipeline());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pipeline = Arc::clone(&pipeline);
                std::thread::spawn(move || {
                    pipeline
                        .evaluate(&BatchFixtures::three_claim_scenario())
                        .unwrap()
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_default_batch_classifier_matches_per_record() {
        let classifier = FeatureEchoClassifier::signal();
        let batch = BatchFixtures::three_claim_scenario();
        let aligner = FeatureAligner::new(SchemaFixtures::signal_registry(), &default_fields());
        let vectors = aligner.align(&batch).unwrap();

        let batched = classifier.predict_batch(&vectors).unwrap();
        let single: Vec<f64> = vectors
            .iter()
            .map(|v| classifier.predict_probability(v).unwrap())
            .collect();

        assert_eq!(batched, single);
        assert_eq!(batched, vec![0.8, 0.3, 0.6]);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn vectors_always_match_registry(batch in signal_batch_strategy(25)) {
            let registry = SchemaFixtures::signal_registry();
            let aligner = FeatureAligner::new(Arc::clone(&registry), &default_fields());
            let vectors = aligner.align(&batch).unwrap();

            prop_assert_eq!(vectors.len(), batch.len());
            for vector in &vectors {
                prop_assert_eq!(vector.len(), registry.len());
            }
        }

        #[test]
        fn recommendation_threshold_is_strict(batch in signal_batch_strategy(25)) {
            let expected = batch
                .records()
                .iter()
                .filter(|r| r.numeric(SIGNAL_COLUMN).unwrap().unwrap() > 0.5)
                .count();

            let summary = signal_pipeline().evaluate(&batch).unwrap();

            prop_assert_eq!(summary.recommended_appeals, expected);
            prop_assert!(summary.top_5_appeals.len() <= 5);
            prop_assert!(summary.top_5_appeals.iter().all(|a| a.success_probability > dec!(0.5)));
        }

        #[test]
        fn ranking_is_descending_with_stable_ties(batch in signal_batch_strategy(25)) {
            let aligner = FeatureAligner::new(SchemaFixtures::signal_registry(), &default_fields());
            let vectors = aligner.align(&batch).unwrap();
            let scored = ScoringEngine::new(Arc::new(FeatureEchoClassifier::signal()))
                .score(&batch, &vectors)
                .unwrap();
            let ranking = AppealRanker::default().rank(&scored);

            for pair in ranking.recommended().windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(a.predicted_recovery() >= b.predicted_recovery());
                if a.predicted_recovery() == b.predicted_recovery() {
                    prop_assert!(a.position() < b.position());
                }
            }
        }

        #[test]
        fn top_appeals_are_sorted_and_rounded(batch in signal_batch_strategy(25)) {
            let summary = signal_pipeline().evaluate(&batch).unwrap();
            assert_top_appeals_sorted(&summary);
            assert_summary_rounding(&summary);
        }

        #[test]
        fn average_is_zero_when_nothing_recommended(
            batch in signal_batch_strategy(10),
            p in 0u32..=5000u32,
        ) {
            let summary = constant_pipeline(p as f64 / 10_000.0).evaluate(&batch).unwrap();

            prop_assert_eq!(summary.recommended_appeals, 0);
            prop_assert_eq!(summary.avg_success_probability, dec!(0));
            prop_assert_eq!(summary.total_estimated_recovery, dec!(0));
        }

        #[test]
        fn evaluation_is_deterministic(batch in signal_batch_strategy(15)) {
            let pipeline = signal_pipeline();
            let first = serde_json::to_string(&pipeline.evaluate(&batch).unwrap()).unwrap();
            let second = serde_json::to_string(&pipeline.evaluate(&batch).unwrap()).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
