use super::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::embedding::{EmbeddingError, MiniLmConfig, MiniLmEmbedder};
use crate::questions::QuestionStore;
use tempfile::TempDir;

/// Embedder returning preset vectors keyed by (normalized) text,
/// counting every call.
struct TableEmbedder {
    table: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
}

impl TableEmbedder {
    fn new(entries: &[(&str, &[f32])]) -> Self {
        Self {
            table: entries
                .iter()
                .map(|(text, vector)| (text.to_string(), vector.to_vec()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl crate::embedding::TextEmbedder for TableEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.table
            .get(text)
            .cloned()
            .ok_or_else(|| EmbeddingError::InferenceFailed {
                reason: format!("no vector registered for {text:?}"),
            })
    }

    fn embedding_dim(&self) -> usize {
        2
    }
}

fn stub_evaluator() -> AnswerEvaluator<MiniLmEmbedder> {
    AnswerEvaluator::new(MiniLmEmbedder::load(MiniLmConfig::stub()).expect("load stub"))
}

fn store_with(contents: &str) -> (QuestionStore, TempDir) {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("questions.json");
    std::fs::write(&path, contents).expect("write questions");
    (QuestionStore::new(path), temp_dir)
}

mod normalize_tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize("Machine Learning"), "machine learning");
    }

    #[test]
    fn test_normalize_trims_and_collapses_whitespace() {
        assert_eq!(normalize("  hello   world  "), "hello world");
        assert_eq!(normalize("a\t\tb\n\nc"), "a b c");
        assert_eq!(normalize("one\r\ntwo"), "one two");
    }

    #[test]
    fn test_normalize_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n  "), "");
    }

    #[test]
    fn test_normalize_already_normal() {
        assert_eq!(normalize("already normal text"), "already normal text");
    }

    #[test]
    fn test_normalize_idempotent() {
        let inputs = [
            "  Mixed   CASE\twith\nwhitespace  ",
            "simple",
            "",
            "Ünïcode   Whitespace\u{a0}test",
            "a  b   c    d",
        ];

        for input in inputs {
            let once = normalize(input);
            let twice = normalize(&once);
            assert_eq!(once, twice, "normalize should be idempotent for {input:?}");
        }
    }
}

mod cosine_tests {
    use super::*;

    #[test]
    fn test_cosine_identical_vectors() {
        let v = [0.6, 0.8];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_opposite_vectors() {
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_scale_invariant() {
        let sim = cosine_similarity(&[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0]);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_mismatched_lengths() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_cosine_empty_vectors() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_cosine_zero_norm() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_cosine_clamped_to_valid_range() {
        // Large same-direction vectors can overshoot 1.0 in f32.
        let a = vec![1e10f32; 8];
        let sim = cosine_similarity(&a, &a);
        assert!(sim <= 1.0);
        assert!(sim >= -1.0);
    }
}

mod evaluate_tests {
    use super::*;

    #[test]
    fn test_identical_text_scores_one_and_passes() {
        let evaluator = stub_evaluator();
        let text = "Machine Learning is a subset of Artificial Intelligence.";

        let result = evaluator
            .evaluate(text, text, DEFAULT_PASS_THRESHOLD)
            .expect("evaluate");

        assert!((result.similarity_score - 1.0).abs() < 1e-6);
        assert!((result.similarity_percentage - 100.0).abs() < 1e-6);
        assert_eq!(result.status, EvaluationStatus::Pass);
        assert!(result.question_id.is_none());
    }

    #[test]
    fn test_normalization_makes_case_and_spacing_irrelevant() {
        let evaluator = stub_evaluator();

        let result = evaluator
            .evaluate(
                "The Sky is   Blue.",
                "  the sky\tis blue. ",
                DEFAULT_PASS_THRESHOLD,
            )
            .expect("evaluate");

        assert!((result.similarity_score - 1.0).abs() < 1e-6);
        assert_eq!(result.status, EvaluationStatus::Pass);
    }

    #[test]
    fn test_disjoint_text_fails() {
        let evaluator = stub_evaluator();

        let result = evaluator
            .evaluate("The sky is blue.", "Bananas were yellow.", DEFAULT_PASS_THRESHOLD)
            .expect("evaluate");

        assert!(result.similarity_score < DEFAULT_PASS_THRESHOLD);
        assert_eq!(result.status, EvaluationStatus::Fail);
    }

    #[test]
    fn test_status_matches_threshold_comparison() {
        let evaluator = stub_evaluator();
        let pairs = [
            ("the cat sat on the mat", "the cat sat on the mat"),
            ("the cat sat on the mat", "a cat sat on a mat"),
            ("the cat sat on the mat", "quantum physics explains waves"),
        ];

        for threshold in [0.0, 0.25, 0.5, 0.70, 0.99, 1.0] {
            for (reference, candidate) in pairs {
                let result = evaluator
                    .evaluate(reference, candidate, threshold)
                    .expect("evaluate");

                assert_eq!(
                    result.status.is_pass(),
                    result.similarity_score >= threshold,
                    "status must be PASS iff score >= threshold \
                     (score={}, threshold={})",
                    result.similarity_score,
                    threshold
                );
            }
        }
    }

    #[test]
    fn test_score_exactly_at_threshold_passes() {
        // cos([1,0], [0.6,0.8]) = 0.6 exactly
        let embedder = TableEmbedder::new(&[("reference", &[1.0, 0.0]), ("candidate", &[0.6, 0.8])]);
        let evaluator = AnswerEvaluator::new(&embedder);

        let result = evaluator.evaluate("reference", "candidate", 0.6).expect("evaluate");
        assert_eq!(result.similarity_score, 0.6);
        assert_eq!(result.status, EvaluationStatus::Pass);

        let result = evaluator.evaluate("reference", "candidate", 0.601).expect("evaluate");
        assert_eq!(result.status, EvaluationStatus::Fail);
    }

    #[test]
    fn test_rounding_to_four_and_two_decimals() {
        // cos([1,0], [2,1]/|[2,1]|) = 2/sqrt(5) = 0.8944271...
        let embedder = TableEmbedder::new(&[("reference", &[1.0, 0.0]), ("candidate", &[2.0, 1.0])]);
        let evaluator = AnswerEvaluator::new(&embedder);

        let result = evaluator
            .evaluate("reference", "candidate", DEFAULT_PASS_THRESHOLD)
            .expect("evaluate");

        assert_eq!(result.similarity_score, 0.8944);
        assert_eq!(result.similarity_percentage, 89.44);
    }

    #[test]
    fn test_percentage_follows_score() {
        let evaluator = stub_evaluator();

        let result = evaluator
            .evaluate("the sky is blue", "the sky is very blue", 0.5)
            .expect("evaluate");

        let expected = (result.similarity_score * 100.0 * 100.0).round() / 100.0;
        assert!(
            (result.similarity_percentage - expected).abs() < 0.011,
            "percentage {} should track score {}",
            result.similarity_percentage,
            result.similarity_score
        );
    }

    #[test]
    fn test_out_of_range_threshold_is_degenerate_not_an_error() {
        let evaluator = stub_evaluator();

        // Above 1: even identical text fails.
        let result = evaluator.evaluate("same text", "same text", 1.5).expect("evaluate");
        assert_eq!(result.status, EvaluationStatus::Fail);

        // Below 0: even disjoint text passes.
        let result = evaluator
            .evaluate("alpha beta", "gamma delta", -0.5)
            .expect("evaluate");
        assert_eq!(result.status, EvaluationStatus::Pass);
    }

    #[test]
    fn test_embedding_failure_propagates() {
        let embedder = TableEmbedder::new(&[]);
        let evaluator = AnswerEvaluator::new(&embedder);

        let result = evaluator.evaluate("anything", "at all", DEFAULT_PASS_THRESHOLD);
        assert!(matches!(
            result.unwrap_err(),
            EvaluatorError::Embedding(EmbeddingError::InferenceFailed { .. })
        ));
    }
}

mod evaluate_by_id_tests {
    use super::*;

    #[test]
    fn test_resolves_reference_answer_from_store() {
        let (store, _dir) = store_with(
            r#"{"questions": [
                {"id": 1, "question": "What is ML?", "model_answer": "Systems learn from data."}
            ]}"#,
        );
        let evaluator = stub_evaluator();

        let result = evaluator
            .evaluate_by_id(&store, 1, "systems learn from data.", DEFAULT_PASS_THRESHOLD)
            .expect("evaluate");

        assert_eq!(result.evaluation.question_id, Some(1));
        assert_eq!(result.question_text, "What is ML?");
        assert_eq!(result.model_answer, "Systems learn from data.");
        assert!((result.evaluation.similarity_score - 1.0).abs() < 1e-6);
        assert_eq!(result.evaluation.status, EvaluationStatus::Pass);
    }

    #[test]
    fn test_unknown_id_fails_with_not_found() {
        let (store, _dir) = store_with(r#"{"questions": []}"#);
        let evaluator = stub_evaluator();

        let result = evaluator.evaluate_by_id(&store, 999, "an answer", DEFAULT_PASS_THRESHOLD);
        assert!(matches!(
            result.unwrap_err(),
            EvaluatorError::QuestionNotFound { id: 999 }
        ));
    }

    #[test]
    fn test_unknown_id_performs_no_embedding() {
        let (store, _dir) = store_with(r#"{"questions": []}"#);
        let embedder = TableEmbedder::new(&[]);
        let evaluator = AnswerEvaluator::new(&embedder);

        let result = evaluator.evaluate_by_id(&store, 7, "an answer", DEFAULT_PASS_THRESHOLD);
        assert!(result.is_err());
        assert_eq!(embedder.call_count(), 0, "lookup failure must precede embedding");
    }
}

mod wire_format_tests {
    use super::*;

    #[test]
    fn test_evaluation_serializes_status_uppercase() {
        let evaluation = Evaluation {
            similarity_score: 0.8944,
            similarity_percentage: 89.44,
            status: EvaluationStatus::Pass,
            question_id: None,
        };

        let json = serde_json::to_value(&evaluation).expect("serialize");
        assert_eq!(json["status"], "PASS");
        assert_eq!(json["similarity_score"], 0.8944);
        assert_eq!(json["similarity_percentage"], 89.44);
        assert!(json["question_id"].is_null());

        let evaluation = Evaluation {
            status: EvaluationStatus::Fail,
            question_id: Some(3),
            ..evaluation
        };
        let json = serde_json::to_value(&evaluation).expect("serialize");
        assert_eq!(json["status"], "FAIL");
        assert_eq!(json["question_id"], 3);
    }

    #[test]
    fn test_question_evaluation_flattens_evaluation() {
        let evaluation = Evaluation {
            similarity_score: 1.0,
            similarity_percentage: 100.0,
            status: EvaluationStatus::Pass,
            question_id: Some(1),
        };
        let resolved = QuestionEvaluation {
            evaluation,
            question_text: "What is ML?".to_string(),
            model_answer: "A subset of AI.".to_string(),
        };

        let json = serde_json::to_value(&resolved).expect("serialize");
        assert_eq!(json["similarity_score"], 1.0);
        assert_eq!(json["status"], "PASS");
        assert_eq!(json["question_id"], 1);
        assert_eq!(json["question_text"], "What is ML?");
        assert_eq!(json["model_answer"], "A subset of AI.");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(EvaluationStatus::Pass.to_string(), "PASS");
        assert_eq!(EvaluationStatus::Fail.to_string(), "FAIL");
    }
}
