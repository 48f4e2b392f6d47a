use PaperBlaster::config::NormalizationParams;
use PaperBlaster::pipeline::normalize::transforms;
use PaperBlaster::pipeline::normalize::{FnTransform, Normalizer, TextTransform};

#[test]
fn test_chain_order() {
    let normalizer = Normalizer::default();
    assert_eq!(
        normalizer.step_names(),
        vec![
            "substitutions",
            "one_char_per_line",
            "normalize_characters",
            "lower",
            "useless_characters",
            "multiple_dots",
            "list_enum",
            "digits",
            "short_tokens",
            "multiple_spaces",
        ]
    );
}

#[test]
fn test_full_chain_on_extracted_page() {
    let raw = "A\nb\ns\nt\nr\na\nc\nt\n\
               The ﬁrst Section of this Paper…\n\
               Contents.............. 12\n\
               • Eﬃcient retrieval (2019) – “robust” results!\n\
               2. Related work, see [14]\n";
    let normalized = Normalizer::default().normalize(raw);

    assert_eq!(
        normalized,
        "abstract the first section this paper contents efficient retrieval robust results related work see"
    );
}

#[test]
fn test_chain_is_idempotent_on_clean_text() {
    let normalizer = Normalizer::default();
    let clean = "the quick brown fox jumps over the lazy dog and keeps running";
    assert_eq!(normalizer.normalize(clean), clean);

    let once = normalizer.normalize("Überblick: 3 Methoden... und ﬁnale Ergebnisse (siehe Abb. 2)");
    assert_eq!(normalizer.normalize(&once), once);
}

#[test]
fn test_chain_is_idempotent_on_its_own_output() {
    let normalizer = Normalizer::default();
    let inputs = [
        "a did. something here",
        "the model performs as the earlier one\ndid. Results show civil\nmix. of methods\nvivid. colours",
        "We use state-of-the-art models.\nMix. Dim. Vivid. Civil. Did.",
        "iv. xii. vii. lid. mild. ill. dill.",
        "results are well-\nknown - see e.g. the survey - and end-\nto-end tests.",
        "• first item.\n2) second item -\n(b) third item…\nx. last",
        "A\n\nb\n\ns\n\nt\nsummary of the work done.",
    ];

    let is_edge_mark = |c: char| c == '.' || c == '-';
    for input in inputs {
        let once = normalizer.normalize(input);
        let twice = normalizer.normalize(&once);
        assert_eq!(twice, once, "second pass changed the output of {:?}", input);
        assert!(
            !once.split(' ').any(|token| token.starts_with(is_edge_mark) || token.ends_with(is_edge_mark)),
            "edge punctuation left in {:?}",
            once
        );
    }
}

#[test]
fn test_line_start_words_are_not_taken_for_numerals() {
    let normalizer = Normalizer::default();
    let text = "the model performs as the earlier one\ndid. Results show civil\nmix. of methods\nvivid. colours";
    assert_eq!(
        normalizer.normalize(text),
        "the model performs the earlier one did results show civil mix methods vivid colours"
    );
    assert_eq!(normalizer.normalize("a did. something here"), "did something here");
}

#[test]
fn test_blank_separated_letters_are_joined() {
    assert_eq!(
        Normalizer::default().normalize("A\n\nb\n\ns\n\nt\n\nr\na\nc\nt\n\nThe paper"),
        "abstract the paper"
    );
}

#[test]
fn test_output_has_no_removable_artifacts() {
    let raw = "Table 1: Results 98.5% ... • item\n\n\n  MIXED   Case\tTabs";
    let normalized = Normalizer::default().normalize(raw);

    assert!(!normalized.chars().any(|c| c.is_ascii_digit()));
    assert!(!normalized.contains(".."));
    assert!(!normalized.contains("  "));
    assert!(!normalized.contains('\n'));
    assert_eq!(normalized, normalized.to_lowercase());
    assert!(normalized.split(' ').all(|token| token.chars().count() >= 3));
}

#[test]
fn test_min_token_len_is_configurable() {
    let normalizer = Normalizer::from_params(&NormalizationParams { min_token_len: 2 });
    assert_eq!(normalizer.normalize("we do it in a day"), "we do it in day");
}

#[test]
fn test_custom_chain() {
    let normalizer = Normalizer::new(vec![
        Box::new(FnTransform::new("lower", transforms::lower)),
        Box::new(FnTransform::new("multiple_spaces", transforms::multiple_spaces)),
    ]);
    assert_eq!(normalizer.normalize("  Keep   PUNCTUATION, 42 "), "keep punctuation, 42");
}

#[test]
fn test_fn_transform_reports_name() {
    let step = FnTransform::new("digits", transforms::digits);
    assert_eq!(step.name(), "digits");
    assert_eq!(step.apply("a1b"), "a b");
}

#[test]
fn test_empty_input() {
    assert_eq!(Normalizer::default().normalize(""), "");
}
