use std::io::Write;
use std::sync::{Arc, Mutex};

use content_model::{
    ContentItem, Contents, EmbeddedContent, EmbeddedKind, ImageColor, ImageContent, QuoteContent, TextContent,
};
use embedding_provider::config::{default_hashed_config, HASHED_DEFAULTS};
use embedding_provider::embedder::{Embedder, EmbedderError, EmbedderInfo, HashedEmbedder};
use page_preprocessor::describer::{DescriberError, ImageDescriber, ImageDescription, StaticImageDescriber};
use page_preprocessor::summarizer::{FixedSummarizer, LeadSummarizer, SummarizerError, SummaryPriority, TextSummarizer};
use page_preprocessor::{PagePreprocessor, PreprocessError, PreprocessorConfig};

/// Hashed embedder that records the size of every batch it receives.
struct RecordingEmbedder {
    inner: HashedEmbedder,
    batches: Mutex<Vec<usize>>,
    /// Drop this many vectors from every answer.
    short_by: usize,
}

impl RecordingEmbedder {
    fn new() -> Self {
        Self::short_by(0)
    }

    fn short_by(short_by: usize) -> Self {
        Self {
            inner: HashedEmbedder::new(default_hashed_config()).expect("default config is valid"),
            batches: Mutex::new(Vec::new()),
            short_by,
        }
    }

    fn batches(&self) -> Vec<usize> {
        self.batches.lock().unwrap().clone()
    }
}

impl Embedder for RecordingEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedderError> {
        self.inner.embed(text)
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedderError> {
        self.batches.lock().unwrap().push(texts.len());
        let mut out = self.inner.embed_batch(texts)?;
        let keep = out.len().saturating_sub(self.short_by);
        out.truncate(keep);
        Ok(out)
    }

    fn info(&self) -> &EmbedderInfo {
        self.inner.info()
    }
}

/// Describer labelling each image by its URL and recording requests.
#[derive(Default)]
struct RecordingDescriber {
    requests: Mutex<Vec<Vec<String>>>,
    drop_last: bool,
}

impl ImageDescriber for RecordingDescriber {
    fn describe(&self, img_urls: &[&str]) -> Result<Vec<ImageDescription>, DescriberError> {
        self.requests
            .lock()
            .unwrap()
            .push(img_urls.iter().map(|u| u.to_string()).collect());
        let mut out: Vec<ImageDescription> = img_urls
            .iter()
            .enumerate()
            .map(|(i, url)| ImageDescription {
                label: format!("label {url}"),
                entities: vec![format!("entity{i}")],
                has_caption: i % 2 == 0,
                image_colors: vec![ImageColor { red: i as u8, green: 0, blue: 0, score: 1.0, pixel_fraction: 0.5 }],
            })
            .collect();
        if self.drop_last {
            out.pop();
        }
        Ok(out)
    }
}

struct FailingSummarizer;

impl TextSummarizer for FailingSummarizer {
    fn summarize(&self, _text: &str, _priority: SummaryPriority) -> Result<String, SummarizerError> {
        Err(SummarizerError::Failure { message: "model offline".into() })
    }
}

fn preprocessor(
    summarizer: Arc<dyn TextSummarizer>,
    embedder: Arc<dyn Embedder>,
    describer: Arc<dyn ImageDescriber>,
) -> PagePreprocessor {
    PagePreprocessor::new(PreprocessorConfig::default(), summarizer, embedder, describer)
        .expect("default config is valid")
}

fn fixed(summary: &str) -> Arc<dyn TextSummarizer> {
    Arc::new(FixedSummarizer::new(summary))
}

fn cat_and_dog_page() -> Contents {
    Contents::new(vec![
        TextContent::new(0, "1. Pets Weekly").important().into(),
        TextContent::new(1, "The cat sat. It was happy.").into(),
        ImageContent::new(2, "https://img.example/cat.png").with_caption("A cat").into(),
        TextContent::new(3, "Dogs bark loudly.").into(),
        QuoteContent::new(4, "Dogs are loyal.").into(),
        EmbeddedContent::new(5, EmbeddedKind::Tweet, "https://twitter.example/status/1").into(),
    ])
}

#[test]
fn end_to_end_aligns_summary_to_blocks() {
    let pre = preprocessor(
        fixed("The cat sat. Dogs bark loudly."),
        Arc::new(RecordingEmbedder::new()),
        Arc::new(StaticImageDescriber::default()),
    );

    let (out, report) = pre
        .preprocess_with_report(&cat_and_dog_page())
        .expect("pipeline succeeds");

    assert_eq!(out.normal_text.len(), 2);
    let first = &out.normal_text[0];
    assert_eq!(first.text, "The cat sat.");
    assert_eq!(first.source_content_index, 1);
    assert_eq!(first.position_in_paragraph, 0);
    assert_eq!(first.weight, 0.0);
    let second = &out.normal_text[1];
    assert_eq!(second.text, "Dogs bark loudly.");
    assert_eq!(second.source_content_index, 3);
    assert_eq!(second.position_in_paragraph, 0);
    assert_eq!(second.weight, 0.0);
    assert!(out
        .normal_text
        .iter()
        .all(|s| s.embedding.len() == HASHED_DEFAULTS.embedding_dimension));

    assert_eq!(out.title_text.len(), 1);
    assert_eq!(out.title_text[0].text, "Pets Weekly");
    assert_eq!(out.title_text[0].source_content_index, 0);
    assert_eq!(out.title_text[0].weight, 0.0);
    assert_eq!(out.title_text[0].font_style, None);

    assert_eq!(out.media.len(), 1);
    assert_eq!(out.quoted_content.len(), 1);
    assert_eq!(out.quoted_content[0].quote.q_content, "Dogs are loyal.");
    assert_eq!(out.embedded_content.len(), 1);
    assert_eq!(out.embedded_content[0].kind, EmbeddedKind::Tweet);

    assert_eq!(
        report.normal_text_blocks, 2,
        "title must not be counted as normal text"
    );
    assert_eq!(report.summary_sentences, 2);
    assert_eq!(report.dropped_sentences, 0);
}

#[test]
fn empty_normal_text_yields_empty_output_without_error() {
    let pre = preprocessor(
        fixed(""),
        Arc::new(RecordingEmbedder::new()),
        Arc::new(StaticImageDescriber::default()),
    );
    let contents = Contents::new(vec![TextContent::new(0, "Headline").important().into()]);

    let (out, report) = pre.preprocess_with_report(&contents).expect("pipeline succeeds");

    assert!(out.normal_text.is_empty());
    assert_eq!(out.title_text.len(), 1);
    assert_eq!(report.summary_sentences, 0);
}

#[test]
fn fully_empty_page_is_fine() {
    let embedder = Arc::new(RecordingEmbedder::new());
    let pre = preprocessor(fixed(""), embedder.clone(), Arc::new(StaticImageDescriber::default()));

    let out = pre.preprocess(&Contents::default()).expect("pipeline succeeds");

    assert_eq!(out, Default::default());
    assert!(embedder.batches().is_empty(), "no collaborator call for empty batches");
}

#[test]
fn paraphrased_sentence_is_dropped_silently() {
    let pre = preprocessor(
        fixed("The cat sat. A feline rested. Dogs bark loudly."),
        Arc::new(RecordingEmbedder::new()),
        Arc::new(StaticImageDescriber::default()),
    );

    let (out, report) = pre
        .preprocess_with_report(&cat_and_dog_page())
        .expect("misses are not errors");

    assert_eq!(out.normal_text.len(), 1);
    assert_eq!(out.normal_text[0].text, "The cat sat.");
    assert_eq!(report.dropped_sentences, 2);
}

#[test]
fn lead_summary_keeps_block_boundaries_before_lowercase_text() {
    let pre = preprocessor(
        Arc::new(LeadSummarizer::new(1.0)),
        Arc::new(RecordingEmbedder::new()),
        Arc::new(StaticImageDescriber::default()),
    );
    let contents = Contents::new(vec![
        TextContent::new(0, "I like apples").into(),
        TextContent::new(1, "bananas are good.").into(),
        TextContent::new(2, "Cats purr.").into(),
    ]);

    let (out, report) = pre.preprocess_with_report(&contents).expect("pipeline succeeds");

    assert_eq!(report.summary_sentences, 3);
    assert_eq!(report.dropped_sentences, 0);
    let texts: Vec<&str> = out.normal_text.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["I like apples.", "bananas are good.", "Cats purr."]);
    let idx: Vec<usize> = out.normal_text.iter().map(|s| s.source_content_index).collect();
    assert_eq!(idx, vec![0, 1, 2]);
}

#[test]
fn media_batches_keep_item_order() {
    let embedder = Arc::new(RecordingEmbedder::new());
    let describer = Arc::new(RecordingDescriber::default());
    let pre = preprocessor(fixed(""), embedder.clone(), describer.clone());

    let urls = ["https://img.example/a.png", "https://img.example/b.png", "https://img.example/c.png"];
    let mut items: Vec<ContentItem> = urls
        .iter()
        .enumerate()
        .map(|(i, url)| ImageContent::new(i, *url).into())
        .collect();
    if let ContentItem::Image(image) = &mut items[1] {
        image.img_caption = Some("Second caption".into());
    }

    let out = pre.preprocess(&Contents::new(items)).expect("pipeline succeeds");

    let requests = describer.requests.lock().unwrap().clone();
    assert_eq!(requests, vec![urls.iter().map(|u| u.to_string()).collect::<Vec<_>>()]);
    assert_eq!(
        embedder.batches(),
        vec![3, 3],
        "one description batch and one attribute batch"
    );

    let reference = HashedEmbedder::new(default_hashed_config()).unwrap();
    assert_eq!(out.media.len(), 3);
    for (i, image) in out.media.iter().enumerate() {
        assert_eq!(image.image.img_url, urls[i]);
        assert_eq!(image.has_text_on_image, i % 2 == 0);
        assert_eq!(image.image_colors[0].red, i as u8);
        let expected = reference
            .embed(&format!("label {} entity{i}", urls[i]))
            .unwrap();
        assert_eq!(image.img_description_embedding, expected);
    }
    assert_eq!(out.media[1].img_attribute_embedding, reference.embed("Second caption").unwrap());
    assert_eq!(out.media[0].img_attribute_embedding, reference.embed("").unwrap());
}

#[test]
fn short_embedding_batch_is_a_contract_violation() {
    let pre = preprocessor(
        fixed("The cat sat."),
        Arc::new(RecordingEmbedder::short_by(1)),
        Arc::new(StaticImageDescriber::default()),
    );

    let err = pre
        .preprocess(&cat_and_dog_page())
        .expect_err("mismatched batch must fail");

    match err {
        PreprocessError::ContractViolation { collaborator, expected, actual } => {
            assert_eq!(collaborator, "embedder");
            assert_eq!(expected, actual + 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn short_description_batch_is_a_contract_violation() {
    let describer = Arc::new(RecordingDescriber { drop_last: true, ..Default::default() });
    let pre = preprocessor(fixed(""), Arc::new(RecordingEmbedder::new()), describer);

    let err = pre
        .preprocess(&cat_and_dog_page())
        .expect_err("mismatched batch must fail");

    assert!(matches!(
        err,
        PreprocessError::ContractViolation { collaborator: "image describer", expected: 1, actual: 0 }
    ));
}

#[test]
fn summarizer_failure_propagates() {
    let pre = preprocessor(
        Arc::new(FailingSummarizer),
        Arc::new(RecordingEmbedder::new()),
        Arc::new(StaticImageDescriber::default()),
    );

    let err = pre.preprocess(&cat_and_dog_page()).expect_err("failure propagates");
    assert!(matches!(err, PreprocessError::Summarizer(_)));
}

#[test]
fn image_without_url_is_malformed() {
    let pre = preprocessor(
        fixed(""),
        Arc::new(RecordingEmbedder::new()),
        Arc::new(StaticImageDescriber::default()),
    );
    let contents = Contents::new(vec![ImageContent::new(7, "  ").into()]);

    let err = pre.preprocess(&contents).expect_err("blank url is rejected");
    assert!(matches!(err, PreprocessError::MalformedInput { content_index: 7, .. }));
}

#[test]
fn json_input_round_trips_through_pipeline() {
    let json = r#"{
        "content_list": [
            {"content_type": "text", "content_index": 0, "text_string": "2) Intro", "is_important": true},
            {"content_type": "text", "content_index": 1, "text_string": "First point here. Second point here.",
             "font_style": {"bold": true}},
            {"content_type": "image", "content_index": 2, "img_url": "https://img.example/x.png"},
            {"content_type": "embedded", "content_index": 3, "kind": "video", "url": "https://video.example/v"}
        ]
    }"#;
    let pre = preprocessor(
        Arc::new(LeadSummarizer::new(1.0)),
        Arc::new(RecordingEmbedder::new()),
        Arc::new(StaticImageDescriber::default()),
    );

    let out = pre.preprocess_json(json).expect("pipeline succeeds");

    assert_eq!(out.title_text[0].text, "Intro");
    assert_eq!(out.normal_text.len(), 2);
    assert_eq!(out.normal_text[1].position_in_paragraph, 1);
    assert_eq!(out.normal_text[1].weight, 0.5);
    assert!(out.normal_text.iter().all(|s| s.font_style.is_some_and(|f| f.bold)));
    assert_eq!(out.embedded_content[0].kind, EmbeddedKind::Video);

    let rendered = serde_json::to_value(&out).expect("output serializes");
    assert_eq!(rendered["media"][0]["img_url"], "https://img.example/x.png");
}

#[test]
fn json_missing_required_field_is_a_parse_error() {
    let pre = preprocessor(
        fixed(""),
        Arc::new(RecordingEmbedder::new()),
        Arc::new(StaticImageDescriber::default()),
    );
    let json = r#"{"content_list": [{"content_type": "quote", "content_index": 0}]}"#;

    let err = pre.preprocess_json(json).expect_err("q_content is required");
    assert!(matches!(err, PreprocessError::Parse(_)));
}

#[test]
fn long_important_text_is_normal_text() {
    let long = format!("{} end.", "word ".repeat(30));
    let pre = preprocessor(
        fixed(&long),
        Arc::new(RecordingEmbedder::new()),
        Arc::new(StaticImageDescriber::default()),
    );
    let contents = Contents::new(vec![TextContent::new(0, long.clone()).important().into()]);

    let out = pre.preprocess(&contents).expect("pipeline succeeds");
    assert!(out.title_text.is_empty());
    assert_eq!(out.normal_text.len(), 1);
}

#[test]
fn config_file_overrides_defaults() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, r#"{{"max_title_length": 10, "summary_priority": "speed"}}"#).unwrap();

    let cfg = PreprocessorConfig::from_json_file(file.path()).expect("config loads");
    assert_eq!(cfg.max_title_length, 10);
    assert_eq!(cfg.summary_priority, SummaryPriority::Speed);
    assert_eq!(cfg.lead_ratio, PreprocessorConfig::default().lead_ratio);

    let pre = PagePreprocessor::new(
        cfg,
        fixed(""),
        Arc::new(RecordingEmbedder::new()),
        Arc::new(StaticImageDescriber::default()),
    )
    .expect("config is valid");
    let contents = Contents::new(vec![TextContent::new(0, "Eleven char").important().into()]);
    let out = pre.preprocess(&contents).expect("pipeline succeeds");
    assert!(out.title_text.is_empty(), "11 characters is not below 10");
}

#[test]
fn invalid_config_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, r#"{{"lead_ratio": 1.5}}"#).unwrap();
    let err = PreprocessorConfig::from_json_file(file.path()).expect_err("ratio above 1");
    assert!(matches!(err, PreprocessError::Config(_)));

    let cfg = PreprocessorConfig { max_title_length: 0, ..Default::default() };
    let result = PagePreprocessor::new(
        cfg,
        fixed(""),
        Arc::new(RecordingEmbedder::new()),
        Arc::new(StaticImageDescriber::default()),
    );
    assert!(matches!(result, Err(PreprocessError::Config(_))));
}

#[test]
fn static_describer_reads_json_table() {
    let describer = StaticImageDescriber::from_json(
        r#"{"https://img.example/a.png": {"label": "cat", "entities": ["tabby", "pet"], "has_caption": true}}"#,
    )
    .expect("table parses");

    let out = describer
        .describe(&["https://img.example/a.png", "https://img.example/unknown.png"])
        .unwrap();
    assert_eq!(out[0].condensed(), "cat tabby pet");
    assert!(out[0].has_caption);
    assert_eq!(out[1], ImageDescription::default());
    assert_eq!(out[1].condensed(), "");
}
