//! End-to-end streaming through `StreamSession`

use proptest::prelude::*;
use streamcut_core::{
    create_segmenter, normalize_text, CutKind, Segment, SegmentOptions, SegmentReason,
    SegmentationConfig, Segmenter, StreamPace,
};

fn replay(
    segmenter: &mut Segmenter,
    text: &str,
    chunk_chars: usize,
    opts: SegmentOptions,
) -> Vec<Segment> {
    let chars: Vec<char> = text.chars().collect();
    let mut session = segmenter.stream_with(opts);
    let mut segments = Vec::new();
    for chunk in chars.chunks(chunk_chars.max(1)) {
        let delta: String = chunk.iter().collect();
        segments.extend(session.push(&delta));
    }
    segments.extend(session.finish());
    segments
}

fn non_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

#[test]
fn test_markdown_answer() {
    let answer = "# 安装指南\n\n\
                  首先下载安装包并解压到任意目录。\n\n\
                  1. 打开终端窗口\n\
                  2. 运行安装脚本\n\n\
                  ```\n./install.sh --prefix /usr/local\n```\n\n\
                  总之，整个过程只需要几分钟。";
    let mut segmenter = create_segmenter();
    let segments = replay(&mut segmenter, answer, 4, SegmentOptions::new());

    assert!(segments.len() >= 3, "got {segments:#?}");
    assert_eq!(segments[0].text, "# 安装指南");
    assert_eq!(segments[0].reason, Some(SegmentReason::CoherenceMarker));
    assert_eq!(
        non_whitespace(&segments.iter().map(|s| s.text.as_str()).collect::<String>()),
        non_whitespace(answer)
    );
    assert!(segments.iter().any(|s| s.text.contains("./install.sh")));
    assert!(segments.windows(2).all(|w| w[0].index + 1 == w[1].index));
}

#[test]
fn test_english_answer_with_markers() {
    let answer = "Rust programs compile to native code. The borrow checker runs at compile time. \
                  However, some checks still happen at runtime. In conclusion, most errors surface early.";
    let mut segmenter = create_segmenter();
    let segments = replay(&mut segmenter, answer, 7, SegmentOptions::new());

    assert!(segments
        .iter()
        .any(|s| s.reason == Some(SegmentReason::CoherenceMarker)));
    assert!(segments.iter().any(|s| s.text.starts_with("However")));
    assert_eq!(segments.last().map(|s| s.cut), Some(CutKind::Flush));
}

#[test]
fn test_unpunctuated_stream_is_hard_cut() {
    let text = "没有任何标点符号的长文本".repeat(20);
    let mut segmenter = create_segmenter();
    let segments = replay(&mut segmenter, &text, 5, SegmentOptions::new().force_chars(30));

    assert!(segments.iter().any(|s| s.cut == CutKind::HardCut));
    assert!(segments
        .iter()
        .filter(|s| s.cut == CutKind::HardCut)
        .all(|s| s.text.chars().count() == 30));
}

#[test]
fn test_pace_presets_change_delays() {
    let text = "这是一个用于测试节奏的普通句子。这是另外一个普通句子内容。";
    let mut fast = Segmenter::with_config(SegmentationConfig::for_pace(StreamPace::Fast)).unwrap();
    let relaxed =
        Segmenter::with_config(SegmentationConfig::for_pace(StreamPace::Relaxed)).unwrap();

    let fast_delay = fast.calculate_adaptive_delay(text, &SegmentOptions::new());
    let relaxed_delay = relaxed.calculate_adaptive_delay(text, &SegmentOptions::new());
    assert!(fast_delay <= relaxed_delay);

    let fast_segments = replay(&mut fast, text, 3, SegmentOptions::new());
    assert!(!fast_segments.is_empty());
}

#[test]
fn test_normalized_input_streams_the_same_content() {
    let raw = "First line.\r\n\r\n\r\n\r\nSecond\u{00A0}line.   \r\nThird line.";
    let normalized = normalize_text(raw);
    assert_eq!(normalized, "First line.\n\nSecond line.\nThird line.");

    let mut segmenter = create_segmenter();
    let segments = replay(&mut segmenter, &normalized, 6, SegmentOptions::new());
    let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(non_whitespace(&joined), non_whitespace(&normalized));
}

#[test]
fn test_segments_serialize_to_json() {
    let mut segmenter = create_segmenter();
    let segments = replay(
        &mut segmenter,
        "## 标题\n\n这里是正文的第一句话。这里是正文的第二句话。",
        5,
        SegmentOptions::new(),
    );
    let json = serde_json::to_string(&segments).unwrap();
    assert!(json.contains("\"delayMs\""));
    assert!(json.contains("\"cut\""));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_stream_never_loses_content(
        text in "[a-zA-Z 。！？.!?\u{4e00}-\u{4e30}\\n#-]{0,400}",
        chunk in 1usize..12,
        force in 5usize..120,
    ) {
        let mut segmenter = create_segmenter();
        let segments = replay(&mut segmenter, &text, chunk, SegmentOptions::new().force_chars(force));
        let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
        prop_assert_eq!(non_whitespace(&joined), non_whitespace(&text));
    }
}
