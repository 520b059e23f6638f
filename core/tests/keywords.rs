// Keyword extraction tests against IDF and stop-word files on disk.

use hanseg_core::{CutError, InitError, KeywordExtractor, Segmenter};
use std::path::PathBuf;
use std::sync::Arc;

fn fixture(name: &str, content: &[u8]) -> PathBuf {
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!(
        "hanseg_kw_{}_{}_{}.txt",
        name,
        std::process::id(),
        stamp
    ));
    std::fs::write(&path, content).expect("write fixture");
    path
}

struct Fixtures {
    dict: PathBuf,
    idf: PathBuf,
    stop: PathBuf,
}

impl Fixtures {
    fn standard(tag: &str) -> Self {
        Self {
            dict: fixture(
                &format!("{tag}_dict"),
                "中国 5000\n天安门 2000\n北京 3000\n的 10000\n".as_bytes(),
            ),
            idf: fixture(&format!("{tag}_idf"), "中国 3.0\n".as_bytes()),
            stop: fixture(&format!("{tag}_stop"), "的\n".as_bytes()),
        }
    }

    fn extractor(&self) -> KeywordExtractor {
        let seg = Arc::new(Segmenter::new(&self.dict).unwrap());
        KeywordExtractor::new(seg, &self.idf, &self.stop).unwrap()
    }
}

impl Drop for Fixtures {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.dict);
        let _ = std::fs::remove_file(&self.idf);
        let _ = std::fs::remove_file(&self.stop);
    }
}

#[test]
fn top_one_keyword_scores_tf_times_idf() {
    let fx = Fixtures::standard("top1");
    let kw = fx.extractor();
    // 中国 twice at idf 3.0 -> 6.0; 天安门 once at the average (3.0) -> 3.0.
    let top = kw.extract("中国 中国 的 天安门", 1).unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].0, "中国");
    assert!((top[0].1 - 6.0).abs() < 1e-9);
}

#[test]
fn scores_come_out_non_increasing() {
    let fx = Fixtures::standard("monotone");
    let kw = fx.extractor();
    let ranked = kw
        .extract("中国 中国 北京 天安门 天安门 天安门", 10)
        .unwrap();
    assert!(ranked.len() >= 2);
    for pair in ranked.windows(2) {
        assert!(pair[0].1 >= pair[1].1);
    }
}

#[test]
fn stop_words_never_come_back() {
    let dict = fixture("stopw_dict", "北京 3000\n中国 5000\n".as_bytes());
    let idf = fixture("stopw_idf", "北京 2.5\n中国 3.0\n".as_bytes());
    let stop = fixture("stopw_stop", "北京\n".as_bytes());
    let seg = Arc::new(Segmenter::new(&dict).unwrap());
    let kw = KeywordExtractor::new(seg, &idf, &stop).unwrap();

    let ranked = kw.extract("北京中国北京", 10).unwrap();
    assert!(ranked.iter().all(|(w, _)| w != "北京"));
    assert_eq!(ranked[0].0, "中国");

    let _ = std::fs::remove_file(dict);
    let _ = std::fs::remove_file(idf);
    let _ = std::fs::remove_file(stop);
}

#[test]
fn single_code_point_tokens_never_qualify() {
    let fx = Fixtures::standard("single");
    let kw = fx.extractor();
    // 的 is both a stop word and a single code point; the bare latin
    // letters are out-of-vocabulary singles.
    let ranked = kw.extract("的的的 x y z 中国", 10).unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].0, "中国");
}

#[test]
fn top_n_is_clamped_to_the_candidate_count() {
    let fx = Fixtures::standard("clamp");
    let kw = fx.extractor();
    let ranked = kw.extract("中国 天安门", 100).unwrap();
    assert_eq!(ranked.len(), 2);
    assert!(kw.extract("的 的", 5).unwrap().is_empty());
}

#[test]
fn equal_scores_keep_first_encounter_order() {
    let fx = Fixtures::standard("ties");
    let kw = fx.extractor();
    // Both words miss the IDF table, both occur once: identical scores.
    let ranked = kw.extract("天安门 北京", 10).unwrap();
    let words: Vec<&str> = ranked.iter().map(|(w, _)| w.as_str()).collect();
    assert_eq!(words, vec!["天安门", "北京"]);

    let reversed = kw.extract("北京 天安门", 10).unwrap();
    let words: Vec<&str> = reversed.iter().map(|(w, _)| w.as_str()).collect();
    assert_eq!(words, vec!["北京", "天安门"]);
}

#[test]
fn words_missing_from_the_idf_table_use_the_average() {
    let dict = fixture("avg_dict", "中国 5000\n北京 3000\n".as_bytes());
    // Average of 2.0 and 4.0 is 3.0.
    let idf = fixture("avg_idf", "甲 2.0\n乙 4.0\n".as_bytes());
    let stop = fixture("avg_stop", b"");
    let seg = Arc::new(Segmenter::new(&dict).unwrap());
    let kw = KeywordExtractor::new(seg, &idf, &stop).unwrap();
    assert!((kw.idf_average() - 3.0).abs() < 1e-12);

    let ranked = kw.extract("中国", 1).unwrap();
    assert!((ranked[0].1 - 3.0).abs() < 1e-9);

    let _ = std::fs::remove_file(dict);
    let _ = std::fs::remove_file(idf);
    let _ = std::fs::remove_file(stop);
}

#[test]
fn malformed_idf_lines_are_skipped_but_empty_tables_fail() {
    let dict = fixture("idf_err_dict", "中国 5000\n".as_bytes());
    let seg = Arc::new(Segmenter::new(&dict).unwrap());

    let messy = fixture("idf_err_messy", "中国 3.0\nbroken\n北京 NaN\n".as_bytes());
    let stop = fixture("idf_err_stop", b"");
    let kw = KeywordExtractor::new(seg.clone(), &messy, &stop).unwrap();
    assert!((kw.idf_average() - 3.0).abs() < 1e-12);

    let hopeless = fixture("idf_err_hopeless", "no numbers anywhere\n".as_bytes());
    assert!(matches!(
        KeywordExtractor::new(seg, &hopeless, &stop).unwrap_err(),
        InitError::EmptyIdf
    ));

    let _ = std::fs::remove_file(dict);
    let _ = std::fs::remove_file(messy);
    let _ = std::fs::remove_file(stop);
    let _ = std::fs::remove_file(hopeless);
}

#[test]
fn extract_propagates_empty_input() {
    let fx = Fixtures::standard("empty");
    let kw = fx.extractor();
    assert!(matches!(kw.extract("", 5).unwrap_err(), CutError::EmptyInput));
}

#[test]
fn extract_keywords_drops_the_scores() {
    let fx = Fixtures::standard("words_only");
    let kw = fx.extractor();
    assert_eq!(
        kw.extract_keywords("中国 中国 天安门", 2).unwrap(),
        vec!["中国", "天安门"]
    );
}
