//! Order independence of page and document processing.

use std::sync::Arc;
use std::thread;

use unroll::{ExtractOptions, RollExtractor, SourceDocument, VoterRecord};

fn page(start: u32, count: u32, house: u32) -> String {
    let mut text = String::from("भाग संख्या : 45 - प्राथमिक विद्यालय\n");
    for serial in start..start + count {
        text.push_str(&format!(
            "{serial} ABCD{id:07}\nनिर्वाचक का नाम : मतदाता {serial}\nपिता का नाम : अभिभावक {serial}\nमकान संख्या : {house}/{serial}\nउम्र : {age} लिंग : {gender}\n",
            id = serial * 7,
            age = 18 + serial % 60,
            gender = if serial % 2 == 0 { "पुरुष" } else { "महिला" },
        ));
    }
    text
}

fn document(name: &str, pages: u32) -> SourceDocument {
    let texts: Vec<String> = (0..pages).map(|p| page(p * 10 + 1, 10, p)).collect();
    SourceDocument::from_page_texts(name, texts)
}

fn sequential() -> RollExtractor {
    RollExtractor::new(ExtractOptions::default().sequential()).unwrap()
}

#[test]
fn test_page_order_does_not_matter() {
    let extractor = sequential();
    let doc = document("a", 6);
    let expected = extractor.extract(&doc).records;

    let header = extractor.resolve_header(&doc);
    let dialect = extractor.choose_dialect(&doc);

    let order = [4usize, 1, 5, 0, 3, 2];
    let mut pages: Vec<_> = order
        .iter()
        .map(|&idx| extractor.extract_page(&doc.pages[idx], &header, dialect))
        .collect();
    pages.sort_by_key(|p| p.page);

    let records: Vec<VoterRecord> = pages.into_iter().flat_map(|p| p.records).collect();
    assert_eq!(records, expected);
    assert_eq!(records.len(), 60);
}

#[test]
fn test_pages_on_threads_match_sequential() {
    let extractor = Arc::new(sequential());
    let doc = Arc::new(document("a", 4));
    let expected = extractor.extract(&doc).records;

    let header = Arc::new(extractor.resolve_header(&doc));
    let dialect = extractor.choose_dialect(&doc);

    let handles: Vec<_> = (0..doc.pages.len())
        .rev()
        .map(|idx| {
            let extractor = Arc::clone(&extractor);
            let doc = Arc::clone(&doc);
            let header = Arc::clone(&header);
            thread::spawn(move || extractor.extract_page(&doc.pages[idx], &header, dialect))
        })
        .collect();

    let mut pages: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    pages.sort_by_key(|p| p.page);
    let records: Vec<VoterRecord> = pages.into_iter().flat_map(|p| p.records).collect();
    assert_eq!(records, expected);
}

#[test]
fn test_documents_concurrently_match_sequential() {
    let extractor = sequential();
    let a = document("a", 3);
    let b = SourceDocument::from_page_texts(
        "b",
        [format!(
            "बिहार\nविधानसभा निर्वाचन क्षेत्र : 9 - नया नगर\n{}",
            page(500, 5, 2)
        )],
    );

    let expected_a = extractor.extract(&a);
    let expected_b = extractor.extract(&b);

    let (got_a, got_b) = thread::scope(|s| {
        let ha = s.spawn(|| extractor.extract(&a));
        let hb = s.spawn(|| extractor.extract(&b));
        (ha.join().unwrap(), hb.join().unwrap())
    });

    assert_eq!(got_a.records, expected_a.records);
    assert_eq!(got_b.records, expected_b.records);
    assert_eq!(got_b.records[0].constituency, "9-नया नगर");
    assert_eq!(got_a.records[0].constituency, "Not Found");
}

#[test]
fn test_parallel_batch_matches_sequential() {
    let docs: Vec<SourceDocument> = (0..5).map(|i| document(&format!("d{i}"), 3)).collect();

    let sequential_out = sequential().extract_batch(&docs);
    let parallel_out = RollExtractor::new(ExtractOptions::default())
        .unwrap()
        .extract_batch(&docs);

    assert_eq!(sequential_out.len(), parallel_out.len());
    for (s, p) in sequential_out.iter().zip(&parallel_out) {
        assert_eq!(s.name, p.name);
        assert_eq!(s.records, p.records);
        assert_eq!(s.stats, p.stats);
    }
}
