use confdiff_chunker::ChunkerConfig;
use confdiff_index::LexicalIndex;
use pretty_assertions::assert_eq;

fn snapshot(pci: u32, band: u32) -> String {
    format!(
        "<ManagedElement>\n<ENBFunction>\n<EUtranCellFDD>\n<pci>{pci}</pci>\n<tac>4660</tac>\n\
         <earfcndl>1300</earfcndl>\n</EUtranCellFDD>\n</ENBFunction>\n<RadioObj>\n\
         <RadioBand>{band}</RadioBand>\n<RadioCarrier>20</RadioCarrier>\n</RadioObj>\n</ManagedElement>"
    )
}

fn build(max_chars: usize) -> LexicalIndex {
    let config = ChunkerConfig {
        max_chars_per_chunk: max_chars,
    };
    LexicalIndex::build(&snapshot(241, 3), &snapshot(242, 7), &config)
}

#[test]
fn retrieval_is_deterministic_across_rebuilds() {
    let a = build(64);
    let b = build(64);
    for query in ["pci", "RadioBand carrier", "tac 4660", "earfcndl"] {
        for k in [1, 3, 100] {
            assert_eq!(a.retrieve(query, k), b.retrieve(query, k));
        }
    }
}

#[test]
fn ids_match_ranked_chunks() {
    let index = build(64);
    let retrieved = index.retrieve("pci tac", 10);
    assert_eq!(retrieved.ids.len(), retrieved.formatted.split("\n\n").count());
    for (id, block) in retrieved.ids.iter().zip(retrieved.formatted.split("\n\n")) {
        let (source, chunk_id) = id.split_once(':').expect("id shape");
        let label = format!("[{} #{}]", source.to_uppercase(), chunk_id);
        assert!(
            block.starts_with(&label),
            "block {block:?} should start with {label:?}"
        );
    }
}

#[test]
fn scores_rank_specific_chunks_first() {
    let index = build(64);
    // "RadioBand" appears only in the radio chunks; they must come first.
    let retrieved = index.retrieve("RadioBand", 10);
    assert!(!retrieved.ids.is_empty());
    for id in &retrieved.ids {
        assert!(id.starts_with("pre:") || id.starts_with("post:"));
    }
    let top_block = retrieved.formatted.split("\n\n").next().unwrap();
    assert!(top_block.contains("RadioBand"));
}

#[test]
fn whole_document_under_threshold_is_one_chunk_per_source() {
    let config = ChunkerConfig {
        max_chars_per_chunk: 1_000_000,
    };
    let index = LexicalIndex::build(&snapshot(241, 3), &snapshot(242, 7), &config);
    assert_eq!(index.len(), 2);
    let retrieved = index.retrieve("pci", 10);
    assert_eq!(retrieved.ids, vec!["pre:0", "post:0"]);
}

#[test]
fn query_matching_nothing_returns_empty_payload() {
    let index = build(64);
    let retrieved = index.retrieve("totally unrelated words", 5);
    assert!(retrieved.ids.is_empty());
    assert!(retrieved.formatted.is_empty());
}

#[test]
fn retrieval_payload_serializes_with_expected_keys() {
    let index = build(64);
    let retrieved = index.retrieve("pci", 2);
    let json = serde_json::to_value(&retrieved).unwrap();
    assert!(json["formatted"].is_string());
    assert!(json["ids"].is_array());
}
