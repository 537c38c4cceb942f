use contract_scout::output::{CsvSink, ResultSink, StdoutSink};
use contract_scout::types::ClassificationResult;
use ethers::types::U256;
use std::fs;
use std::path::PathBuf;
use test_log::test;

fn temp_csv(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("contract-scout-{}-{}.csv", tag, std::process::id()))
}

fn result(address: &str, name: &str, total: u64, max: Option<u64>) -> ClassificationResult {
    ClassificationResult {
        address: address.to_string(),
        name: name.to_string(),
        total_supply: U256::from(total),
        max_supply: max.map(U256::from),
        confidence: 3,
    }
}

#[test]
fn csv_sink_writes_header_then_one_row_per_result() {
    let path = temp_csv("rows");
    let mut sink = CsvSink::create(&path).unwrap();

    sink.write(&result(
        "0x0123456789012345678901234567890123456789",
        "CoolDrop",
        500,
        Some(5000),
    ))
    .unwrap();
    sink.write(&result(
        "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd",
        "Solo",
        1000,
        None,
    ))
    .unwrap();
    sink.close().unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).ok();

    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "address,name,totalSupply,maxSupply,confidence (1-3)");
    assert_eq!(
        lines[1],
        "0x0123456789012345678901234567890123456789,CoolDrop,500,5000,3"
    );
    // missing second observation is written as the N/A sentinel
    assert_eq!(
        lines[2],
        "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd,Solo,1000,N/A,3"
    );
}

#[test]
fn csv_sink_flushes_on_close() {
    let path = temp_csv("flush");
    let mut sink = CsvSink::create(&path).unwrap();
    sink.write(&result(
        "0x0123456789012345678901234567890123456789",
        "Drop",
        7,
        Some(70),
    ))
    .unwrap();
    sink.close().unwrap();

    // everything is on disk once close returns
    let contents = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).ok();
    assert!(contents.ends_with("7,70,3\n"));
}

#[test]
fn empty_run_still_leaves_the_header() {
    let path = temp_csv("header");
    let mut sink = CsvSink::create(&path).unwrap();
    sink.close().unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).ok();
    assert_eq!(
        contents,
        "address,name,totalSupply,maxSupply,confidence (1-3)\n"
    );
}

#[test]
fn stdout_sink_accepts_both_result_shapes() {
    let mut sink = StdoutSink;
    sink.write(&result(
        "0x0123456789012345678901234567890123456789",
        "Drop",
        500,
        Some(5000),
    ))
    .unwrap();
    sink.write(&result(
        "0x0123456789012345678901234567890123456789",
        "Solo",
        500,
        None,
    ))
    .unwrap();
    sink.close().unwrap();
}
