#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use bmcwatch_sel_pipeline::HistoryScanner;

/// 퍼저용 구조적 입력: 싱크 파일에서 되읽은 라인 목록
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    lines: Vec<String>,
}

fuzz_target!(|input: FuzzInput| {
    // 라인 수 제한 (성능)
    let lines: Vec<&str> = input.lines.iter().take(64).map(String::as_str).collect();

    let scanner = match HistoryScanner::new() {
        Ok(scanner) => scanner,
        Err(_) => return,
    };

    // 임의 라인에서도 크래시 없이 타임스탬프 집합을 돌려줘야 한다
    let history = scanner.scan(lines.iter().copied());

    // 추출된 타임스탬프 수는 입력 라인 수를 넘을 수 없다 (라인당 최대 1개)
    assert!(history.len() <= lines.len());
});
