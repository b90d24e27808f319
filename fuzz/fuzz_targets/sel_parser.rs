#![no_main]

use bmcwatch_sel_pipeline::SelParser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // 파서는 &str을 받으므로 UTF-8 변환 필요
    if let Ok(listing) = std::str::from_utf8(data) {
        let parser = SelParser::new();

        // 크래시나 패닉 없이 파싱 성공/건너뜀으로만 끝나야 한다
        let _ = parser.parse_listing(listing);
    }
});
