#![no_main]

use bmcwatch_core::config::BmcwatchConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // TOML 파서는 &str을 받으므로 UTF-8 변환 필요
    if let Ok(toml_str) = std::str::from_utf8(data) {
        // 파싱과 검증 모두 크래시 없이 Ok/Err로 끝나야 한다
        if let Ok(config) = BmcwatchConfig::parse(toml_str) {
            let _ = config.validate();
        }
    }
});
