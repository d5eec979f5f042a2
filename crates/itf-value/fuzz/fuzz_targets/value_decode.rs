#![no_main]
use itf_value::Value;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Reject-or-decode must never panic, whatever the wire bytes are.
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = Value::from_json(&json);
    }
});
