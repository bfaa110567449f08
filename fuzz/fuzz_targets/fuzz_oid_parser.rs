#![no_main]

use libfuzzer_sys::fuzz_target;

use snmp_agent_core::oid::Oid;
use snmp_agent_core::registry::config::parse_entry_line;
use snmp_agent_core::text::{Field, find_field, nth_field, parse_text};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // Strict and lenient dotted parsers
    let _ = Oid::parse(s);
    if let Ok(oid) = parse_text(s) {
        assert!(!oid.is_empty());
    }

    // Field location must stay within the line
    for field in [Field::Nth(1), Field::Nth(2), Field::Nth(3), Field::Last] {
        if let Some(rest) = find_field(s, field) {
            assert!(s.ends_with(rest));
        }
        let _ = nth_field(s, field);
    }

    // Registry lines
    let _ = parse_entry_line(s);
});
