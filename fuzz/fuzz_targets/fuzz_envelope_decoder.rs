#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

use snmp_agent_core::envelope::{CommunityEnvelope, EnvelopeConfig};

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);

    // Fuzz the envelope decoder with default and unlimited community lengths
    let _ = CommunityEnvelope::decode(bytes.clone());
    let config = EnvelopeConfig::default().max_community_len(None);

    // Whatever decodes must re-encode and decode to the same envelope
    if let Ok(env) = CommunityEnvelope::decode_with(bytes, &config) {
        let encoded = env.encode().ok();
        if let Some(encoded) = encoded {
            let again = CommunityEnvelope::decode_with(encoded, &config);
            assert_eq!(again.ok().as_ref(), Some(&env));
        }
    }
});
