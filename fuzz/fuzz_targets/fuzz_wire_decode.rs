#![no_main]
use libfuzzer_sys::fuzz_target;

use striker_core::wire::{BallRecord, SupervisorSignal, TeamPositionRecord, WireRecord};

fuzz_target!(|data: &[u8]| {
    // Decoders must reject arbitrary byte strings without panicking, and a
    // successful decode must re-encode to the exact wire size.
    if let Ok(signal) = SupervisorSignal::decode(data) {
        assert_eq!(signal.encode().len(), SupervisorSignal::WIRE_SIZE);
    }
    if let Ok(record) = TeamPositionRecord::decode(data) {
        assert_eq!(record.encode().len(), TeamPositionRecord::WIRE_SIZE);
    }
    if let Ok(record) = BallRecord::decode(data) {
        assert_eq!(record.encode().len(), BallRecord::WIRE_SIZE);
    }
});
