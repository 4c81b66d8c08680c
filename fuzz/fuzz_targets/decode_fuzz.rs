#![no_main]
use gwcat::gwbas;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes: the decoder must never panic, only reject the
    // marker or produce a degraded listing.
    let _ = gwbas::decode(data);

    // Force both markers so the line walk and the cipher always run.
    let mut forced = Vec::with_capacity(data.len() + 1);
    forced.push(0xFF);
    forced.extend_from_slice(data);
    let _ = gwbas::decode(&forced).unwrap();
    forced[0] = 0xFE;
    let _ = gwbas::decode(&forced).unwrap();
});
