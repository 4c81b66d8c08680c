#![no_main]
use gwcat::gwbas::cipher::{self, CipherState};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut work = data.to_vec();
    cipher::protect_in_place(&mut work);
    cipher::unprotect_in_place(&mut work);
    assert_eq!(work, data);

    // Byte-at-a-time deciphering must agree with the in-place pass.
    let mut one_shot = data.to_vec();
    cipher::unprotect_in_place(&mut one_shot);
    let mut state = CipherState::new();
    for (i, &b) in data.iter().enumerate() {
        assert_eq!(state.unprotect_byte(b), one_shot[i]);
    }
});
