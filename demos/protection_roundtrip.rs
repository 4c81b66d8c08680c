use gwcat::gwbas;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 10 END
    let plain: &[u8] = &[0xFF, 0x01, 0x08, 0x0A, 0x00, 0x81, 0x00, 0x00, 0x00];

    let protected = gwbas::protect(plain)?;
    println!("plain bytes:     {plain:02X?}");
    println!("protected bytes: {protected:02X?}");

    for line in gwbas::decode(&protected)?.lines() {
        println!("{line}");
    }

    assert_eq!(gwbas::unprotect(&protected)?, plain);
    println!("unprotect restored the original bytes");
    Ok(())
}
