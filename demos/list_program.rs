use gwcat::gwbas;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 10 PRINT "HELLO"
    // 20 GOTO 10
    let program: &[u8] = &[
        0xFF, // plain-file marker
        0x01, 0x08, 0x0A, 0x00, 0x91, 0x20, 0x22, b'H', b'E', b'L', b'L', b'O', 0x22, 0x00,
        0x10, 0x08, 0x14, 0x00, 0x89, 0x20, 0x0E, 0x0A, 0x00, 0x00,
        0x00, 0x00, // end of program
    ];

    let listing = gwbas::decode(program)?;
    println!("{} file, {} line(s):", listing.kind(), listing.len());
    for line in listing.lines() {
        println!("{line}");
    }
    Ok(())
}
