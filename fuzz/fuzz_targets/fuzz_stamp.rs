#![no_main]
use libfuzzer_sys::fuzz_target;
use swift_hmac::{format, ini::Ini, mac};

fuzz_target!(|data: &[u8]| {
    // Config parsing must never panic, whatever the bytes decode to.
    let text = String::from_utf8_lossy(data);
    let ini = Ini::parse(&text);
    for section in ini.sections() {
        for key in ini.keys(section) {
            let _ = ini.value_in(key, section);
        }
    }

    // Use the parsed key so both paths see the same input.
    let digest = match mac::digest_hex(data, ini.value("Key")) {
        Ok(d) => d,
        Err(_) => return,
    };
    assert_eq!(digest.len(), mac::DIGEST_HEX_LEN);

    let out = format::assemble(data, &digest);
    assert_eq!(out.len() % format::BLOCK_LEN, 0);
    assert_eq!(out[0], format::START_OF_MESSAGE);
    assert_eq!(&out[1..1 + data.len()], data);
});
