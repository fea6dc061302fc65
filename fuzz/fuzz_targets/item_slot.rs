#![no_main]

use bytestream::ByteStream;
use libfuzzer_sys::fuzz_target;
use proto::{
    decode_item, decode_packet, StaticItemMap, VanillaAttributes, V1_12_0, V1_16_100, V1_2_13,
};

fn small_map() -> StaticItemMap {
    StaticItemMap::new()
        .entry(5, None, 2005)
        .entry(351, Some(4), 2351)
        .entry(513, None, 2513)
        .entry(278, None, 2278)
        .durable(278)
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let map = small_map();
    let protocol = match data[0] % 3 {
        0 => V1_2_13,
        1 => V1_12_0,
        _ => V1_16_100,
    };
    let body = &data[1..];

    let mut stream = ByteStream::from_slice(body);
    let _ = decode_item(&mut stream, protocol, &map);

    let mut stream = ByteStream::from_slice(body);
    let _ = decode_packet(&mut stream, protocol, &map, &VanillaAttributes);
});
