#![no_main]

use bytestream::ByteStream;
use libfuzzer_sys::fuzz_target;
use nbt::{read_root, write_root, Encoding};

fuzz_target!(|data: &[u8]| {
    for encoding in [
        Encoding::big_endian(),
        Encoding::little_endian(),
        Encoding::network(),
    ] {
        let mut stream = ByteStream::from_slice(data);
        if let Ok((name, tree)) = read_root(&mut stream, encoding) {
            // A parsed tree re-serializes unless lossy string repair
            // pushed a length past the fixed-width prefix.
            let mut out = ByteStream::new();
            let _ = write_root(&mut out, &name, &tree, encoding);
        }
    }
});
