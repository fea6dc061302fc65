#![no_main]

use bytestream::ByteStream;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut stream = ByteStream::from_slice(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of operations.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 12;
        idx += 1;

        match op {
            0 => {
                let _ = stream.read_u8();
            }
            1 => {
                let _ = stream.read_bool();
            }
            2 => {
                let n = data[idx.saturating_sub(1)] as usize;
                let _ = stream.read(n);
            }
            3 => {
                let _ = stream.read_u16_le();
            }
            4 => {
                let _ = stream.read_u24();
            }
            5 => {
                let _ = stream.read_i32_le();
            }
            6 => {
                let _ = stream.read_i64();
            }
            7 => {
                let _ = stream.read_f32_le();
            }
            8 => {
                let _ = stream.read_var_u32();
            }
            9 => {
                let _ = stream.read_var_i64();
            }
            10 => {
                let _ = stream.read_string();
            }
            _ => {
                let _ = stream.read_uuid();
            }
        }
    }
});
