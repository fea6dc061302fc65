//! Named binary tag trees and their three wire encodings.
//!
//! A tag tree is a named compound of [`Value`] nodes. The same tree can
//! travel in three encodings, selected by [`Encoding`]:
//!
//! - [`Encoding::big_endian`] for on-disk level data,
//! - [`Encoding::little_endian`] for pocket-edition disk formats,
//! - [`Encoding::network`] for the packet framing, where `Int` and
//!   `Long` payloads plus every length prefix shrink to varints.
//!
//! # Design principles
//!
//! - **Hostile input is the normal case.** Declared lengths are checked
//!   against the bytes actually remaining before anything is allocated,
//!   and nesting is capped at [`MAX_DEPTH`].
//! - **Trees are plain data.** [`Value`] is an ordinary enum over owned
//!   `std` containers with no lifetime back into the stream.
//!
//! # Example
//!
//! ```
//! use bytestream::ByteStream;
//! use nbt::{read_root, write_root, Compound, Encoding, Value};
//!
//! let mut root = Compound::new();
//! root.insert("Damage".to_owned(), Value::Int(3));
//!
//! let mut stream = ByteStream::new();
//! write_root(&mut stream, "", &root, Encoding::network())?;
//!
//! let mut stream = ByteStream::from_vec(stream.into_vec());
//! let (name, parsed) = read_root(&mut stream, Encoding::network())?;
//! assert_eq!(name, "");
//! assert_eq!(parsed, root);
//! # Ok::<(), nbt::NbtError>(())
//! ```

mod encoding;
mod error;
mod reader;
mod tag;
mod writer;

pub use encoding::{ByteOrder, Encoding};
pub use error::{NbtError, NbtResult};
pub use reader::{read_root, MAX_DEPTH};
pub use tag::{Compound, TagType, Value};
pub use writer::write_root;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = Encoding::network();
        let _ = ByteOrder::Little;
        let _ = TagType::Compound;
        let _ = Value::Int(0);
        let _: Compound = Compound::new();
        let _: NbtResult<()> = Ok(());
        assert_eq!(MAX_DEPTH, 512);
    }

    #[test]
    fn doctest_example() {
        let mut root = Compound::new();
        root.insert("Damage".to_owned(), Value::Int(3));

        let mut stream = bytestream::ByteStream::new();
        write_root(&mut stream, "", &root, Encoding::network()).unwrap();

        let mut stream = bytestream::ByteStream::from_vec(stream.into_vec());
        let (name, parsed) = read_root(&mut stream, Encoding::network()).unwrap();
        assert_eq!(name, "");
        assert_eq!(parsed, root);
    }
}
