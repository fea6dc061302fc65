//! Player skin serialization across the legacy and rich wire layouts.
//!
//! Protocol 388 split the format: before it a skin is a raw texture
//! blob plus a geometry name, from it on a skin carries images with
//! explicit dimensions, animations and persona piece lists. Both
//! layouts decode into the same [`Skin`] value.

use bytestream::ByteStream;
use tracing::{debug, warn};

use crate::error::{DecodeError, DecodeResult};
use crate::limits::MAX_SKIN_LIST_ENTRIES;
use crate::version::{V1_2_13, V1_13_0, V1_14_60, V1_16_100, V1_16_210};

/// Geometry name for the wide-arm humanoid model.
pub const GEOMETRY_CUSTOM: &str = "geometry.humanoid.custom";
/// Geometry name for the slim-arm humanoid model.
pub const GEOMETRY_CUSTOM_SLIM: &str = "geometry.humanoid.customSlim";

/// Geometry definition written when a persona skin is downgraded for a
/// client that predates persona support.
pub const DEFAULT_GEOMETRY_DATA: &str = r#"{"format_version":"1.12.0","minecraft:geometry":[{"description":{"identifier":"geometry.humanoid.custom","texture_width":64,"texture_height":64}}]}"#;

/// An RGBA texture with explicit dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SkinImage {
    pub width: i32,
    pub height: i32,
    pub data: Vec<u8>,
}

impl SkinImage {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    /// Recovers dimensions from a legacy texture blob, which carries
    /// only its pixels. Only the four standard sizes existed.
    pub fn from_legacy(data: Vec<u8>) -> DecodeResult<Self> {
        let (width, height) = match data.len() {
            0 => (0, 0),
            8192 => (64, 32),
            16384 => (64, 64),
            32768 => (128, 64),
            65536 => (128, 128),
            length => return Err(DecodeError::InvalidLegacyImage { length }),
        };
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// The opaque single-color 64x64 texture used as a stand-in when a
    /// real texture cannot be sent.
    #[must_use]
    pub fn default_humanoid() -> Self {
        let mut data = Vec::with_capacity(64 * 64 * 4);
        for _ in 0..64 * 64 {
            data.extend_from_slice(&[137, 106, 80, 255]);
        }
        Self {
            width: 64,
            height: 64,
            data,
        }
    }
}

/// One animated texture layer of a rich skin.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SkinAnimation {
    pub image: SkinImage,
    pub animation_type: i32,
    pub frames: f32,
    /// Only on the wire from protocol 419 on.
    pub expression: i32,
}

/// A selected persona character piece.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonaPiece {
    pub id: String,
    pub piece_type: String,
    pub pack_id: String,
    pub is_default: bool,
    pub product_id: String,
}

/// Color overrides for one persona piece type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonaPieceTint {
    pub piece_type: String,
    pub colors: Vec<String>,
}

/// A complete player skin.
///
/// `legacy_slim` only matters below protocol 388, where the arm model
/// travels as a geometry name instead of a resource patch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Skin {
    pub skin_id: String,
    pub play_fab_id: String,
    pub resource_patch: String,
    pub skin_image: SkinImage,
    pub animations: Vec<SkinAnimation>,
    pub cape_image: SkinImage,
    pub geometry_data: String,
    pub animation_data: String,
    pub premium: bool,
    pub persona: bool,
    pub cape_on_classic: bool,
    pub cape_id: String,
    pub full_skin_id: String,
    pub arm_size: String,
    pub skin_color: String,
    pub persona_pieces: Vec<PersonaPiece>,
    pub piece_tints: Vec<PersonaPieceTint>,
    pub legacy_slim: bool,
}

fn encode_image(stream: &mut ByteStream, image: &SkinImage) {
    stream.write_i32_le(image.width);
    stream.write_i32_le(image.height);
    stream.write_byte_array(&image.data);
}

fn decode_image(stream: &mut ByteStream) -> DecodeResult<SkinImage> {
    let width = stream.read_i32_le()?;
    let height = stream.read_i32_le()?;
    let data = stream.read_byte_array()?.to_vec();
    Ok(SkinImage {
        width,
        height,
        data,
    })
}

/// Reads a fixed-width list count and clamps it to the per-list entry
/// ceiling. Negative counts fall through to an empty loop.
fn clamped_count(stream: &mut ByteStream, list: &str) -> DecodeResult<i32> {
    let count = stream.read_i32_le()?;
    if count > MAX_SKIN_LIST_ENTRIES {
        warn!(
            list,
            declared = count,
            limit = MAX_SKIN_LIST_ENTRIES,
            "skin list length clamped"
        );
        return Ok(MAX_SKIN_LIST_ENTRIES);
    }
    Ok(count)
}

/// Writes a skin in the layout of the given protocol.
pub fn encode_skin(stream: &mut ByteStream, protocol: i32, skin: &Skin) {
    stream.write_string(&skin.skin_id);
    if protocol < V1_13_0 {
        encode_legacy_body(stream, protocol, skin);
    } else {
        encode_rich_body(stream, protocol, skin);
    }
}

fn encode_legacy_body(stream: &mut ByteStream, protocol: i32, skin: &Skin) {
    if skin.persona {
        // Persona skins predate this layout. Send the stand-in
        // humanoid instead of bytes the client cannot interpret; the
        // cape is an ordinary texture and travels unchanged.
        debug!(skin_id = %skin.skin_id, "persona skin downgraded to default humanoid");
        stream.write_byte_array(&SkinImage::default_humanoid().data);
        if protocol >= V1_2_13 {
            stream.write_byte_array(&skin.cape_image.data);
        }
        stream.write_string(GEOMETRY_CUSTOM);
        stream.write_string(DEFAULT_GEOMETRY_DATA);
        return;
    }
    stream.write_byte_array(&skin.skin_image.data);
    if protocol >= V1_2_13 {
        stream.write_byte_array(&skin.cape_image.data);
    }
    stream.write_string(if skin.legacy_slim {
        GEOMETRY_CUSTOM_SLIM
    } else {
        GEOMETRY_CUSTOM
    });
    stream.write_string(&skin.geometry_data);
}

fn encode_rich_body(stream: &mut ByteStream, protocol: i32, skin: &Skin) {
    if protocol >= V1_16_210 {
        stream.write_string(&skin.play_fab_id);
    }
    stream.write_string(&skin.resource_patch);
    encode_image(stream, &skin.skin_image);
    stream.write_i32_le(skin.animations.len() as i32);
    for animation in &skin.animations {
        encode_image(stream, &animation.image);
        stream.write_i32_le(animation.animation_type);
        stream.write_f32_le(animation.frames);
        if protocol >= V1_16_100 {
            stream.write_i32_le(animation.expression);
        }
    }
    encode_image(stream, &skin.cape_image);
    stream.write_string(&skin.geometry_data);
    stream.write_string(&skin.animation_data);
    stream.write_bool(skin.premium);
    stream.write_bool(skin.persona);
    stream.write_bool(skin.cape_on_classic);
    stream.write_string(&skin.cape_id);
    stream.write_string(&skin.full_skin_id);
    if protocol >= V1_14_60 {
        stream.write_string(&skin.arm_size);
        stream.write_string(&skin.skin_color);
        stream.write_i32_le(skin.persona_pieces.len() as i32);
        for piece in &skin.persona_pieces {
            stream.write_string(&piece.id);
            stream.write_string(&piece.piece_type);
            stream.write_string(&piece.pack_id);
            stream.write_bool(piece.is_default);
            stream.write_string(&piece.product_id);
        }
        stream.write_i32_le(skin.piece_tints.len() as i32);
        for tint in &skin.piece_tints {
            stream.write_string(&tint.piece_type);
            stream.write_i32_le(tint.colors.len() as i32);
            for color in &tint.colors {
                stream.write_string(color);
            }
        }
    }
}

/// Reads a skin in the layout of the given protocol.
pub fn decode_skin(stream: &mut ByteStream, protocol: i32) -> DecodeResult<Skin> {
    let skin_id = stream.read_string()?;
    let mut skin = if protocol < V1_13_0 {
        decode_legacy_body(stream, protocol)?
    } else {
        decode_rich_body(stream, protocol)?
    };
    skin.skin_id = skin_id;
    Ok(skin)
}

fn decode_legacy_body(stream: &mut ByteStream, protocol: i32) -> DecodeResult<Skin> {
    let skin_image = SkinImage::from_legacy(stream.read_byte_array()?.to_vec())?;
    let cape_image = if protocol >= V1_2_13 {
        SkinImage::from_legacy(stream.read_byte_array()?.to_vec())?
    } else {
        SkinImage::empty()
    };
    let geometry_name = stream.read_string()?;
    let geometry_data = stream.read_string()?;
    Ok(Skin {
        skin_image,
        cape_image,
        geometry_data,
        legacy_slim: geometry_name == GEOMETRY_CUSTOM_SLIM,
        ..Skin::default()
    })
}

fn decode_rich_body(stream: &mut ByteStream, protocol: i32) -> DecodeResult<Skin> {
    let mut skin = Skin::default();
    if protocol >= V1_16_210 {
        skin.play_fab_id = stream.read_string()?;
    }
    skin.resource_patch = stream.read_string()?;
    skin.skin_image = decode_image(stream)?;
    let animation_count = clamped_count(stream, "animations")?;
    for _ in 0..animation_count {
        let image = decode_image(stream)?;
        let animation_type = stream.read_i32_le()?;
        let frames = stream.read_f32_le()?;
        let expression = if protocol >= V1_16_100 {
            stream.read_i32_le()?
        } else {
            0
        };
        skin.animations.push(SkinAnimation {
            image,
            animation_type,
            frames,
            expression,
        });
    }
    skin.cape_image = decode_image(stream)?;
    skin.geometry_data = stream.read_string()?;
    skin.animation_data = stream.read_string()?;
    skin.premium = stream.read_bool()?;
    skin.persona = stream.read_bool()?;
    skin.cape_on_classic = stream.read_bool()?;
    skin.cape_id = stream.read_string()?;
    skin.full_skin_id = stream.read_string()?;
    if protocol >= V1_14_60 {
        skin.arm_size = stream.read_string()?;
        skin.skin_color = stream.read_string()?;
        let piece_count = clamped_count(stream, "persona pieces")?;
        for _ in 0..piece_count {
            skin.persona_pieces.push(PersonaPiece {
                id: stream.read_string()?,
                piece_type: stream.read_string()?,
                pack_id: stream.read_string()?,
                is_default: stream.read_bool()?,
                product_id: stream.read_string()?,
            });
        }
        let tint_count = clamped_count(stream, "piece tints")?;
        for _ in 0..tint_count {
            let piece_type = stream.read_string()?;
            let color_count = clamped_count(stream, "tint colors")?;
            let mut colors = Vec::new();
            for _ in 0..color_count {
                colors.push(stream.read_string()?);
            }
            skin.piece_tints.push(PersonaPieceTint { piece_type, colors });
        }
    }
    Ok(skin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_image_sizes() {
        assert_eq!(SkinImage::from_legacy(vec![0; 8192]).unwrap().height, 32);
        assert_eq!(SkinImage::from_legacy(vec![0; 16384]).unwrap().height, 64);
        assert_eq!(SkinImage::from_legacy(vec![0; 32768]).unwrap().width, 128);
        assert_eq!(SkinImage::from_legacy(vec![0; 65536]).unwrap().width, 128);
        assert_eq!(SkinImage::from_legacy(Vec::new()).unwrap(), SkinImage::empty());
        assert_eq!(
            SkinImage::from_legacy(vec![0; 100]).unwrap_err(),
            DecodeError::InvalidLegacyImage { length: 100 }
        );
    }

    #[test]
    fn default_humanoid_is_full_64x64() {
        let image = SkinImage::default_humanoid();
        assert_eq!(image.data.len(), 64 * 64 * 4);
        assert_eq!(&image.data[..4], &[137, 106, 80, 255]);
    }

    #[test]
    fn image_roundtrip() {
        let image = SkinImage {
            width: 2,
            height: 1,
            data: vec![1, 2, 3, 4, 5, 6, 7, 8],
        };
        let mut stream = ByteStream::new();
        encode_image(&mut stream, &image);

        let mut stream = ByteStream::from_vec(stream.into_vec());
        assert_eq!(decode_image(&mut stream).unwrap(), image);
    }

    #[test]
    fn negative_list_count_yields_empty_list() {
        let mut stream = ByteStream::new();
        stream.write_i32_le(-5);
        let mut stream = ByteStream::from_vec(stream.into_vec());
        let count = clamped_count(&mut stream, "animations").unwrap();
        assert_eq!(count, -5);
        assert_eq!((0..count).count(), 0);
    }

    #[test]
    fn oversized_list_count_clamped() {
        let mut stream = ByteStream::new();
        stream.write_i32_le(1_000_000);
        let mut stream = ByteStream::from_vec(stream.into_vec());
        let count = clamped_count(&mut stream, "animations").unwrap();
        assert_eq!(count, MAX_SKIN_LIST_ENTRIES);
    }
}
