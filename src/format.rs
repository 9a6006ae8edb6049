use crate::error::ErrorKind;
use crate::reader::SliceReader;
use crate::{Error, Result};

/// The 8-byte magic that opens every native binary scene stream, stored
/// little-endian (`A1 0E 91 6C 45 45 FB 1A` on the wire).
pub const MAGIC: u64 = 0x1AFB_4545_6C91_0EA1;

/// Header attribute bit requesting custom serialization domains. Unsupported.
pub const ATTRIBUTE_CUSTOM_DOMAINS: u32 = 0x01;
/// Header attribute bit requesting schema-driven layout. Unsupported.
pub const ATTRIBUTE_SCHEMA_DATA: u32 = 0x02;
/// Header attribute bit enabling binary brackets around object bodies and
/// variable-length field blocks.
pub const ATTRIBUTE_BINARY_BRACKETS: u32 = 0x04;

/// Above this format version, bracket length prefixes widen from 4 to 8 bytes.
pub const WIDE_BRACKET_VERSION: u32 = 148;

/// What the container claims to transport.
///
/// The parser rejects `0` (unknown) and otherwise does not differentiate;
/// producers in the wild have been observed writing values outside the
/// documented set, which are preserved as [`ContainerKind::Other`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ContainerKind {
    /// A scene graph.
    Scene,
    /// A standalone image.
    Image,
    /// A generic object.
    Object,
    /// A nonzero kind outside the documented set.
    Other(u32),
}

impl ContainerKind {
    fn from_u32(kind: u32) -> Option<Self> {
        match kind {
            0 => None,
            1 => Some(Self::Scene),
            2 => Some(Self::Image),
            3 => Some(Self::Object),
            other => Some(Self::Other(other)),
        }
    }
}

/// The decoded fixed prologue of a scene stream.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Header {
    /// What the container transports.
    pub container_kind: ContainerKind,
    /// The format version; field layouts branch on this throughout the
    /// deserializer.
    pub version: u32,
    /// Whether object bodies and variable-length blocks carry binary
    /// brackets.
    pub use_brackets: bool,
}

impl Header {
    /// The width in bytes of a bracket length prefix for this stream, or 0
    /// when brackets are disabled. The prefix content is never interpreted.
    #[must_use]
    pub const fn bracket_len(&self) -> usize {
        if !self.use_brackets {
            0
        } else if self.version > WIDE_BRACKET_VERSION {
            8
        } else {
            4
        }
    }
}

/// Consumes the fixed prologue: magic, container kind, version, attribute
/// bitmask, and compressor name.
pub fn read_header(reader: &mut SliceReader<'_>) -> Result<Header> {
    if reader.read_u64()? != MAGIC {
        return Err(Error::new(reader.offset(), ErrorKind::InvalidMagic));
    }

    let kind = reader.read_u32()?;
    let container_kind = ContainerKind::from_u32(kind)
        .ok_or_else(|| Error::new(reader.offset(), ErrorKind::InvalidContainerKind))?;

    let version = reader.read_u32()?;

    let attributes = reader.read_u32()?;
    if attributes & (ATTRIBUTE_CUSTOM_DOMAINS | ATTRIBUTE_SCHEMA_DATA) != 0 {
        return Err(Error::new(
            reader.offset(),
            ErrorKind::UnsupportedAttribute(attributes),
        ));
    }

    let compressor = reader.read_string()?;
    if compressor != "0" {
        return Err(Error::new(
            reader.offset(),
            ErrorKind::UnsupportedCompressor(compressor),
        ));
    }

    Ok(Header {
        container_kind,
        version,
        use_brackets: attributes & ATTRIBUTE_BINARY_BRACKETS != 0,
    })
}

/// The element type of a vertex array.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ArrayType {
    /// Two f32s per element.
    Vec2f = 27,
    /// Three f32s per element.
    Vec3f = 28,
    /// Four f32s per element.
    Vec4f = 29,
}

impl ArrayType {
    /// The fixed byte width of one element.
    #[must_use]
    pub const fn element_size(self) -> usize {
        match self {
            Self::Vec2f => 8,
            Self::Vec3f => 12,
            Self::Vec4f => 16,
        }
    }

    /// Decodes the type tag used by the pre-112 inline array encoding.
    #[must_use]
    pub const fn from_inline_tag(tag: i32) -> Option<Self> {
        match tag {
            15 => Some(Self::Vec2f),
            16 => Some(Self::Vec3f),
            17 => Some(Self::Vec4f),
            _ => None,
        }
    }
}

/// How an array's elements map onto geometry.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Binding {
    /// No binding recorded (also the fallback for raw values outside the
    /// documented set).
    #[default]
    Undefined,
    /// The array is unused.
    Off,
    /// One element for the whole drawable.
    Overall,
    /// One element per primitive set.
    PerPrimitiveSet,
    /// One element per vertex.
    PerVertex,
}

impl Binding {
    /// Decodes the serialized binding value.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Off,
            1 => Self::Overall,
            2 => Self::PerPrimitiveSet,
            4 => Self::PerVertex,
            _ => Self::Undefined,
        }
    }
}

/// Which render bin a state set asks for.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RenderingHint {
    /// Inherit the parent's bin.
    #[default]
    DefaultBin,
    /// Render with opaque geometry.
    OpaqueBin,
    /// Render depth-sorted after opaque geometry.
    TransparentBin,
}

impl RenderingHint {
    /// Decodes the serialized hint; values outside the documented set map to
    /// [`RenderingHint::DefaultBin`].
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Self::OpaqueBin,
            2 => Self::TransparentBin,
            _ => Self::DefaultBin,
        }
    }
}

/// Texture coordinate wrapping, stored on the wire as raw GL enum values.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum WrapMode {
    /// GL_CLAMP
    Clamp,
    /// GL_CLAMP_TO_EDGE
    #[default]
    ClampToEdge,
    /// GL_CLAMP_TO_BORDER_ARB
    ClampToBorder,
    /// GL_REPEAT
    Repeat,
    /// GL_MIRRORED_REPEAT_IBM
    Mirror,
}

impl WrapMode {
    /// Decodes a GL wrap enum. Returns `None` for unrecognized values, in
    /// which case callers keep the [`WrapMode::ClampToEdge`] default.
    #[must_use]
    pub const fn from_gl(raw: u32) -> Option<Self> {
        match raw {
            0x2900 => Some(Self::Clamp),
            0x812F => Some(Self::ClampToEdge),
            0x812D => Some(Self::ClampToBorder),
            0x2901 => Some(Self::Repeat),
            0x8370 => Some(Self::Mirror),
            _ => None,
        }
    }
}

/// Two packed f32s.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Vec2f {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

/// Three packed f32s.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Vec3f {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

/// Four packed f32s.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Vec4f {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
    /// W component.
    pub w: f32,
}

/// Three packed f64s.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Vec3d {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

#[cfg(test)]
mod tests {
    use byteorder::{LittleEndian, WriteBytesExt};

    use super::*;

    fn header_bytes(kind: u32, version: u32, attributes: u32, compressor: &str) -> Vec<u8> {
        let mut out = Vec::new();
        out.write_u64::<LittleEndian>(MAGIC).unwrap();
        out.write_u32::<LittleEndian>(kind).unwrap();
        out.write_u32::<LittleEndian>(version).unwrap();
        out.write_u32::<LittleEndian>(attributes).unwrap();
        out.write_i32::<LittleEndian>(compressor.len() as i32).unwrap();
        out.extend_from_slice(compressor.as_bytes());
        out
    }

    #[test]
    fn header_roundtrip() {
        let bytes = header_bytes(1, 100, ATTRIBUTE_BINARY_BRACKETS, "0");
        let mut reader = SliceReader::from(bytes.as_slice());
        let header = read_header(&mut reader).unwrap();
        assert_eq!(header.container_kind, ContainerKind::Scene);
        assert_eq!(header.version, 100);
        assert!(header.use_brackets);
        assert!(reader.is_at_end());
    }

    #[test]
    fn bad_magic_fails_at_offset_8() {
        let mut bytes = header_bytes(1, 100, 0, "0");
        bytes[..8].fill(0);
        let error = read_header(&mut SliceReader::from(bytes.as_slice())).unwrap_err();
        assert_eq!(error.kind(), &ErrorKind::InvalidMagic);
        assert_eq!(error.offset(), 8);
    }

    #[test]
    fn container_kind_zero_rejected() {
        let bytes = header_bytes(0, 100, 0, "0");
        let error = read_header(&mut SliceReader::from(bytes.as_slice())).unwrap_err();
        assert_eq!(error.kind(), &ErrorKind::InvalidContainerKind);
        assert_eq!(error.offset(), 12);
    }

    #[test]
    fn undocumented_container_kind_preserved() {
        let bytes = header_bytes(7, 100, 0, "0");
        let header = read_header(&mut SliceReader::from(bytes.as_slice())).unwrap();
        assert_eq!(header.container_kind, ContainerKind::Other(7));
    }

    #[test]
    fn schema_and_domain_attributes_rejected() {
        for attributes in [ATTRIBUTE_CUSTOM_DOMAINS, ATTRIBUTE_SCHEMA_DATA, 0x03] {
            let bytes = header_bytes(1, 100, attributes, "0");
            let error = read_header(&mut SliceReader::from(bytes.as_slice())).unwrap_err();
            assert_eq!(error.kind(), &ErrorKind::UnsupportedAttribute(attributes));
            assert_eq!(error.offset(), 20);
        }
    }

    #[test]
    fn unsupported_compressor() {
        let bytes = header_bytes(1, 100, 0, "zlib");
        let error = read_header(&mut SliceReader::from(bytes.as_slice())).unwrap_err();
        assert_eq!(
            error.kind(),
            &ErrorKind::UnsupportedCompressor(String::from("zlib"))
        );
        // Detected just past the compressor string.
        assert_eq!(error.offset(), bytes.len());
    }

    #[test]
    fn bracket_widths_straddle_the_breakpoint() {
        let narrow = Header {
            container_kind: ContainerKind::Scene,
            version: WIDE_BRACKET_VERSION,
            use_brackets: true,
        };
        assert_eq!(narrow.bracket_len(), 4);
        let wide = Header {
            version: WIDE_BRACKET_VERSION + 1,
            ..narrow
        };
        assert_eq!(wide.bracket_len(), 8);
        let disabled = Header {
            use_brackets: false,
            ..wide
        };
        assert_eq!(disabled.bracket_len(), 0);
    }

    #[test]
    fn array_type_sizes() {
        assert_eq!(ArrayType::Vec2f.element_size(), 8);
        assert_eq!(ArrayType::Vec3f.element_size(), 12);
        assert_eq!(ArrayType::Vec4f.element_size(), 16);
        assert_eq!(ArrayType::from_inline_tag(15), Some(ArrayType::Vec2f));
        assert_eq!(ArrayType::from_inline_tag(16), Some(ArrayType::Vec3f));
        assert_eq!(ArrayType::from_inline_tag(17), Some(ArrayType::Vec4f));
        assert_eq!(ArrayType::from_inline_tag(18), None);
        assert_eq!(ArrayType::from_inline_tag(27), None);
    }

    #[test]
    fn binding_values() {
        assert_eq!(Binding::from_raw(-1), Binding::Undefined);
        assert_eq!(Binding::from_raw(0), Binding::Off);
        assert_eq!(Binding::from_raw(1), Binding::Overall);
        assert_eq!(Binding::from_raw(2), Binding::PerPrimitiveSet);
        assert_eq!(Binding::from_raw(4), Binding::PerVertex);
        assert_eq!(Binding::from_raw(3), Binding::Undefined);
    }

    #[test]
    fn wrap_modes() {
        assert_eq!(WrapMode::from_gl(0x2901), Some(WrapMode::Repeat));
        assert_eq!(WrapMode::from_gl(0x812F), Some(WrapMode::ClampToEdge));
        assert_eq!(WrapMode::from_gl(0xDEAD), None);
    }
}
