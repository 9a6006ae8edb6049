use std::fmt::Display;

/// An error produced while parsing a scene buffer.
///
/// Every error carries the byte offset of the cursor at the moment the
/// problem was detected, which for a forward-only reader is also the most
/// useful place to start looking at the input in a hex dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    offset: usize,
    kind: ErrorKind,
}

impl Error {
    pub(crate) const fn new(offset: usize, kind: ErrorKind) -> Self {
        Self { offset, kind }
    }

    /// The byte offset at which the error was detected.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// The kind of failure.
    #[must_use]
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

/// All ways a parse can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A read would have extended past the end of the input buffer.
    UnexpectedEof,
    /// The 8-byte magic at the start of the buffer did not match.
    InvalidMagic,
    /// The container kind field was 0 (`Unknown`).
    InvalidContainerKind,
    /// The header requested custom domains or schema data, neither of which
    /// this parser supports. Contains the offending attribute bitmask.
    UnsupportedAttribute(u32),
    /// The header named a compressor other than the literal `"0"`.
    UnsupportedCompressor(String),
    /// A boolean byte held a value other than 0 or 1.
    InvalidBool(u8),
    /// A length-prefixed string declared a negative length.
    InvalidStringLength(i32),
    /// An object carried a class tag that is not in the dispatch table.
    UnsupportedClass(String),
    /// An inline array used a type tag other than Vec2f/Vec3f/Vec4f.
    UnsupportedArrayType(i32),
    /// An embedded image was not stored in the inline-file form.
    UnsupportedImageDecision(u32),
    /// The stream used a documented-but-unsupported encoding feature.
    UnsupportedFeature(&'static str),
    /// The root object parsed successfully but bytes remain in the buffer.
    /// Contains the number of unread bytes.
    TrailingData(usize),
    /// Object nesting exceeded [`Config::max_depth`](crate::Config::max_depth).
    DepthLimitExceeded,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error at offset {}: {}", self.offset, self.kind)
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::UnexpectedEof => f.write_str("read beyond data length"),
            ErrorKind::InvalidMagic => f.write_str("invalid data magic"),
            ErrorKind::InvalidContainerKind => f.write_str("invalid container kind: 0"),
            ErrorKind::UnsupportedAttribute(attributes) => {
                write!(f, "unsupported attribute: {attributes:#x}")
            }
            ErrorKind::UnsupportedCompressor(name) => {
                write!(f, "unsupported compressor: {name}")
            }
            ErrorKind::InvalidBool(value) => write!(f, "invalid bool value: {value}"),
            ErrorKind::InvalidStringLength(length) => {
                write!(f, "invalid string length: {length}")
            }
            ErrorKind::UnsupportedClass(class) => {
                write!(f, "unsupported object class: {class}")
            }
            ErrorKind::UnsupportedArrayType(tag) => {
                write!(f, "unsupported array type: {tag}")
            }
            ErrorKind::UnsupportedImageDecision(decision) => {
                write!(f, "invalid image decision: {decision}")
            }
            ErrorKind::UnsupportedFeature(feature) => {
                write!(f, "unsupported feature: {feature}")
            }
            ErrorKind::TrailingData(remaining) => {
                write!(f, "extra data at end of input: {remaining} bytes remain")
            }
            ErrorKind::DepthLimitExceeded => {
                f.write_str("object nesting exceeds the configured depth limit")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_offset() {
        let error = Error::new(8, ErrorKind::InvalidMagic);
        assert_eq!(error.to_string(), "error at offset 8: invalid data magic");
        assert_eq!(error.offset(), 8);
        assert_eq!(error.kind(), &ErrorKind::InvalidMagic);
    }

    #[test]
    fn display_payloads() {
        assert_eq!(
            Error::new(20, ErrorKind::UnsupportedCompressor(String::from("zlib"))).to_string(),
            "error at offset 20: unsupported compressor: zlib"
        );
        assert_eq!(
            Error::new(99, ErrorKind::TrailingData(1)).to_string(),
            "error at offset 99: extra data at end of input: 1 bytes remain"
        );
    }
}
