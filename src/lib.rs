//! A read-only, zero-copy parser for the OpenSceneGraph native binary scene
//! format ("OSGB"), the container used to ship 3D tiled geospatial content.
//!
//! Given a contiguous byte buffer, [`from_slice`] materializes the scene
//! graph it serializes: groups, paged levels-of-detail, geodes, geometries,
//! state sets, materials, textures, images, vertex arrays, and primitive
//! sets. Vertex, index, and image payloads are borrowed slices into the
//! input buffer; the graph cannot outlive the buffer unless you opt into
//! copying with [`Scene::into_static`].
//!
//! The deserializer understands the version-conditioned field layouts used
//! across format versions 70 through 155+, shared back-references by object
//! identity, and the optional "binary bracket" block framing. Compressed,
//! schema-driven, and custom-domain containers are rejected.
//!
//! ```rust
//! // A minimal stream: header plus a null root object.
//! let mut data = Vec::new();
//! data.extend_from_slice(&0x1AFB_4545_6C91_0EA1_u64.to_le_bytes()); // magic
//! data.extend_from_slice(&1_u32.to_le_bytes()); // scene container
//! data.extend_from_slice(&148_u32.to_le_bytes()); // format version
//! data.extend_from_slice(&4_u32.to_le_bytes()); // binary brackets enabled
//! data.extend_from_slice(&1_i32.to_le_bytes()); // compressor name: "0"
//! data.push(b'0');
//! data.extend_from_slice(&0_i32.to_le_bytes()); // empty class tag: null root
//!
//! let scene = osgb::from_slice(&data).unwrap();
//! assert!(scene.root.is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::cargo,
    missing_docs,
    clippy::nursery,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms,
)]
#![allow(
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::module_name_repetitions,
)]

mod de;
mod error;
/// Wire-level vocabulary: the stream header and the constants and enums that
/// field values decode into.
pub mod format;
/// The low-level cursor over the input buffer.
pub mod reader;
/// The object graph a parse produces.
pub mod scene;

pub use self::error::{Error, ErrorKind};
pub use self::scene::{ObjectKind, ObjectRef, Scene, SceneObject};

/// A result alias that returns [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Parses a scene from a byte buffer with the default configuration.
pub fn from_slice(data: &[u8]) -> Result<Scene<'_>> {
    Config::default().parse(data)
}

/// Parsing configuration.
#[must_use]
pub struct Config {
    max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

impl Config {
    /// Sets the maximum object nesting depth.
    ///
    /// Well-formed tile content nests a handful of levels; the limit exists
    /// so that malformed input which nests objects through user-data
    /// containers or images fails with
    /// [`ErrorKind::DepthLimitExceeded`] instead of exhausting the stack.
    ///
    /// The default is 256.
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Parses a scene from a byte buffer using the configured options.
    ///
    /// The returned graph borrows `data`: arrays, primitive-set indices, and
    /// image payloads are zero-copy slices into it.
    pub fn parse<'de>(&self, data: &'de [u8]) -> Result<Scene<'de>> {
        de::parse(data, self.max_depth)
    }
}
