use std::borrow::Cow;
use std::collections::HashMap;
use std::rc::Rc;

use byteorder::{ByteOrder, LittleEndian};

use crate::format::{ArrayType, Binding, RenderingHint, Vec2f, Vec3d, Vec3f, Vec4f, WrapMode};

/// A reference slot inside the object graph.
///
/// `None` covers three wire situations that all present the same way to a
/// consumer: an explicit null (empty class tag), an absent optional field
/// (flag byte 0), and a reference whose class did not match the field's
/// expected type.
pub type ObjectRef<'buf> = Option<Rc<SceneObject<'buf>>>;

/// A parsed scene: the root entity plus the borrow of the input buffer that
/// all zero-copy payloads point into.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Scene<'buf> {
    /// The single top-level object of the stream. `None` when the stream
    /// serialized a null root.
    pub root: ObjectRef<'buf>,
}

impl<'buf> Scene<'buf> {
    /// Deep-copies every borrowed payload so the graph no longer references
    /// the input buffer, preserving shared instances: objects that were one
    /// allocation before the copy are one allocation after it.
    #[must_use]
    pub fn into_static(self) -> Scene<'static> {
        let mut owner = GraphOwner::default();
        Scene {
            root: self.root.as_ref().map(|root| owner.own_object(root)),
        }
    }
}

/// One deserialized entity, tagged with the identity the producer assigned.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SceneObject<'buf> {
    /// The producer-assigned identity used for back-references. 0 is a valid
    /// identity; inline primitive sets from the legacy encoding carry no
    /// identity and report 0.
    pub unique_id: u32,
    /// The class-specific payload.
    pub kind: ObjectKind<'buf>,
}

/// The per-class payload of a [`SceneObject`].
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ObjectKind<'buf> {
    /// `osg::Group` — an interior node with ordered children.
    Group(Group<'buf>),
    /// `osg::PagedLOD` — a level-of-detail node whose children may live in
    /// external tiles.
    PagedLod(PagedLod<'buf>),
    /// `osg::Geode` — a leaf node carrying drawables.
    Geode(Geode<'buf>),
    /// `osg::Geometry` — a drawable referencing arrays and primitive sets.
    Geometry(Geometry<'buf>),
    /// `osg::StateSet` — render state shared between nodes.
    StateSet(StateSet<'buf>),
    /// `osg::Material` — lighting properties.
    Material(Material),
    /// `osg::Texture2D` — a texture with an embedded image.
    Texture2d(Texture2d<'buf>),
    /// `osg::DefaultUserDataContainer` — consumed from the wire, contents
    /// discarded.
    UserDataContainer,
    /// `osg::DrawElementsUInt` — an indexed primitive set.
    PrimitiveSet(PrimitiveSetData<'buf>),
    /// `osg::Vec2Array` / `osg::Vec3Array` / `osg::Vec4Array`.
    Array(ArrayData<'buf>),
}

impl<'buf> SceneObject<'buf> {
    /// The wire class tag this object was dispatched from.
    #[must_use]
    pub const fn class_name(&self) -> &'static str {
        match &self.kind {
            ObjectKind::Group(_) => "osg::Group",
            ObjectKind::PagedLod(_) => "osg::PagedLOD",
            ObjectKind::Geode(_) => "osg::Geode",
            ObjectKind::Geometry(_) => "osg::Geometry",
            ObjectKind::StateSet(_) => "osg::StateSet",
            ObjectKind::Material(_) => "osg::Material",
            ObjectKind::Texture2d(_) => "osg::Texture2D",
            ObjectKind::UserDataContainer => "osg::DefaultUserDataContainer",
            ObjectKind::PrimitiveSet(_) => "osg::DrawElementsUInt",
            ObjectKind::Array(array) => match array.array_type {
                ArrayType::Vec2f => "osg::Vec2Array",
                ArrayType::Vec3f => "osg::Vec3Array",
                ArrayType::Vec4f => "osg::Vec4Array",
            },
        }
    }

    /// Whether this object can sit in a node slot (group, LOD, geode, or any
    /// drawable).
    #[must_use]
    pub const fn is_node(&self) -> bool {
        matches!(
            self.kind,
            ObjectKind::Group(_)
                | ObjectKind::PagedLod(_)
                | ObjectKind::Geode(_)
                | ObjectKind::Geometry(_)
        )
    }

    /// Whether this object can sit in a drawable slot.
    #[must_use]
    pub const fn is_drawable(&self) -> bool {
        matches!(self.kind, ObjectKind::Geometry(_))
    }

    /// Whether this object can sit in a state-attribute slot.
    #[must_use]
    pub const fn is_state_attribute(&self) -> bool {
        matches!(self.kind, ObjectKind::Material(_) | ObjectKind::Texture2d(_))
    }

    /// The state set attached to this object, if it is a node that carries
    /// one.
    #[must_use]
    pub fn state_set(&self) -> Option<&Rc<SceneObject<'buf>>> {
        match &self.kind {
            ObjectKind::Group(group) => group.state_set.as_ref(),
            ObjectKind::PagedLod(lod) => lod.state_set.as_ref(),
            ObjectKind::Geode(geode) => geode.state_set.as_ref(),
            ObjectKind::Geometry(geometry) => geometry.state_set.as_ref(),
            _ => None,
        }
    }

    /// The ordered child slots beneath this object: group/LOD children or
    /// geode drawables. Empty for everything else.
    #[must_use]
    pub fn children(&self) -> &[ObjectRef<'buf>] {
        match &self.kind {
            ObjectKind::Group(group) => &group.children,
            ObjectKind::PagedLod(lod) => &lod.children,
            ObjectKind::Geode(geode) => &geode.drawables,
            _ => &[],
        }
    }

    /// Returns the group payload, or `None` for any other class.
    #[must_use]
    pub const fn as_group(&self) -> Option<&Group<'buf>> {
        match &self.kind {
            ObjectKind::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Returns the paged-LOD payload, or `None` for any other class.
    #[must_use]
    pub const fn as_paged_lod(&self) -> Option<&PagedLod<'buf>> {
        match &self.kind {
            ObjectKind::PagedLod(lod) => Some(lod),
            _ => None,
        }
    }

    /// Returns the geode payload, or `None` for any other class.
    #[must_use]
    pub const fn as_geode(&self) -> Option<&Geode<'buf>> {
        match &self.kind {
            ObjectKind::Geode(geode) => Some(geode),
            _ => None,
        }
    }

    /// Returns the geometry payload, or `None` for any other class.
    #[must_use]
    pub const fn as_geometry(&self) -> Option<&Geometry<'buf>> {
        match &self.kind {
            ObjectKind::Geometry(geometry) => Some(geometry),
            _ => None,
        }
    }

    /// Returns the state-set payload, or `None` for any other class.
    #[must_use]
    pub const fn as_state_set(&self) -> Option<&StateSet<'buf>> {
        match &self.kind {
            ObjectKind::StateSet(state_set) => Some(state_set),
            _ => None,
        }
    }

    /// Returns the material payload, or `None` for any other class.
    #[must_use]
    pub const fn as_material(&self) -> Option<&Material> {
        match &self.kind {
            ObjectKind::Material(material) => Some(material),
            _ => None,
        }
    }

    /// Returns the texture payload, or `None` for any other class.
    #[must_use]
    pub const fn as_texture2d(&self) -> Option<&Texture2d<'buf>> {
        match &self.kind {
            ObjectKind::Texture2d(texture) => Some(texture),
            _ => None,
        }
    }

    /// Returns the primitive-set payload, or `None` for any other class.
    #[must_use]
    pub const fn as_primitive_set(&self) -> Option<&PrimitiveSetData<'buf>> {
        match &self.kind {
            ObjectKind::PrimitiveSet(primitives) => Some(primitives),
            _ => None,
        }
    }

    /// Returns the array payload, or `None` for any other class.
    #[must_use]
    pub const fn as_array(&self) -> Option<&ArrayData<'buf>> {
        match &self.kind {
            ObjectKind::Array(array) => Some(array),
            _ => None,
        }
    }
}

/// An interior node with an ordered child list.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Group<'buf> {
    /// Render state attached to this node.
    pub state_set: ObjectRef<'buf>,
    /// Child slots, in serialization order. Entries stay positional: a null
    /// or mismatched reference is `None`, not removed.
    pub children: Vec<ObjectRef<'buf>>,
}

/// A level-of-detail node whose higher-detail children page in from external
/// tile files.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PagedLod<'buf> {
    /// Render state attached to this node.
    pub state_set: ObjectRef<'buf>,
    /// How the LOD center is derived (serialized mode value).
    pub center_mode: i32,
    /// A user-specified center and radius, when the producer recorded one.
    pub user_center: Option<UserCenter>,
    /// `(min, max)` visibility ranges, one pair per child slot.
    pub ranges: Vec<(f32, f32)>,
    /// Paging records: external tile filename plus priority adjustments.
    /// May be longer than the filename list that was serialized; the excess
    /// entries have empty filenames.
    pub range_data: Vec<RangeData>,
    /// Inline (already-resident) child slots.
    pub children: Vec<ObjectRef<'buf>>,
}

/// An explicitly serialized LOD center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UserCenter {
    /// The center point.
    pub center: Vec3d,
    /// The bounding radius around it.
    pub radius: f64,
}

/// One external tile reference of a [`PagedLod`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RangeData {
    /// The external tile filename, possibly empty.
    pub filename: String,
    /// Additive paging priority adjustment.
    pub priority_offset: f32,
    /// Multiplicative paging priority adjustment.
    pub priority_scale: f32,
}

/// A leaf node carrying drawables.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Geode<'buf> {
    /// Render state attached to this node.
    pub state_set: ObjectRef<'buf>,
    /// Drawable slots, in serialization order.
    pub drawables: Vec<ObjectRef<'buf>>,
}

/// A drawable that assembles primitive sets over shared vertex arrays.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Geometry<'buf> {
    /// Render state attached to this drawable.
    pub state_set: ObjectRef<'buf>,
    /// Primitive-set slots, in serialization order.
    pub primitives: Vec<ObjectRef<'buf>>,
    /// Vertex positions.
    pub vertex_data: ObjectRef<'buf>,
    /// Per-vertex normals.
    pub normal_data: ObjectRef<'buf>,
    /// Per-vertex colors.
    pub color_data: ObjectRef<'buf>,
    /// Secondary colors.
    pub secondary_color_data: ObjectRef<'buf>,
    /// Fog coordinates.
    pub fog_coord_data: ObjectRef<'buf>,
    /// Texture-coordinate arrays, one slot per texture unit.
    pub tex_coord_data: Vec<ObjectRef<'buf>>,
}

/// Render state: mode switches, attribute objects, and per-texture-unit
/// copies of both.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StateSet<'buf> {
    /// `(GL mode, value)` switches.
    pub modes: Vec<(u32, u32)>,
    /// `(attribute, override value)` pairs. References that did not decode
    /// to a state attribute are dropped.
    pub attributes: Vec<(Rc<SceneObject<'buf>>, u32)>,
    /// Mode switches per texture unit.
    pub texture_modes: Vec<Vec<(u32, u32)>>,
    /// Attribute pairs per texture unit, with the same drop rule as
    /// [`StateSet::attributes`].
    pub texture_attributes: Vec<Vec<(Rc<SceneObject<'buf>>, u32)>>,
    /// Which render bin this state asks for.
    pub rendering_hint: RenderingHint,
}

/// A front/back pair of material values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MaterialProperty<T> {
    /// Whether one value was recorded for both faces.
    pub front_and_back: bool,
    /// The front-face value.
    pub front: T,
    /// The back-face value.
    pub back: T,
}

/// Classic lighting-model material properties.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Material {
    /// Ambient reflectance.
    pub ambient: MaterialProperty<Vec4f>,
    /// Diffuse reflectance.
    pub diffuse: MaterialProperty<Vec4f>,
    /// Specular reflectance.
    pub specular: MaterialProperty<Vec4f>,
    /// Emitted color.
    pub emission: MaterialProperty<Vec4f>,
    /// Specular exponent.
    pub shininess: MaterialProperty<f32>,
}

/// A 2D texture with its embedded image.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Texture2d<'buf> {
    /// Wrapping along S.
    pub wrap_s: WrapMode,
    /// Wrapping along T.
    pub wrap_t: WrapMode,
    /// Wrapping along R.
    pub wrap_r: WrapMode,
    /// The embedded image, when one was serialized.
    pub image: Option<Rc<Image<'buf>>>,
}

/// An encoded image file carried inside the stream.
///
/// The payload is the raw container bytes (PNG, JPEG, …); decoding them is
/// the caller's business.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Image<'buf> {
    /// The producer-assigned identity used for back-references.
    pub unique_id: u32,
    /// The encoded image file bytes, borrowed from the input buffer.
    pub data: Cow<'buf, [u8]>,
}

/// An indexed primitive batch.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PrimitiveSetData<'buf> {
    /// The GL primitive mode (GL_TRIANGLES and friends), kept raw.
    pub mode: u32,
    /// The number of u32 indices.
    pub index_count: u32,
    /// The index payload, borrowed from the input buffer:
    /// `index_count * 4` bytes of little-endian u32s.
    pub indices: Cow<'buf, [u8]>,
}

impl PrimitiveSetData<'_> {
    /// Decodes index `index`, or `None` past the end.
    #[must_use]
    pub fn index(&self, index: usize) -> Option<u32> {
        let start = index.checked_mul(4)?;
        let bytes = self.indices.get(start..start + 4)?;
        Some(LittleEndian::read_u32(bytes))
    }
}

/// A typed vertex attribute array.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArrayData<'buf> {
    /// The element type, which fixes the element byte width.
    pub array_type: ArrayType,
    /// The number of elements.
    pub element_count: u32,
    /// The element payload, borrowed from the input buffer:
    /// `element_count * element_size` bytes.
    pub data: Cow<'buf, [u8]>,
    /// How elements map onto geometry.
    pub binding: Binding,
    /// Whether fixed-point values are normalized on upload.
    pub normalize: bool,
}

impl ArrayData<'_> {
    /// The fixed byte width of one element.
    #[must_use]
    pub const fn element_size(&self) -> usize {
        self.array_type.element_size()
    }

    fn element(&self, index: usize) -> Option<&[u8]> {
        let size = self.element_size();
        let start = index.checked_mul(size)?;
        self.data.get(start..start + size)
    }

    /// Decodes element `index` as a [`Vec2f`]. `None` past the end or when
    /// the element type is wider than two floats.
    #[must_use]
    pub fn vec2(&self, index: usize) -> Option<Vec2f> {
        if self.array_type != ArrayType::Vec2f {
            return None;
        }
        let bytes = self.element(index)?;
        Some(Vec2f {
            x: LittleEndian::read_f32(&bytes[0..]),
            y: LittleEndian::read_f32(&bytes[4..]),
        })
    }

    /// Decodes element `index` as a [`Vec3f`]. `None` past the end or for a
    /// different element type.
    #[must_use]
    pub fn vec3(&self, index: usize) -> Option<Vec3f> {
        if self.array_type != ArrayType::Vec3f {
            return None;
        }
        let bytes = self.element(index)?;
        Some(Vec3f {
            x: LittleEndian::read_f32(&bytes[0..]),
            y: LittleEndian::read_f32(&bytes[4..]),
            z: LittleEndian::read_f32(&bytes[8..]),
        })
    }

    /// Decodes element `index` as a [`Vec4f`]. `None` past the end or for a
    /// different element type.
    #[must_use]
    pub fn vec4(&self, index: usize) -> Option<Vec4f> {
        if self.array_type != ArrayType::Vec4f {
            return None;
        }
        let bytes = self.element(index)?;
        Some(Vec4f {
            x: LittleEndian::read_f32(&bytes[0..]),
            y: LittleEndian::read_f32(&bytes[4..]),
            z: LittleEndian::read_f32(&bytes[8..]),
            w: LittleEndian::read_f32(&bytes[12..]),
        })
    }
}

/// Walks a borrowed graph and rebuilds it with owned payloads, mapping each
/// source allocation to exactly one target allocation so shared references
/// stay shared. The graph is acyclic by construction (back-references only
/// ever point at completed objects), so plain recursion terminates.
#[derive(Default)]
struct GraphOwner<'buf> {
    objects: HashMap<*const SceneObject<'buf>, Rc<SceneObject<'static>>>,
    images: HashMap<*const Image<'buf>, Rc<Image<'static>>>,
}

impl<'buf> GraphOwner<'buf> {
    fn own_object(&mut self, object: &Rc<SceneObject<'buf>>) -> Rc<SceneObject<'static>> {
        let key = Rc::as_ptr(object);
        if let Some(owned) = self.objects.get(&key) {
            return owned.clone();
        }

        let kind = match &object.kind {
            ObjectKind::Group(group) => ObjectKind::Group(Group {
                state_set: self.own_ref(&group.state_set),
                children: self.own_refs(&group.children),
            }),
            ObjectKind::PagedLod(lod) => ObjectKind::PagedLod(PagedLod {
                state_set: self.own_ref(&lod.state_set),
                center_mode: lod.center_mode,
                user_center: lod.user_center,
                ranges: lod.ranges.clone(),
                range_data: lod.range_data.clone(),
                children: self.own_refs(&lod.children),
            }),
            ObjectKind::Geode(geode) => ObjectKind::Geode(Geode {
                state_set: self.own_ref(&geode.state_set),
                drawables: self.own_refs(&geode.drawables),
            }),
            ObjectKind::Geometry(geometry) => ObjectKind::Geometry(Geometry {
                state_set: self.own_ref(&geometry.state_set),
                primitives: self.own_refs(&geometry.primitives),
                vertex_data: self.own_ref(&geometry.vertex_data),
                normal_data: self.own_ref(&geometry.normal_data),
                color_data: self.own_ref(&geometry.color_data),
                secondary_color_data: self.own_ref(&geometry.secondary_color_data),
                fog_coord_data: self.own_ref(&geometry.fog_coord_data),
                tex_coord_data: self.own_refs(&geometry.tex_coord_data),
            }),
            ObjectKind::StateSet(state_set) => ObjectKind::StateSet(StateSet {
                modes: state_set.modes.clone(),
                attributes: state_set
                    .attributes
                    .iter()
                    .map(|(attribute, value)| (self.own_object(attribute), *value))
                    .collect(),
                texture_modes: state_set.texture_modes.clone(),
                texture_attributes: state_set
                    .texture_attributes
                    .iter()
                    .map(|unit| {
                        unit.iter()
                            .map(|(attribute, value)| (self.own_object(attribute), *value))
                            .collect()
                    })
                    .collect(),
                rendering_hint: state_set.rendering_hint,
            }),
            ObjectKind::Material(material) => ObjectKind::Material(*material),
            ObjectKind::Texture2d(texture) => ObjectKind::Texture2d(Texture2d {
                wrap_s: texture.wrap_s,
                wrap_t: texture.wrap_t,
                wrap_r: texture.wrap_r,
                image: texture.image.as_ref().map(|image| self.own_image(image)),
            }),
            ObjectKind::UserDataContainer => ObjectKind::UserDataContainer,
            ObjectKind::PrimitiveSet(primitives) => ObjectKind::PrimitiveSet(PrimitiveSetData {
                mode: primitives.mode,
                index_count: primitives.index_count,
                indices: Cow::Owned(primitives.indices.to_vec()),
            }),
            ObjectKind::Array(array) => ObjectKind::Array(ArrayData {
                array_type: array.array_type,
                element_count: array.element_count,
                data: Cow::Owned(array.data.to_vec()),
                binding: array.binding,
                normalize: array.normalize,
            }),
        };

        let owned = Rc::new(SceneObject {
            unique_id: object.unique_id,
            kind,
        });
        self.objects.insert(key, owned.clone());
        owned
    }

    fn own_image(&mut self, image: &Rc<Image<'buf>>) -> Rc<Image<'static>> {
        let key = Rc::as_ptr(image);
        if let Some(owned) = self.images.get(&key) {
            return owned.clone();
        }
        let owned = Rc::new(Image {
            unique_id: image.unique_id,
            data: Cow::Owned(image.data.to_vec()),
        });
        self.images.insert(key, owned.clone());
        owned
    }

    fn own_ref(&mut self, slot: &ObjectRef<'buf>) -> ObjectRef<'static> {
        slot.as_ref().map(|object| self.own_object(object))
    }

    fn own_refs(&mut self, slots: &[ObjectRef<'buf>]) -> Vec<ObjectRef<'static>> {
        slots.iter().map(|slot| self.own_ref(slot)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec3_array(data: &[u8], element_count: u32) -> ArrayData<'_> {
        ArrayData {
            array_type: ArrayType::Vec3f,
            element_count,
            data: Cow::Borrowed(data),
            binding: Binding::PerVertex,
            normalize: false,
        }
    }

    #[test]
    fn array_element_access() {
        let mut bytes = Vec::new();
        for value in [1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        let array = vec3_array(&bytes, 2);
        assert_eq!(array.element_size(), 12);
        assert_eq!(array.vec3(0), Some(Vec3f { x: 1.0, y: 2.0, z: 3.0 }));
        assert_eq!(array.vec3(1), Some(Vec3f { x: 4.0, y: 5.0, z: 6.0 }));
        assert_eq!(array.vec3(2), None);
        // Wrong-typed accessors refuse rather than reinterpret.
        assert_eq!(array.vec2(0), None);
        assert_eq!(array.vec4(0), None);
    }

    #[test]
    fn primitive_index_access() {
        let mut bytes = Vec::new();
        for value in [7_u32, 8, 9] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        let primitives = PrimitiveSetData {
            mode: 4,
            index_count: 3,
            indices: Cow::Borrowed(&bytes),
        };
        assert_eq!(primitives.index(0), Some(7));
        assert_eq!(primitives.index(2), Some(9));
        assert_eq!(primitives.index(3), None);
    }

    #[test]
    fn class_names() {
        let array = SceneObject {
            unique_id: 1,
            kind: ObjectKind::Array(vec3_array(&[], 0)),
        };
        assert_eq!(array.class_name(), "osg::Vec3Array");
        assert!(!array.is_node());

        let group = SceneObject {
            unique_id: 2,
            kind: ObjectKind::Group(Group::default()),
        };
        assert_eq!(group.class_name(), "osg::Group");
        assert!(group.is_node());
        assert!(!group.is_drawable());
    }

    #[test]
    fn into_static_preserves_sharing() {
        let payload = vec![0_u8; 24];
        let owned = {
            let shared = Rc::new(SceneObject {
                unique_id: 7,
                kind: ObjectKind::Array(vec3_array(&payload, 2)),
            });
            let geometry = Rc::new(SceneObject {
                unique_id: 3,
                kind: ObjectKind::Geometry(Geometry {
                    normal_data: Some(shared.clone()),
                    color_data: Some(shared),
                    ..Geometry::default()
                }),
            });
            let root = Rc::new(SceneObject {
                unique_id: 1,
                kind: ObjectKind::Group(Group {
                    state_set: None,
                    children: vec![Some(geometry), None],
                }),
            });
            Scene { root: Some(root) }.into_static()
        };
        drop(payload);

        let root = owned.root.unwrap();
        let group = root.as_group().unwrap();
        assert_eq!(group.children.len(), 2);
        assert!(group.children[1].is_none());
        let geometry = group.children[0].as_ref().unwrap().as_geometry().unwrap();
        let normals = geometry.normal_data.as_ref().unwrap();
        let colors = geometry.color_data.as_ref().unwrap();
        assert!(Rc::ptr_eq(normals, colors));
        assert_eq!(normals.unique_id, 7);
        assert!(matches!(
            normals.as_array().unwrap().data,
            Cow::Owned(_)
        ));
    }
}
