use std::borrow::Cow;
use std::collections::HashMap;
use std::rc::Rc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::ErrorKind;
use crate::format::{self, ArrayType, Binding, Header, RenderingHint, Vec4f, WrapMode};
use crate::reader::SliceReader;
use crate::scene::{
    ArrayData, Geode, Geometry, Group, Image, Material, MaterialProperty, ObjectKind, ObjectRef,
    PagedLod, PrimitiveSetData, RangeData, Scene, SceneObject, StateSet, Texture2d, UserCenter,
};
use crate::{Error, Result};

/// Parses one scene stream: header, a single root object, then exact
/// end-of-input.
pub(crate) fn parse(data: &[u8], max_depth: usize) -> Result<Scene<'_>> {
    let mut input = SliceReader::from(data);
    let header = format::read_header(&mut input)?;

    let mut parser = Parser {
        input,
        header,
        depth: 0,
        max_depth,
        objects: HashMap::new(),
        images: HashMap::new(),
        arrays: HashMap::new(),
    };

    let root = parser.read_object()?;
    if parser.input.is_at_end() {
        Ok(Scene { root })
    } else {
        Err(Error::new(
            parser.input.offset(),
            ErrorKind::TrailingData(parser.input.remaining()),
        ))
    }
}

/// One parse session: the cursor, the stream header, and the three identity
/// registries that give back-references shared-instance semantics.
///
/// Field-reader methods mirror the wire's inheritance layering: each
/// `read_*_fields` routine consumes exactly the fields its layer contributes,
/// and the per-class readers chain them base-first.
#[derive(Debug)]
struct Parser<'de> {
    input: SliceReader<'de>,
    header: Header,
    depth: usize,
    max_depth: usize,
    objects: HashMap<u32, Rc<SceneObject<'de>>>,
    images: HashMap<u32, Rc<Image<'de>>>,
    arrays: HashMap<u32, Rc<SceneObject<'de>>>,
}

impl<'de> Parser<'de> {
    const fn version(&self) -> u32 {
        self.header.version
    }

    /// Skips a bracket's length prefix. The closing side of a bracket has no
    /// wire presence, so there is nothing to do when a block ends.
    fn skip_bracket(&mut self) -> Result<()> {
        self.input.skip(self.header.bracket_len())
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth == self.max_depth {
            Err(Error::new(
                self.input.offset(),
                ErrorKind::DepthLimitExceeded,
            ))
        } else {
            self.depth += 1;
            Ok(())
        }
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Reads one tagged object: class name, bracket, identity, then either a
    /// registry hit (back-reference, no payload) or the class's field-reader
    /// chain. New objects are registered once their fields are complete.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "trace", skip(self), fields(offset = self.input.offset()))
    )]
    fn read_object(&mut self) -> Result<ObjectRef<'de>> {
        let class_name = self.input.read_string()?;
        if class_name.is_empty() {
            return Ok(None);
        }

        self.enter()?;
        let object = self.read_object_body(&class_name);
        self.leave();
        object
    }

    fn read_object_body(&mut self, class_name: &str) -> Result<ObjectRef<'de>> {
        self.skip_bracket()?;
        let unique_id = self.input.read_u32()?;
        if let Some(existing) = self.objects.get(&unique_id) {
            return Ok(Some(existing.clone()));
        }

        let kind = match class_name {
            "osg::PagedLOD" => self.read_paged_lod()?,
            "osg::Group" => self.read_group()?,
            "osg::Geode" => self.read_geode()?,
            "osg::Geometry" => self.read_geometry()?,
            "osg::StateSet" => self.read_state_set()?,
            "osg::Material" => self.read_material()?,
            "osg::Texture2D" => self.read_texture2d()?,
            "osg::DefaultUserDataContainer" => self.read_user_data_container()?,
            "osg::DrawElementsUInt" => self.read_draw_elements()?,
            "osg::Vec3Array" => self.read_array_object(ArrayType::Vec3f)?,
            "osg::Vec2Array" => self.read_array_object(ArrayType::Vec2f)?,
            other => {
                return Err(Error::new(
                    self.input.offset(),
                    ErrorKind::UnsupportedClass(other.to_string()),
                ))
            }
        };

        let object = Rc::new(SceneObject { unique_id, kind });
        self.objects.insert(unique_id, object.clone());
        Ok(Some(object))
    }

    /// Reads a flag byte and, when set, the object that follows.
    fn read_object_if_flag(&mut self) -> Result<ObjectRef<'de>> {
        if self.input.read_bool()? {
            self.read_object()
        } else {
            Ok(None)
        }
    }

    fn read_state_set_if_flag(&mut self) -> Result<ObjectRef<'de>> {
        Ok(self
            .read_object_if_flag()?
            .filter(|object| object.as_state_set().is_some()))
    }

    fn read_array_if_flag(&mut self) -> Result<ObjectRef<'de>> {
        Ok(self
            .read_object_if_flag()?
            .filter(|object| object.as_array().is_some()))
    }

    // Per-class chains, in the wire's base-first order.

    fn read_group(&mut self) -> Result<ObjectKind<'de>> {
        self.read_object_fields()?;
        let state_set = self.read_node_fields()?;
        let children = self.read_child_list()?;
        Ok(ObjectKind::Group(Group {
            state_set,
            children,
        }))
    }

    fn read_paged_lod(&mut self) -> Result<ObjectKind<'de>> {
        self.read_object_fields()?;
        let mut lod = PagedLod {
            state_set: self.read_node_fields()?,
            ..PagedLod::default()
        };
        self.read_lod_fields(&mut lod)?;
        self.read_paged_lod_fields(&mut lod)?;
        Ok(ObjectKind::PagedLod(lod))
    }

    fn read_geode(&mut self) -> Result<ObjectKind<'de>> {
        self.read_object_fields()?;
        let state_set = self.read_node_fields()?;
        let mut drawables = Vec::new();
        if self.input.read_bool()? {
            let count = self.input.read_u32()?;
            self.skip_bracket()?;
            for _ in 0..count {
                let drawable = self.read_object()?;
                drawables.push(drawable.filter(|object| object.is_drawable()));
            }
        }
        Ok(ObjectKind::Geode(Geode {
            state_set,
            drawables,
        }))
    }

    fn read_geometry(&mut self) -> Result<ObjectKind<'de>> {
        self.read_object_fields()?;
        let mut geometry = Geometry::default();
        if self.version() >= 154 {
            geometry.state_set = self.read_node_fields()?;
        }
        self.read_drawable_fields(&mut geometry)?;
        self.read_geometry_fields(&mut geometry)?;
        Ok(ObjectKind::Geometry(geometry))
    }

    fn read_state_set(&mut self) -> Result<ObjectKind<'de>> {
        self.read_object_fields()?;
        let mut state_set = StateSet::default();
        self.read_state_set_fields(&mut state_set)?;
        Ok(ObjectKind::StateSet(state_set))
    }

    fn read_material(&mut self) -> Result<ObjectKind<'de>> {
        self.read_object_fields()?;
        self.read_state_attribute_fields()?;
        let mut material = Material::default();
        self.read_material_fields(&mut material)?;
        Ok(ObjectKind::Material(material))
    }

    fn read_texture2d(&mut self) -> Result<ObjectKind<'de>> {
        self.read_object_fields()?;
        self.read_state_attribute_fields()?;
        let mut texture = Texture2d::default();
        self.read_texture_fields(&mut texture)?;
        texture.image = self.read_image()?;
        self.input.read_u32()?; // texture width
        self.input.read_u32()?; // texture height
        Ok(ObjectKind::Texture2d(texture))
    }

    fn read_user_data_container(&mut self) -> Result<ObjectKind<'de>> {
        self.read_object_fields()?;
        if self.input.read_bool()? {
            // user data
            self.skip_bracket()?;
            self.read_object()?;
        }
        if self.input.read_bool()? {
            // descriptions
            let count = self.input.read_u32()?;
            self.skip_bracket()?;
            for _ in 0..count {
                self.input.read_string()?;
            }
        }
        if self.input.read_bool()? {
            // user objects
            let count = self.input.read_u32()?;
            self.skip_bracket()?;
            for _ in 0..count {
                self.read_object()?;
            }
        }
        Ok(ObjectKind::UserDataContainer)
    }

    fn read_draw_elements(&mut self) -> Result<ObjectKind<'de>> {
        self.read_object_fields()?;
        self.input.read_i32()?; // num instances
        let mode = self.input.read_u32()?;
        let index_count = self.input.read_u32()?;
        // The DrawElementsUInt layer consumes the payload the PrimitiveSet
        // layer located: index_count little-endian u32s.
        let indices = self.input.read_bytes(index_count as usize * 4)?;
        Ok(ObjectKind::PrimitiveSet(PrimitiveSetData {
            mode,
            index_count,
            indices: Cow::Borrowed(indices),
        }))
    }

    fn read_array_object(&mut self, array_type: ArrayType) -> Result<ObjectKind<'de>> {
        self.read_object_fields()?;
        let binding = Binding::from_raw(self.input.read_i32()?);
        let normalize = self.input.read_bool()?;
        self.input.read_bool()?; // preserve data type
        let element_count = self.input.read_u32()?;
        let data = self
            .input
            .read_bytes(element_count as usize * array_type.element_size())?;
        Ok(ObjectKind::Array(ArrayData {
            array_type,
            element_count,
            data: Cow::Borrowed(data),
            binding,
            normalize,
        }))
    }

    // Field layers.

    fn read_object_fields(&mut self) -> Result<()> {
        self.input.read_string()?; // name
        self.input.read_u32()?; // data variance
        if self.version() < 77 {
            // Legacy streams serialize the user-data object unconditionally;
            // a null is an empty class tag.
            self.read_object()?;
        } else {
            self.read_object_if_flag()?; // user data container
        }
        Ok(())
    }

    fn read_node_fields(&mut self) -> Result<ObjectRef<'de>> {
        if self.input.read_bool()? {
            // initial bound: center + radius
            self.skip_bracket()?;
            self.input.read_f64()?;
            self.input.read_f64()?;
            self.input.read_f64()?;
            self.input.read_f32()?;
        }
        for _ in 0..4 {
            // compute-bound, update, event, and cull callbacks
            self.read_object_if_flag()?;
        }
        self.input.read_bool()?; // culling active
        self.input.read_u32()?; // node mask
        if self.version() < 77 && self.input.read_bool()? {
            // descriptions
            let count = self.input.read_u32()?;
            self.skip_bracket()?;
            for _ in 0..count {
                self.input.read_string()?;
            }
        }
        self.read_state_set_if_flag()
    }

    fn read_child_list(&mut self) -> Result<Vec<ObjectRef<'de>>> {
        let mut children = Vec::new();
        if self.input.read_bool()? {
            let count = self.input.read_u32()?;
            self.skip_bracket()?;
            for _ in 0..count {
                let child = self.read_object()?;
                children.push(child.filter(|object| object.is_node()));
            }
        }
        Ok(children)
    }

    fn read_lod_fields(&mut self, lod: &mut PagedLod<'de>) -> Result<()> {
        lod.center_mode = self.input.read_i32()?;
        if self.input.read_bool()? {
            lod.user_center = Some(UserCenter {
                center: self.input.read_vec3d()?,
                radius: self.input.read_f64()?,
            });
        }
        self.input.read_u32()?; // range mode
        if self.input.read_bool()? {
            let count = self.input.read_u32()?;
            self.skip_bracket()?;
            for _ in 0..count {
                let min = self.input.read_f32()?;
                let max = self.input.read_f32()?;
                lod.ranges.push((min, max));
            }
        }
        Ok(())
    }

    fn read_paged_lod_fields(&mut self, lod: &mut PagedLod<'de>) -> Result<()> {
        if self.input.read_bool()? && self.input.read_bool()? {
            self.input.read_string()?; // database path
        }
        if self.version() < 70 {
            self.input.read_u32()?; // frame number of last traversal
        }
        self.input.read_u32()?; // children that cannot be expired
        self.input.read_bool()?; // disable external children paging
        if self.input.read_bool()? {
            let filename_count = self.input.read_u32()? as usize;
            lod.range_data.resize_with(filename_count, RangeData::default);
            self.skip_bracket()?;
            for entry in &mut lod.range_data {
                entry.filename = self.input.read_string()?;
            }

            // The priority list may be longer than the filename list; the
            // excess entries keep empty filenames.
            let priority_count = self.input.read_u32()? as usize;
            if priority_count > lod.range_data.len() {
                lod.range_data.resize_with(priority_count, RangeData::default);
            }
            self.skip_bracket()?;
            for index in 0..priority_count {
                lod.range_data[index].priority_offset = self.input.read_f32()?;
                lod.range_data[index].priority_scale = self.input.read_f32()?;
            }
        }
        lod.children = self.read_child_list()?;
        Ok(())
    }

    fn read_drawable_fields(&mut self, geometry: &mut Geometry<'de>) -> Result<()> {
        geometry.state_set = self.read_state_set_if_flag()?;
        if self.input.read_bool()? {
            // initial bounding box
            for _ in 0..6 {
                self.input.read_f64()?;
            }
        }
        self.read_object_if_flag()?; // compute-bounding-box callback
        self.read_object_if_flag()?; // shape
        self.input.read_bool()?; // supports display list
        self.input.read_bool()?; // use display list
        self.input.read_bool()?; // use vertex buffer objects
        self.read_object_if_flag()?; // update callback
        self.read_object_if_flag()?; // event callback
        self.read_object_if_flag()?; // cull callback
        self.read_object_if_flag()?; // draw callback
        Ok(())
    }

    fn read_geometry_fields(&mut self, geometry: &mut Geometry<'de>) -> Result<()> {
        let primitive_count = self.input.read_u32()?;
        if self.version() < 112 {
            self.skip_bracket()?;
            for _ in 0..primitive_count {
                self.input.read_u32()?; // num instances
                let mode = self.input.read_u32()?;
                let index_count = self.input.read_u32()?;
                let indices = self.input.read_bytes(index_count as usize * 4)?;
                // Inline primitive sets carry no identity and are never
                // registered.
                geometry.primitives.push(Some(Rc::new(SceneObject {
                    unique_id: 0,
                    kind: ObjectKind::PrimitiveSet(PrimitiveSetData {
                        mode,
                        index_count,
                        indices: Cow::Borrowed(indices),
                    }),
                })));
            }

            if self.input.read_bool()? {
                self.skip_bracket()?;
                geometry.vertex_data = self.read_inline_array()?;
            }
            for _ in 0..4 {
                // normals, colors, secondary colors, and fog coordinates are
                // serialized in the legacy form but not retained
                if self.input.read_bool()? {
                    self.skip_bracket()?;
                    self.read_inline_array()?;
                }
            }
            if self.input.read_bool()? {
                let count = self.input.read_u32()?;
                self.skip_bracket()?;
                for _ in 0..count {
                    self.skip_bracket()?;
                    let tex_coords = self.read_inline_array()?;
                    geometry.tex_coord_data.push(tex_coords);
                }
            }
            if self.input.read_bool()? {
                // vertex attribute arrays: consumed and discarded, leaving
                // the tex-coord list untouched
                let count = self.input.read_u32()?;
                self.skip_bracket()?;
                for _ in 0..count {
                    self.skip_bracket()?;
                    self.read_inline_array()?;
                }
            }
            self.input.read_bool()?; // fast path hint
        } else {
            for _ in 0..primitive_count {
                let primitives = self.read_object()?;
                geometry
                    .primitives
                    .push(primitives.filter(|object| object.as_primitive_set().is_some()));
            }
            geometry.vertex_data = self.read_array_if_flag()?;
            geometry.normal_data = self.read_array_if_flag()?;
            geometry.color_data = self.read_array_if_flag()?;
            geometry.secondary_color_data = self.read_array_if_flag()?;
            geometry.fog_coord_data = self.read_array_if_flag()?;
            let tex_coord_count = self.input.read_u32()?;
            for _ in 0..tex_coord_count {
                let tex_coords = self.read_object()?;
                geometry
                    .tex_coord_data
                    .push(tex_coords.filter(|object| object.as_array().is_some()));
            }
            let vertex_attrib_count = self.input.read_u32()?;
            for _ in 0..vertex_attrib_count {
                self.read_object()?; // vertex attribute arrays, discarded
            }
        }
        Ok(())
    }

    fn read_state_set_fields(&mut self, state_set: &mut StateSet<'de>) -> Result<()> {
        if self.input.read_bool()? {
            // modes
            let count = self.input.read_u32()?;
            self.skip_bracket()?;
            for _ in 0..count {
                let mode = self.input.read_u32()?;
                let value = self.input.read_u32()?;
                state_set.modes.push((mode, value));
            }
        }
        if self.input.read_bool()? {
            // attributes
            let count = self.input.read_u32()?;
            self.skip_bracket()?;
            for _ in 0..count {
                let attribute = self.read_object()?;
                let value = self.input.read_u32()?;
                if let Some(attribute) =
                    attribute.filter(|object| object.is_state_attribute())
                {
                    state_set.attributes.push((attribute, value));
                }
            }
        }
        if self.input.read_bool()? {
            // per-texture-unit modes
            let count = self.input.read_u32()?;
            self.skip_bracket()?;
            for _ in 0..count {
                let mut unit = Vec::new();
                let unit_count = self.input.read_u32()?;
                self.skip_bracket()?;
                for _ in 0..unit_count {
                    let mode = self.input.read_u32()?;
                    let value = self.input.read_u32()?;
                    unit.push((mode, value));
                }
                state_set.texture_modes.push(unit);
            }
        }
        if self.input.read_bool()? {
            // per-texture-unit attributes
            let count = self.input.read_u32()?;
            self.skip_bracket()?;
            for _ in 0..count {
                let mut unit = Vec::new();
                let unit_count = self.input.read_u32()?;
                self.skip_bracket()?;
                for _ in 0..unit_count {
                    let attribute = self.read_object()?;
                    let value = self.input.read_u32()?;
                    if let Some(attribute) =
                        attribute.filter(|object| object.is_state_attribute())
                    {
                        unit.push((attribute, value));
                    }
                }
                state_set.texture_attributes.push(unit);
            }
        }
        if self.input.read_bool()? {
            // uniforms, discarded
            let count = self.input.read_u32()?;
            self.skip_bracket()?;
            for _ in 0..count {
                self.read_object()?;
                self.input.read_u32()?;
            }
        }
        state_set.rendering_hint = RenderingHint::from_raw(self.input.read_u32()?);
        self.input.read_u32()?; // render bin mode
        self.input.read_u32()?; // bin number
        self.input.read_string()?; // bin name
        self.input.read_bool()?; // nest render bins
        self.read_object_if_flag()?;
        self.read_object_if_flag()?;
        if self.version() >= 151 && self.input.read_bool()? {
            // shader defines
            let count = self.input.read_u32()?;
            self.skip_bracket()?;
            for _ in 0..count {
                self.input.read_string()?;
                self.input.read_string()?;
                self.input.read_i32()?;
            }
        }
        Ok(())
    }

    fn read_state_attribute_fields(&mut self) -> Result<()> {
        self.read_object_if_flag()?; // update callback
        self.read_object_if_flag()?; // event callback
        Ok(())
    }

    fn read_material_fields(&mut self, material: &mut Material) -> Result<()> {
        self.input.read_u32()?; // color mode
        if self.input.read_bool()? {
            material.ambient = self.read_color_property()?;
        }
        if self.input.read_bool()? {
            material.diffuse = self.read_color_property()?;
        }
        if self.input.read_bool()? {
            material.specular = self.read_color_property()?;
        }
        if self.input.read_bool()? {
            material.emission = self.read_color_property()?;
        }
        if self.input.read_bool()? {
            material.shininess = MaterialProperty {
                front_and_back: self.input.read_bool()?,
                front: self.input.read_f32()?,
                back: self.input.read_f32()?,
            };
        }
        Ok(())
    }

    fn read_color_property(&mut self) -> Result<MaterialProperty<Vec4f>> {
        Ok(MaterialProperty {
            front_and_back: self.input.read_bool()?,
            front: self.input.read_vec4f()?,
            back: self.input.read_vec4f()?,
        })
    }

    fn read_texture_fields(&mut self, texture: &mut Texture2d<'de>) -> Result<()> {
        if self.input.read_bool()? {
            if let Some(mode) = WrapMode::from_gl(self.input.read_u32()?) {
                texture.wrap_s = mode;
            }
        }
        if self.input.read_bool()? {
            if let Some(mode) = WrapMode::from_gl(self.input.read_u32()?) {
                texture.wrap_t = mode;
            }
        }
        if self.input.read_bool()? {
            if let Some(mode) = WrapMode::from_gl(self.input.read_u32()?) {
                texture.wrap_r = mode;
            }
        }
        if self.input.read_bool()? {
            self.input.read_u32()?; // min filter
        }
        if self.input.read_bool()? {
            self.input.read_u32()?; // mag filter
        }
        self.input.read_f32()?; // max anisotropy
        self.input.read_bool()?; // use hardware mipmap generation
        self.input.read_bool()?; // unref image data after apply
        self.input.read_bool()?; // client storage hint
        self.input.read_bool()?; // resize non-power-of-two hint
        for _ in 0..4 {
            self.input.read_f64()?; // border color
        }
        self.input.read_i32()?; // border width
        self.input.read_i32()?; // internal format mode
        if self.input.read_bool()? {
            self.input.read_u32()?; // internal format
        }
        if self.input.read_bool()? {
            self.input.read_u32()?; // source format
        }
        if self.input.read_bool()? {
            self.input.read_u32()?; // source type
        }
        self.input.read_bool()?; // shadow comparison
        self.input.read_u32()?; // shadow comparison func
        self.input.read_u32()?; // shadow texture mode
        self.input.read_f32()?; // shadow ambient
        if (95..154).contains(&self.version()) && self.input.read_bool()? {
            self.input.skip(6 * 4)?; // retired image-attachment fields
        }
        if self.version() >= 98 && self.input.read_bool()? {
            self.input.read_string()?; // swizzle
        }
        if self.version() >= 155 {
            self.input.read_f32()?; // min lod
            self.input.read_f32()?; // max lod
            self.input.read_f32()?; // lod bias
        }
        Ok(())
    }

    /// Reads an embedded image reference. Only the inline-file storage form
    /// (decision 1) is supported: the payload is a zero-copy slice of the
    /// declared size, followed by the image's own object-layer fields.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "trace", skip(self), fields(offset = self.input.offset()))
    )]
    fn read_image(&mut self) -> Result<Option<Rc<Image<'de>>>> {
        if !self.input.read_bool()? {
            return Ok(None);
        }
        self.enter()?;
        let image = self.read_image_body();
        self.leave();
        image
    }

    fn read_image_body(&mut self) -> Result<Option<Rc<Image<'de>>>> {
        if self.version() > 94 {
            self.input.read_string()?; // class name
        }
        let unique_id = self.input.read_u32()?;
        if let Some(existing) = self.images.get(&unique_id) {
            return Ok(Some(existing.clone()));
        }

        self.input.read_string()?; // file name
        self.input.read_u32()?; // write hint
        let decision = self.input.read_u32()?;
        if decision != 1 {
            // 0 is IMAGE_INLINE_DATA, 2 is IMAGE_EXTERNAL
            return Err(Error::new(
                self.input.offset(),
                ErrorKind::UnsupportedImageDecision(decision),
            ));
        }
        let size = self.input.read_u32()?;
        let data = self.input.read_bytes(size as usize)?;
        let image = Rc::new(Image {
            unique_id,
            data: Cow::Borrowed(data),
        });
        self.images.insert(unique_id, image.clone());

        // The object layer trails the payload in this encoding.
        self.read_object_fields()?;
        Ok(Some(image))
    }

    /// Reads a pre-112 inline array: identity, type tag, elements, then
    /// binding and normalize trailers.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "trace", skip(self), fields(offset = self.input.offset()))
    )]
    fn read_inline_array(&mut self) -> Result<ObjectRef<'de>> {
        if !self.input.read_bool()? {
            return Ok(None);
        }
        let unique_id = self.input.read_u32()?;
        if let Some(existing) = self.arrays.get(&unique_id) {
            return Ok(Some(existing.clone()));
        }

        let tag = self.input.read_i32()?;
        let array_type = ArrayType::from_inline_tag(tag).ok_or_else(|| {
            Error::new(self.input.offset(), ErrorKind::UnsupportedArrayType(tag))
        })?;
        let element_count = self.input.read_u32()?;
        let data = self
            .input
            .read_bytes(element_count as usize * array_type.element_size())?;
        if self.input.read_bool()? {
            return Err(Error::new(
                self.input.offset(),
                ErrorKind::UnsupportedFeature("array with indices"),
            ));
        }
        let binding = Binding::from_raw(self.input.read_i32()?);
        let normalize = self.input.read_u32()? != 0;

        let array = Rc::new(SceneObject {
            unique_id,
            kind: ObjectKind::Array(ArrayData {
                array_type,
                element_count,
                data: Cow::Borrowed(data),
                binding,
                normalize,
            }),
        });
        self.arrays.insert(unique_id, array.clone());
        Ok(Some(array))
    }
}
