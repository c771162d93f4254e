//! URDF XML parser and tree builder.
//!
//! Parsing runs in two passes over the same document. The first pass
//! collects the robot name and the robot-scope material table (visuals
//! may reference materials declared after them). The second pass builds
//! links and joints, wires them into a [`Robot`], and records a
//! [`MeshRequest`] for every mesh visual instead of loading anything.

use nalgebra::{Unit, Vector3};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::io::BufRead;
use tracing::warn;

use crate::error::{Result, UrdfError};
use crate::frame::Frame;
use crate::geometry::{Attachment, Geometry};
use crate::joint::{Joint, JointLimit, JointType};
use crate::link::{Link, LinkId};
use crate::loader::UrdfLoader;
use crate::material::{Material, MaterialLibrary};
use crate::mesh::{MeshRequest, extension_of};
use crate::package::resolve_mesh_path;
use crate::robot::Robot;

/// Output of the parse phase: the finished tree plus pending mesh work.
///
/// The tree is complete and internally consistent; no mesh callback has
/// run yet.
#[derive(Debug, Clone)]
pub struct ParsedRobot {
    /// The fully wired kinematic tree.
    pub robot: Robot,
    /// Mesh visuals awaiting resolution through a mesh callback.
    pub mesh_requests: Vec<MeshRequest>,
}

/// Parse a URDF document using the given loader configuration.
///
/// # Errors
///
/// Returns an error if the XML is malformed, a required element or
/// attribute is missing, a joint has an unknown type or references an
/// undefined link, or (in strict mode) a link or joint name repeats.
pub(crate) fn parse_document(xml: &str, options: &UrdfLoader) -> Result<ParsedRobot> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let (name, materials) = scan_robot_scope(&mut reader, options)?;

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    build_tree(&mut reader, name, &materials, options)
}

// ============================================================================
// Pass 1: robot name and robot-scope materials
// ============================================================================

fn scan_robot_scope<R: BufRead>(
    reader: &mut Reader<R>,
    options: &UrdfLoader,
) -> Result<(String, MaterialLibrary)> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"robot" => {
                let name = get_attribute_opt(e, "name").unwrap_or_default();
                let materials = collect_materials(reader, options)?;
                return Ok((name, materials));
            }
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"robot" => {
                let name = get_attribute_opt(e, "name").unwrap_or_default();
                return Ok((name, MaterialLibrary::new()));
            }
            Ok(Event::Eof) => {
                return Err(UrdfError::missing_element("robot", "URDF document"));
            }
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }
}

fn collect_materials<R: BufRead>(
    reader: &mut Reader<R>,
    options: &UrdfLoader,
) -> Result<MaterialLibrary> {
    let mut library = MaterialLibrary::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                if elem_name == b"material" {
                    let name = get_attribute_opt(e, "name");
                    let mut material = parse_material_body(reader, options)?;
                    material.name = name;
                    store_robot_material(&mut library, material);
                } else {
                    skip_element(reader, &elem_name)?;
                }
            }
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"material" => {
                let material = Material {
                    name: get_attribute_opt(e, "name"),
                    ..Material::default()
                };
                store_robot_material(&mut library, material);
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"robot" => break,
            Ok(Event::Eof) => return Err(UrdfError::XmlParse("unexpected EOF in robot".into())),
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(library)
}

fn store_robot_material(library: &mut MaterialLibrary, material: Material) {
    match &material.name {
        Some(name) => {
            let name = name.clone();
            if !library.insert(material) {
                warn!("duplicate material '{}', keeping the first one", name);
            }
        }
        None => warn!("ignoring unnamed robot-scope material"),
    }
}

// ============================================================================
// Pass 2: links, joints, wiring
// ============================================================================

/// Joint data as read from the document, before link names are resolved.
struct RawJoint {
    name: String,
    kind: JointType,
    origin_xyz: Vector3<f64>,
    origin_rpy: Vector3<f64>,
    axis: Option<Vector3<f64>>,
    limit: JointLimit,
    parent: String,
    child: String,
    source_offset: usize,
}

/// A mesh visual parsed out of a link, before the link has an id.
struct PendingMesh {
    path: String,
    extension: String,
    frame: Frame,
    material: Material,
}

enum ParsedVisual {
    Ready(Attachment),
    Pending(PendingMesh),
    Skipped,
}

enum RawGeometry {
    Primitive(Geometry),
    Mesh {
        filename: String,
        scale: Vector3<f64>,
    },
}

struct VisualContext<'a> {
    materials: &'a MaterialLibrary,
    options: &'a UrdfLoader,
}

#[allow(clippy::too_many_lines)]
fn build_tree<R: BufRead>(
    reader: &mut Reader<R>,
    name: String,
    materials: &MaterialLibrary,
    options: &UrdfLoader,
) -> Result<ParsedRobot> {
    let mut robot = Robot::new(name);
    let mut mesh_requests: Vec<MeshRequest> = Vec::new();
    let mut raw_joints: Vec<RawJoint> = Vec::new();
    let ctx = VisualContext { materials, options };
    let mut buf = Vec::new();
    let mut in_robot = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if !in_robot => {
                if e.name().as_ref() == b"robot" {
                    in_robot = true;
                }
            }
            Ok(Event::Empty(ref e)) if !in_robot => {
                if e.name().as_ref() == b"robot" {
                    break;
                }
            }
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                match elem_name.as_slice() {
                    b"link" => {
                        let offset = position(reader);
                        let (link, pending) = parse_link(reader, e, &ctx, offset)?;
                        let id = insert_link(&mut robot, link, options.strict_names)?;
                        mesh_requests.extend(pending.into_iter().map(|mesh| MeshRequest {
                            link: id,
                            path: mesh.path,
                            extension: mesh.extension,
                            frame: mesh.frame,
                            material: mesh.material,
                        }));
                    }
                    b"joint" => {
                        let offset = position(reader);
                        raw_joints.push(parse_joint(reader, e, offset)?);
                    }
                    // Materials were collected in the first pass.
                    _ => skip_element(reader, &elem_name)?,
                }
            }
            Ok(Event::Empty(ref e)) if in_robot => match e.name().as_ref() {
                b"link" => {
                    let mut link = Link::new(get_attribute(e, "name")?);
                    link.source_offset = position(reader);
                    insert_link(&mut robot, link, options.strict_names)?;
                }
                b"joint" => {
                    let name = get_attribute(e, "name")?;
                    let type_str = get_attribute(e, "type")?;
                    JointType::from_str(&type_str)
                        .ok_or_else(|| UrdfError::UnknownJointType(type_str))?;
                    return Err(UrdfError::missing_element("parent", format!("joint '{name}'")));
                }
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"robot" => break,
            Ok(Event::Eof) => {
                if in_robot {
                    return Err(UrdfError::XmlParse("unexpected EOF in robot".into()));
                }
                return Err(UrdfError::missing_element("robot", "URDF document"));
            }
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    wire_joints(&mut robot, raw_joints, options.strict_names)?;
    robot.rebuild_roots();
    robot.update_world_transforms();

    Ok(ParsedRobot {
        robot,
        mesh_requests,
    })
}

fn insert_link(robot: &mut Robot, link: Link, strict: bool) -> Result<LinkId> {
    if strict && robot.link_id(&link.name).is_some() {
        return Err(UrdfError::DuplicateLink(link.name));
    }
    Ok(robot.insert_link(link))
}

fn wire_joints(robot: &mut Robot, raw_joints: Vec<RawJoint>, strict: bool) -> Result<()> {
    for raw in raw_joints {
        if strict && robot.joint_id(&raw.name).is_some() {
            return Err(UrdfError::DuplicateJoint(raw.name));
        }
        let parent = match robot.link_id(&raw.parent) {
            Some(id) => id,
            None => return Err(UrdfError::undefined_link(raw.parent, raw.name)),
        };
        let child = match robot.link_id(&raw.child) {
            Some(id) => id,
            None => return Err(UrdfError::undefined_link(raw.child, raw.name)),
        };

        let mut joint = Joint::new(raw.name, raw.kind, parent, child);
        joint.axis = raw.axis;
        joint.limit = raw.limit;
        joint.frame = Frame::from_origin(raw.origin_xyz, raw.origin_rpy);
        joint.source_offset = raw.source_offset;

        let joint_id = robot.insert_joint(joint);
        if let Some(link) = robot.link_by_id_mut(parent) {
            link.children.push(joint_id);
        }
        if let Some(link) = robot.link_by_id_mut(child) {
            // A second joint claiming the same child re-parents it; the
            // earlier edge goes stale.
            link.parent_joint = Some(joint_id);
        }
    }
    Ok(())
}

// ============================================================================
// Links and visuals
// ============================================================================

fn parse_link<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
    ctx: &VisualContext<'_>,
    source_offset: usize,
) -> Result<(Link, Vec<PendingMesh>)> {
    let mut link = Link::new(get_attribute(start, "name")?);
    link.source_offset = source_offset;
    let mut pending = Vec::new();
    let source_tag = ctx.options.link_source.tag().as_bytes();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                if elem_name == source_tag {
                    match parse_visual(reader, ctx)? {
                        ParsedVisual::Ready(attachment) => link.attachments.push(attachment),
                        ParsedVisual::Pending(mesh) => pending.push(mesh),
                        ParsedVisual::Skipped => {}
                    }
                } else {
                    skip_element(reader, &elem_name)?;
                }
            }
            Ok(Event::Empty(ref e)) if e.name().as_ref() == source_tag => {
                return Err(UrdfError::missing_element(
                    "geometry",
                    format!("{} in link '{}'", ctx.options.link_source.tag(), link.name),
                ));
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"link" => break,
            Ok(Event::Eof) => return Err(UrdfError::XmlParse("unexpected EOF in link".into())),
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok((link, pending))
}

fn parse_visual<R: BufRead>(
    reader: &mut Reader<R>,
    ctx: &VisualContext<'_>,
) -> Result<ParsedVisual> {
    let tag = ctx.options.link_source.tag();
    let mut origin_xyz = Vector3::zeros();
    let mut origin_rpy = Vector3::zeros();
    let mut geometry: Option<RawGeometry> = None;
    let mut material = Material::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                match elem_name.as_slice() {
                    b"origin" => (origin_xyz, origin_rpy) = parse_origin(e)?,
                    b"geometry" => geometry = Some(parse_geometry(reader)?),
                    b"material" => apply_visual_material(reader, e, ctx, &mut material, true)?,
                    _ => skip_element(reader, &elem_name)?,
                }
            }
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"origin" => (origin_xyz, origin_rpy) = parse_origin(e)?,
                b"geometry" => return Err(UrdfError::missing_element("shape", "geometry")),
                b"material" => apply_visual_material(reader, e, ctx, &mut material, false)?,
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == tag.as_bytes() => break,
            Ok(Event::Eof) => {
                return Err(UrdfError::XmlParse(format!("unexpected EOF in {tag}")));
            }
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    let Some(raw) = geometry else {
        return Err(UrdfError::missing_element("geometry", tag));
    };

    let mut frame = Frame::from_origin(origin_xyz, origin_rpy);
    match raw {
        RawGeometry::Primitive(geometry) => Ok(ParsedVisual::Ready(Attachment {
            frame,
            geometry,
            material,
        })),
        RawGeometry::Mesh { filename, scale } => {
            match resolve_mesh_path(&ctx.options.packages, &filename, &ctx.options.working_path) {
                Some(path) => {
                    frame.scale = scale;
                    let extension = extension_of(&path);
                    Ok(ParsedVisual::Pending(PendingMesh {
                        path,
                        extension,
                        frame,
                        material,
                    }))
                }
                None => {
                    warn!("skipping mesh '{}' with unresolvable path", filename);
                    Ok(ParsedVisual::Skipped)
                }
            }
        }
    }
}

/// Folds one `<material>` element inside a visual onto the working
/// material.
///
/// A name attribute makes the element a reference into the robot-scope
/// table (its children are ignored); without one its children describe
/// an inline material. Either way only the fields the source sets are
/// copied, so several elements apply last-wins per field.
fn apply_visual_material<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
    ctx: &VisualContext<'_>,
    material: &mut Material,
    has_body: bool,
) -> Result<()> {
    match get_attribute_opt(start, "name") {
        Some(name) => {
            if let Some(entry) = ctx.materials.get(&name) {
                material.merge_from(entry);
            } else {
                warn!("reference to unknown material '{}', ignoring", name);
            }
            if has_body {
                skip_element(reader, b"material")?;
            }
        }
        None => {
            if has_body {
                let inline = parse_material_body(reader, ctx.options)?;
                material.merge_from(&inline);
            }
        }
    }
    Ok(())
}

fn parse_material_body<R: BufRead>(
    reader: &mut Reader<R>,
    options: &UrdfLoader,
) -> Result<Material> {
    let mut material = Material::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"color" => {
                    let rgba = get_attribute(e, "rgba")?;
                    material.color = Some(parse_rgba(&rgba)?);
                }
                b"texture" => {
                    let filename = get_attribute(e, "filename")?;
                    match resolve_mesh_path(&options.packages, &filename, &options.working_path) {
                        Some(path) => material.texture = Some(path),
                        None => warn!("cannot resolve texture '{}', leaving it unset", filename),
                    }
                }
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"material" => break,
            Ok(Event::Eof) => {
                return Err(UrdfError::XmlParse("unexpected EOF in material".into()));
            }
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(material)
}

fn parse_geometry<R: BufRead>(reader: &mut Reader<R>) -> Result<RawGeometry> {
    let mut geometry: Option<RawGeometry> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"box" => {
                    let size = get_attribute_opt(e, "size")
                        .map(|s| parse_vector3(&s, "size", e))
                        .transpose()?
                        .unwrap_or_else(Vector3::zeros);
                    geometry = Some(RawGeometry::Primitive(Geometry::Box { size }));
                }
                b"sphere" => {
                    let radius = parse_float_attr_or(e, "radius", 0.0)?;
                    geometry = Some(RawGeometry::Primitive(Geometry::Sphere { radius }));
                }
                b"cylinder" => {
                    let radius = parse_float_attr_or(e, "radius", 0.0)?;
                    let length = parse_float_attr_or(e, "length", 0.0)?;
                    geometry = Some(RawGeometry::Primitive(Geometry::Cylinder { radius, length }));
                }
                b"mesh" => {
                    let filename = get_attribute(e, "filename")?;
                    let scale = get_attribute_opt(e, "scale")
                        .map(|s| parse_vector3(&s, "scale", e))
                        .transpose()?
                        .unwrap_or_else(|| Vector3::repeat(1.0));
                    geometry = Some(RawGeometry::Mesh { filename, scale });
                }
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"geometry" => break,
            Ok(Event::Eof) => return Err(UrdfError::XmlParse("unexpected EOF in geometry".into())),
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    geometry.ok_or_else(|| UrdfError::missing_element("shape", "geometry"))
}

// ============================================================================
// Joints
// ============================================================================

fn parse_joint<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
    source_offset: usize,
) -> Result<RawJoint> {
    let name = get_attribute(start, "name")?;
    let type_str = get_attribute(start, "type")?;
    let kind =
        JointType::from_str(&type_str).ok_or_else(|| UrdfError::UnknownJointType(type_str))?;

    let mut origin_xyz = Vector3::zeros();
    let mut origin_rpy = Vector3::zeros();
    let mut axis: Option<Vector3<f64>> = None;
    let mut limit = JointLimit::default();
    let mut parent: Option<String> = None;
    let mut child: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"origin" => (origin_xyz, origin_rpy) = parse_origin(e)?,
                b"axis" => axis = Some(parse_axis(e)?),
                b"limit" => limit = parse_limit(e)?,
                b"parent" => parent = Some(get_attribute(e, "link")?),
                b"child" => child = Some(get_attribute(e, "link")?),
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"joint" => break,
            Ok(Event::Eof) => return Err(UrdfError::XmlParse("unexpected EOF in joint".into())),
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    let parent =
        parent.ok_or_else(|| UrdfError::missing_element("parent", format!("joint '{name}'")))?;
    let child =
        child.ok_or_else(|| UrdfError::missing_element("child", format!("joint '{name}'")))?;
    if axis.is_none()
        && matches!(
            kind,
            JointType::Continuous | JointType::Revolute | JointType::Prismatic
        )
    {
        return Err(UrdfError::missing_element("axis", format!("joint '{name}'")));
    }

    Ok(RawJoint {
        name,
        kind,
        origin_xyz,
        origin_rpy,
        axis,
        limit,
        parent,
        child,
        source_offset,
    })
}

fn parse_axis(e: &BytesStart) -> Result<Vector3<f64>> {
    let xyz = get_attribute(e, "xyz")?;
    let axis = parse_vector3(&xyz, "xyz", e)?;
    let unit = Unit::try_new(axis, 1e-12)
        .ok_or_else(|| UrdfError::invalid_attribute("xyz", "axis", "zero-length axis"))?;
    Ok(unit.into_inner())
}

fn parse_limit(e: &BytesStart) -> Result<JointLimit> {
    Ok(JointLimit {
        lower: parse_float_attr_or(e, "lower", 0.0)?,
        upper: parse_float_attr_or(e, "upper", 0.0)?,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required attribute value.
fn get_attribute(e: &BytesStart, name: &'static str) -> Result<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name.as_bytes() {
            return String::from_utf8(attr.value.to_vec())
                .map_err(|_| UrdfError::invalid_attribute(name, element_name(e), "invalid UTF-8"));
        }
    }
    Err(UrdfError::missing_attribute(name, element_name(e)))
}

/// Get an optional attribute value.
fn get_attribute_opt(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name.as_bytes() {
            return String::from_utf8(attr.value.to_vec()).ok();
        }
    }
    None
}

/// Parse an optional float attribute, failing only when a value is
/// present but not a number.
fn parse_float_attr_or(e: &BytesStart, name: &'static str, default: f64) -> Result<f64> {
    match get_attribute_opt(e, name) {
        Some(s) => s
            .parse()
            .map_err(|_| UrdfError::invalid_attribute(name, element_name(e), "expected a number")),
        None => Ok(default),
    }
}

/// Parse a space-separated triple.
fn parse_vector3(s: &str, attribute: &'static str, e: &BytesStart) -> Result<Vector3<f64>> {
    let parts: Vec<f64> = s
        .split_whitespace()
        .map(str::parse)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| UrdfError::invalid_attribute(attribute, element_name(e), "expected numbers"))?;

    if parts.len() != 3 {
        return Err(UrdfError::invalid_attribute(
            attribute,
            element_name(e),
            format!("expected 3 values, got {}", parts.len()),
        ));
    }

    Ok(Vector3::new(parts[0], parts[1], parts[2]))
}

/// Parse an `rgba` color attribute.
fn parse_rgba(s: &str) -> Result<[f64; 4]> {
    let parts: Vec<f64> = s
        .split_whitespace()
        .map(str::parse)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| UrdfError::invalid_attribute("rgba", "color", "expected numbers"))?;

    if parts.len() != 4 {
        return Err(UrdfError::invalid_attribute(
            "rgba",
            "color",
            format!("expected 4 values, got {}", parts.len()),
        ));
    }

    Ok([parts[0], parts[1], parts[2], parts[3]])
}

/// Parse origin element attributes into an (xyz, rpy) pair.
fn parse_origin(e: &BytesStart) -> Result<(Vector3<f64>, Vector3<f64>)> {
    let xyz = get_attribute_opt(e, "xyz")
        .map(|s| parse_vector3(&s, "xyz", e))
        .transpose()?
        .unwrap_or_else(Vector3::zeros);

    let rpy = get_attribute_opt(e, "rpy")
        .map(|s| parse_vector3(&s, "rpy", e))
        .transpose()?
        .unwrap_or_else(Vector3::zeros);

    Ok((xyz, rpy))
}

/// Get element name as string for error messages.
fn element_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

/// Byte offset of the reader into the source document.
fn position<R>(reader: &Reader<R>) -> usize {
    usize::try_from(reader.buffer_position()).unwrap_or(0)
}

/// Skip an element and all its children.
fn skip_element<R: BufRead>(reader: &mut Reader<R>, name: &[u8]) -> Result<()> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == name => {
                depth += 1;
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == name => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(())
}
