//! Topology XML parser.
//!
//! Parses URDF-flavored topology documents into the intermediate
//! representation types. The schema is deliberately small: `<link>` elements
//! carry only a name, `<joint>` elements carry parent/child references, an
//! optional axis, an optional origin offset, and an optional explicit
//! `<tpose_direction>`.

use nalgebra::Vector3;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::io::BufRead;

use crate::error::{Result, TopologyError};
use crate::types::{JointDescription, JointKind, LinkDescription, RobotDescription};

/// Parse a topology string into a robot description.
///
/// # Errors
///
/// Returns an error if the XML is malformed, the root element is not
/// `<robot>`, or a required name/attribute is missing.
pub fn parse_topology_str(xml: &str) -> Result<RobotDescription> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    parse_topology_reader(&mut reader)
}

/// Parse a topology document from a reader.
fn parse_topology_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<RobotDescription> {
    let mut buf = Vec::new();
    let mut robot: Option<RobotDescription> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if e.name().as_ref() == b"robot" {
                    robot = Some(parse_robot(reader, e)?);
                } else {
                    return Err(TopologyError::UnexpectedRootElement(element_name(e)));
                }
            }
            Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"robot" {
                    // A self-closing robot is syntactically fine; structural
                    // validation rejects the empty link list later.
                    robot = Some(RobotDescription::new(get_attribute(e, "name")?));
                } else {
                    return Err(TopologyError::UnexpectedRootElement(element_name(e)));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(TopologyError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    robot.ok_or_else(|| TopologyError::missing_element("robot", "topology document"))
}

/// Parse the robot element and its children.
fn parse_robot<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<RobotDescription> {
    let name = get_attribute(start, "name")?;
    let mut robot = RobotDescription::new(name);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                match elem_name.as_slice() {
                    b"link" => {
                        let name = get_attribute(e, "name")?;
                        // Our schema keeps nothing inside a link; tolerate
                        // and skip foreign content.
                        skip_element(reader, b"link")?;
                        robot.links.push(LinkDescription::new(name));
                    }
                    b"joint" => {
                        let joint = parse_joint(reader, e)?;
                        robot.joints.push(joint);
                    }
                    _ => skip_element(reader, &elem_name)?,
                }
            }
            Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"link" {
                    let name = get_attribute(e, "name")?;
                    robot.links.push(LinkDescription::new(name));
                } else if e.name().as_ref() == b"joint" {
                    let name = get_attribute(e, "name").unwrap_or_default();
                    return Err(TopologyError::missing_element(
                        "parent",
                        format!("joint '{name}'"),
                    ));
                }
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"robot" => break,
            Ok(Event::Eof) => {
                return Err(TopologyError::XmlParse("unexpected EOF in robot".into()));
            }
            Ok(_) => {}
            Err(e) => return Err(TopologyError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(robot)
}

/// Parse a joint element.
fn parse_joint<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<JointDescription> {
    let name = get_attribute(start, "name")?;
    let kind_tag = get_attribute(start, "type")?;
    let kind =
        JointKind::from_tag(&kind_tag).ok_or(TopologyError::UnknownJointKind(kind_tag))?;

    let mut parent: Option<String> = None;
    let mut child: Option<String> = None;
    let mut axis = Vector3::z();
    let mut origin: Option<Vector3<f64>> = None;
    let mut rest_direction: Option<Vector3<f64>> = None;

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                match elem_name.as_slice() {
                    b"parent" => {
                        parent = Some(get_attribute(e, "link")?);
                    }
                    b"child" => {
                        child = Some(get_attribute(e, "link")?);
                    }
                    b"axis" => {
                        if let Some(xyz) = get_attribute_opt(e, "xyz") {
                            axis = parse_vector3(&xyz, format!("axis of joint '{name}'"))?;
                        }
                    }
                    b"origin" => {
                        let xyz = get_attribute_opt(e, "xyz").unwrap_or_else(|| "0 0 0".into());
                        origin = Some(parse_vector3(&xyz, format!("origin of joint '{name}'"))?);
                    }
                    b"tpose_direction" => {
                        let xyz = get_attribute_opt(e, "xyz").unwrap_or_else(|| "0 1 0".into());
                        rest_direction = Some(parse_vector3(
                            &xyz,
                            format!("tpose_direction of joint '{name}'"),
                        )?);
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"joint" => break,
            Ok(Event::Eof) => {
                return Err(TopologyError::XmlParse("unexpected EOF in joint".into()));
            }
            Ok(_) => {}
            Err(e) => return Err(TopologyError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    let parent =
        parent.ok_or_else(|| TopologyError::missing_element("parent", format!("joint '{name}'")))?;
    let child =
        child.ok_or_else(|| TopologyError::missing_element("child", format!("joint '{name}'")))?;

    let mut joint = JointDescription::new(name, kind, parent, child).with_axis(axis);
    if let Some(origin) = origin {
        joint = joint.with_origin(origin);
    }
    if let Some(direction) = rest_direction {
        joint = joint.with_rest_direction(direction);
    }

    Ok(joint)
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required attribute value.
fn get_attribute(e: &BytesStart, name: &'static str) -> Result<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name.as_bytes() {
            return String::from_utf8(attr.value.to_vec()).map_err(|_| {
                TopologyError::missing_attribute(name, element_name(e))
            });
        }
    }
    Err(TopologyError::missing_attribute(name, element_name(e)))
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

/// Parse a space-separated vector3 string; exactly three components.
fn parse_vector3(s: &str, context: impl Into<String>) -> Result<Vector3<f64>> {
    let parts: Vec<f64> = match s
        .split_whitespace()
        .map(str::parse::<f64>)
        .collect::<std::result::Result<Vec<_>, _>>()
    {
        Ok(parts) => parts,
        Err(_) => return Err(TopologyError::invalid_vector(s, context)),
    };

    if parts.len() != 3 {
        return Err(TopologyError::invalid_vector(s, context));
    }

    Ok(Vector3::new(parts[0], parts[1], parts[2]))
}

/// Get element name as string for error messages.
fn element_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
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
            Err(e) => return Err(TopologyError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(())
}
