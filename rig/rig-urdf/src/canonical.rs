//! Canonical topology document generation.

use rig_types::METAHUMAN_BONES;

/// Render the canonical MetaHuman skeleton as a topology document.
///
/// The generated document carries no `<tpose_direction>` elements, so
/// loading it reproduces the name-classified rest directions of
/// [`rig_types::Skeleton::metahuman`]. Useful for exercising the XML path
/// without shipping fixture files.
#[must_use]
pub fn metahuman_urdf() -> String {
    let mut xml = String::from("<robot name=\"metahuman\">\n");

    for (name, _) in METAHUMAN_BONES {
        xml.push_str(&format!("  <link name=\"{name}\"/>\n"));
    }

    for (child, parent) in METAHUMAN_BONES {
        if parent < 0 {
            continue;
        }
        let parent_name = METAHUMAN_BONES[parent as usize].0;
        xml.push_str(&format!(
            concat!(
                "  <joint name=\"{parent}_to_{child}\" type=\"revolute\">\n",
                "    <parent link=\"{parent}\"/>\n",
                "    <child link=\"{child}\"/>\n",
                "    <axis xyz=\"0 0 1\"/>\n",
                "  </joint>\n"
            ),
            parent = parent_name,
            child = child,
        ));
    }

    xml.push_str("</robot>\n");
    xml
}
