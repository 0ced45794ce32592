//! Split a combined shader file into its stages.
//!
//! A combined file holds both stages, each started by a marker line:
//!
//! ```text
//! #shader vertex
//! ...
//! #shader fragment
//! ...
//! ```

use super::{ShaderError, ShaderStage};

const MARKER: &str = "#shader";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderProgramSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderProgramSource {
    /// Parse a combined shader file. Any line containing `#shader` is
    /// a marker, followed somewhere by `vertex` or `fragment` (checked
    /// in that order). Lines before the first marker line are dropped.
    pub fn parse(source: &str) -> Result<Self, ShaderError> {
        let mut vertex: Option<String> = None;
        let mut fragment: Option<String> = None;
        let mut current: Option<ShaderStage> = None;

        for line in source.lines() {
            if let Some(start) = line.find(MARKER) {
                let rest = line[start + MARKER.len()..].trim();
                current = if rest.contains("vertex") {
                    Some(ShaderStage::Vertex)
                } else if rest.contains("fragment") {
                    Some(ShaderStage::Fragment)
                } else {
                    log::warn!("unknown shader section `{}`, skipping it", rest);
                    None
                };
                // a repeated marker starts the section over
                match current {
                    Some(ShaderStage::Vertex) => vertex = Some(String::new()),
                    Some(ShaderStage::Fragment) => fragment = Some(String::new()),
                    None => {}
                }
                continue;
            }

            let section = match current {
                Some(ShaderStage::Vertex) => vertex.as_mut(),
                Some(ShaderStage::Fragment) => fragment.as_mut(),
                None => None,
            };
            if let Some(section) = section {
                section.push_str(line);
                section.push('\n');
            }
        }

        Ok(Self {
            vertex: vertex.ok_or(ShaderError::MissingStage(ShaderStage::Vertex))?,
            fragment: fragment.ok_or(ShaderError::MissingStage(ShaderStage::Fragment))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = "\
#shader vertex
#version 330 core
layout(location = 0) in vec4 position;
void main() { gl_Position = position; }

#shader fragment
#version 330 core
layout(location = 0) out vec4 color;
void main() { color = vec4(1.0); }
";

    #[test]
    fn shader_source_split_basic() {
        let source = ShaderProgramSource::parse(BASIC).unwrap();
        assert!(source.vertex.starts_with("#version 330 core\n"));
        assert!(source.vertex.contains("gl_Position = position;"));
        assert!(!source.vertex.contains("color ="));
        assert!(source.fragment.starts_with("#version 330 core\n"));
        assert!(source.fragment.contains("color = vec4(1.0);"));
        assert!(!source.fragment.contains("#shader"));
    }

    #[test]
    fn shader_source_bundled_files() {
        let basic = ShaderProgramSource::parse(include_str!("../../../res/shaders/Basic.shader"))
            .unwrap();
        assert!(basic.vertex.contains("uniform mat4 u_MVP;"));
        assert!(basic.fragment.contains("uniform sampler2D u_Texture;"));

        let color = ShaderProgramSource::parse(include_str!("../../../res/shaders/Color.shader"))
            .unwrap();
        assert!(color.fragment.contains("uniform vec4 u_Color;"));
    }

    #[test]
    fn shader_source_fragment_first() {
        let swapped = "#shader fragment\nfrag\n#shader vertex\nvert\n";
        let source = ShaderProgramSource::parse(swapped).unwrap();
        assert_eq!(source.vertex, "vert\n");
        assert_eq!(source.fragment, "frag\n");
    }

    #[test]
    fn shader_source_preamble_ignored() {
        let source =
            ShaderProgramSource::parse("// comment\n#shader vertex\nv\n#shader fragment\nf\n")
                .unwrap();
        assert_eq!(source.vertex, "v\n");
        assert_eq!(source.fragment, "f\n");
    }

    #[test]
    fn shader_source_missing_fragment() {
        match ShaderProgramSource::parse("#shader vertex\nv\n") {
            Err(ShaderError::MissingStage(ShaderStage::Fragment)) => (),
            res => panic!("expected missing fragment stage, got {:?}", res),
        }
    }

    #[test]
    fn shader_source_missing_vertex() {
        match ShaderProgramSource::parse("no markers at all\n") {
            Err(ShaderError::MissingStage(ShaderStage::Vertex)) => (),
            res => panic!("expected missing vertex stage, got {:?}", res),
        }
    }

    #[test]
    fn shader_source_marker_inside_line() {
        let source =
            ShaderProgramSource::parse("  x // #shader vertex\nv\n#shader  type fragment\nf\n")
                .unwrap();
        assert_eq!(source.vertex, "v\n");
        assert_eq!(source.fragment, "f\n");
    }

    #[test]
    fn shader_source_unknown_section_dropped() {
        let source = ShaderProgramSource::parse(
            "#shader vertex\nv\n#shader geometry\ng\n#shader fragment\nf\n",
        )
        .unwrap();
        assert_eq!(source.vertex, "v\n");
        assert_eq!(source.fragment, "f\n");
    }
}
