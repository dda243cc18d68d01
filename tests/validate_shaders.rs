//! Offline validation of the shipped GLSL sources via naga.

use naga::front::glsl::{Frontend, Options};
use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::ShaderStage;

/// naga's GLSL frontend only accepts `#version` 440+ and insists on
/// explicit binding/location layouts, while the GL 3.3 context consumes
/// the sources as shipped. Validate a copy rewritten into the dialect
/// naga accepts; the declarations themselves are unchanged.
fn naga_dialect(source: &str) -> String {
    let mut binding = 0;
    let mut in_location = 0;
    let mut out_location = 0;
    source
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if trimmed.starts_with("#version") {
                "#version 450 core".to_string()
            } else if trimmed.starts_with("uniform ") {
                let bound = format!("layout(binding = {binding}) {trimmed}");
                binding += 1;
                bound
            } else if trimmed.starts_with("in ") {
                let located = format!("layout(location = {in_location}) {trimmed}");
                in_location += 1;
                located
            } else if trimmed.starts_with("out ") {
                let located = format!("layout(location = {out_location}) {trimmed}");
                out_location += 1;
                located
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_and_validate(stage: ShaderStage, path: &str) {
    let source = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {path}: {e}"));
    let source = naga_dialect(&source);

    let mut frontend = Frontend::default();
    let module = frontend
        .parse(&Options::from(stage), &source)
        .unwrap_or_else(|e| panic!("parse error in {path}: {e:?}"));

    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
    validator
        .validate(&module)
        .unwrap_or_else(|e| panic!("validation error in {path}: {e:?}"));
}

#[test]
fn cube_vertex_shader_is_valid() {
    parse_and_validate(ShaderStage::Vertex, "assets/shaders/cube.vert");
}

#[test]
fn cube_fragment_shader_is_valid() {
    parse_and_validate(ShaderStage::Fragment, "assets/shaders/cube.frag");
}

#[test]
fn dialect_rewrite_only_adds_layouts() {
    let rewritten = naga_dialect("#version 330 core\nuniform mat4 u_model;\nout vec2 v_uv;\n");
    assert_eq!(
        rewritten,
        "#version 450 core\nlayout(binding = 0) uniform mat4 u_model;\nlayout(location = 0) out vec2 v_uv;"
    );
    // declarations that already carry a layout stay untouched
    let located = "layout(location = 0) in vec3 a_pos;";
    assert_eq!(naga_dialect(located), located);
}

#[test]
fn stage_interfaces_match() {
    // The fragment stage must not consume anything the vertex stage does
    // not produce, or the program would fail to link at runtime.
    let vert = std::fs::read_to_string("assets/shaders/cube.vert").unwrap();
    let frag = std::fs::read_to_string("assets/shaders/cube.frag").unwrap();

    let vert_outs: Vec<&str> = vert
        .lines()
        .filter_map(|l| l.trim().strip_prefix("out "))
        .collect();
    for input in frag.lines().filter_map(|l| l.trim().strip_prefix("in ")) {
        assert!(
            vert_outs.contains(&input),
            "fragment input `{input}` has no matching vertex output"
        );
    }
}
