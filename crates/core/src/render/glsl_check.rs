//! Static checks on the GLSL ES 1.00 subset the presets are written in.
//!
//! Not a compiler: it tokenizes the source and rejects what a driver would
//! reject for the mistakes that matter here. Those are unbalanced
//! delimiters, undeclared identifiers (misspelled uniforms, functions or
//! locals), missing semicolons, preprocessor directives and a missing entry
//! point or output write. [`RecordingGpu`](super::testing::RecordingGpu)
//! runs it on every compile.

use super::shader::ShaderStage;
use std::collections::BTreeSet;

const TYPES: &[&str] = &["void", "bool", "int", "float", "vec2", "vec3", "vec4"];

const KEYWORDS: &[&str] = &[
    "attribute",
    "uniform",
    "varying",
    "const",
    "in",
    "out",
    "inout",
    "precision",
    "lowp",
    "mediump",
    "highp",
    "return",
    "if",
    "else",
    "for",
    "while",
    "break",
    "continue",
    "discard",
    "true",
    "false",
];

const BUILTIN_FUNCTIONS: &[&str] = &[
    "sin",
    "cos",
    "tan",
    "atan",
    "pow",
    "exp",
    "log",
    "sqrt",
    "abs",
    "sign",
    "floor",
    "ceil",
    "fract",
    "mod",
    "min",
    "max",
    "clamp",
    "mix",
    "step",
    "smoothstep",
    "length",
    "distance",
    "dot",
    "cross",
    "normalize",
];

const BUILTIN_VARIABLES: &[&str] = &["gl_FragCoord", "gl_FragColor", "gl_Position"];

#[derive(Debug, Clone, PartialEq)]
enum Token<'a> {
    Ident(&'a str),
    Number(&'a str),
    Punct(char),
}

fn is_keyword(word: &str) -> bool {
    TYPES.contains(&word) || KEYWORDS.contains(&word)
}

fn tokenize(source: &str) -> Result<Vec<(usize, Token<'_>)>, String> {
    let mut tokens = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let line_no = index + 1;
        let code = line.split("//").next().unwrap_or("");
        if code.trim_start().starts_with('#') {
            return Err(format!("line {line_no}: unsupported directive `{}`", code.trim()));
        }
        let bytes = code.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            let c = bytes[i] as char;
            if c.is_whitespace() {
                i += 1;
            } else if c.is_ascii_alphabetic() || c == '_' {
                let start = i;
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                tokens.push((line_no, Token::Ident(&code[start..i])));
            } else if c.is_ascii_digit() {
                let start = i;
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'.') {
                    i += 1;
                }
                tokens.push((line_no, Token::Number(&code[start..i])));
            } else {
                tokens.push((line_no, Token::Punct(c)));
                i += 1;
            }
        }
    }
    Ok(tokens)
}

fn check_delimiters(tokens: &[(usize, Token<'_>)]) -> Result<(), String> {
    let mut open = Vec::new();
    for (line, token) in tokens {
        match token {
            Token::Punct(c @ ('(' | '{')) => open.push((*line, *c)),
            Token::Punct(c @ (')' | '}')) => {
                let expected = if *c == ')' { '(' } else { '{' };
                match open.pop() {
                    Some((_, o)) if o == expected => {}
                    _ => return Err(format!("line {line}: unmatched `{c}`")),
                }
            }
            _ => {}
        }
    }
    match open.pop() {
        Some((line, c)) => Err(format!("line {line}: unclosed `{c}`")),
        None => Ok(()),
    }
}

/// Names introduced by a type: uniforms, attributes, functions, parameters
/// and locals.
fn declarations<'a>(tokens: &[(usize, Token<'a>)]) -> BTreeSet<&'a str> {
    tokens
        .windows(2)
        .filter_map(|pair| match (&pair[0].1, &pair[1].1) {
            (Token::Ident(ty), Token::Ident(name)) if TYPES.contains(ty) && !is_keyword(name) => {
                Some(*name)
            }
            _ => None,
        })
        .collect()
}

/// Checks `source` as a GLSL ES 1.00 shader for `stage`.
pub fn check_glsl(stage: ShaderStage, source: &str) -> Result<(), String> {
    let tokens = tokenize(source)?;
    check_delimiters(&tokens)?;

    let declared = declarations(&tokens);
    let mut previous: Option<&Token<'_>> = None;
    for (line, token) in &tokens {
        if let Token::Ident(word) = token {
            let member = previous == Some(&Token::Punct('.'));
            let known = is_keyword(word)
                || BUILTIN_FUNCTIONS.contains(word)
                || BUILTIN_VARIABLES.contains(word)
                || declared.contains(word);
            if !member && !known {
                return Err(format!("line {line}: undeclared identifier `{word}`"));
            }
        }
        match (previous, token) {
            (Some(Token::Ident(a)), Token::Ident(_) | Token::Number(_)) if !is_keyword(a) => {
                return Err(format!("line {line}: expected operator or `;` after `{a}`"));
            }
            (Some(Token::Number(a)), Token::Ident(_) | Token::Number(_)) => {
                return Err(format!("line {line}: expected operator or `;` after `{a}`"));
            }
            (Some(Token::Punct(')')), Token::Ident(ty)) if TYPES.contains(ty) => {
                return Err(format!("line {line}: expected `;` before `{ty}`"));
            }
            _ => {}
        }
        previous = Some(token);
    }

    let words: Vec<&str> = tokens
        .iter()
        .filter_map(|(_, token)| match token {
            Token::Ident(word) => Some(*word),
            _ => None,
        })
        .collect();
    if !words.windows(2).any(|pair| pair == ["void", "main"]) {
        return Err("missing `void main`".into());
    }
    match stage {
        ShaderStage::Vertex if !words.contains(&"gl_Position") => {
            Err("vertex shader never writes gl_Position".into())
        }
        ShaderStage::Fragment if words.first() != Some(&"precision") => {
            Err("fragment shader must open with a default float precision".into())
        }
        ShaderStage::Fragment if !words.contains(&"gl_FragColor") => {
            Err("fragment shader never writes gl_FragColor".into())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::PRESETS;
    use crate::render::fullscreen::VERTEX_SHADER;

    const MINIMAL_FRAG: &str =
        "precision mediump float;\nuniform float time;\nvoid main(void) {\n    gl_FragColor = vec4(time);\n}\n";

    #[test]
    fn shared_vertex_shader_passes() {
        check_glsl(ShaderStage::Vertex, VERTEX_SHADER).unwrap();
    }

    #[test]
    fn every_preset_fragment_passes() {
        for preset in &PRESETS {
            if let Err(e) = check_glsl(ShaderStage::Fragment, preset.fragment) {
                panic!("{}: {e}", preset.key);
            }
        }
    }

    #[test]
    fn minimal_fragment_passes() {
        check_glsl(ShaderStage::Fragment, MINIMAL_FRAG).unwrap();
    }

    #[test]
    fn misspelled_uniform_is_rejected() {
        let src = MINIMAL_FRAG.replace("vec4(time)", "vec4(tiem)");
        let err = check_glsl(ShaderStage::Fragment, &src).unwrap_err();
        assert!(err.contains("`tiem`"), "{err}");
    }

    #[test]
    fn misspelled_extra_in_a_preset_body_is_rejected() {
        let swirl = PRESETS.iter().find(|p| p.key == "swirl").unwrap();
        let src = swirl.fragment.replace("+ swirlStrength * r", "+ swirlStrenght * r");
        assert!(check_glsl(ShaderStage::Fragment, &src).is_err());
    }

    #[test]
    fn missing_semicolon_is_rejected() {
        let src = "precision mediump float;\nvoid main(void) {\n    float a = 1.0\n    float b = a;\n    gl_FragColor = vec4(b);\n}\n";
        let err = check_glsl(ShaderStage::Fragment, src).unwrap_err();
        assert!(err.starts_with("line 3") || err.starts_with("line 4"), "{err}");
    }

    #[test]
    fn unbalanced_delimiters_are_rejected() {
        let src = MINIMAL_FRAG.replace("vec4(time);", "vec4(time;");
        assert!(check_glsl(ShaderStage::Fragment, &src).is_err());
        let src = MINIMAL_FRAG.trim_end().trim_end_matches('}');
        assert!(check_glsl(ShaderStage::Fragment, src).is_err());
    }

    #[test]
    fn directives_are_rejected() {
        let src = format!("#error broken\n{MINIMAL_FRAG}");
        assert!(check_glsl(ShaderStage::Fragment, &src).is_err());
    }

    #[test]
    fn fragment_without_precision_is_rejected() {
        let src = MINIMAL_FRAG.replace("precision mediump float;\n", "");
        assert!(check_glsl(ShaderStage::Fragment, &src).is_err());
    }

    #[test]
    fn vertex_without_position_write_is_rejected() {
        let src = "attribute vec4 aVertexPosition;\nvoid main(void) {\n}\n";
        assert!(check_glsl(ShaderStage::Vertex, src).is_err());
    }

    #[test]
    fn empty_source_has_no_entry_point() {
        assert_eq!(
            check_glsl(ShaderStage::Vertex, ""),
            Err("missing `void main`".to_string())
        );
    }

    #[test]
    fn swizzles_and_members_are_not_identifiers() {
        let src = "precision mediump float;\nvoid main(void) {\n    vec2 uv = gl_FragCoord.xy;\n    gl_FragColor = vec4(uv.x, uv.y, 0.0, 1.0);\n}\n";
        check_glsl(ShaderStage::Fragment, src).unwrap();
    }
}
