//! A very small GLSL front-end.
//!
//! It doesn’t compile anything. It only knows enough to reject sources without entry point, to
//! match the interface between stages at link time and to tell which uniforms a real compiler
//! would keep.

/// Storage qualifier of a global declaration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Qualifier {
  In,
  Out,
  Uniform,
}

/// A global `in`, `out` or `uniform` declaration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Declaration {
  pub qualifier: Qualifier,
  pub ty: String,
  pub name: String,
}

/// What the front-end knows about a stage source.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StageInfo {
  pub declarations: Vec<Declaration>,
  /// Uniforms referenced outside of their declaration, in declaration order.
  pub used_uniforms: Vec<String>,
}

impl StageInfo {
  pub fn outputs(&self) -> impl Iterator<Item = &str> + '_ {
    self.names(Qualifier::Out)
  }

  pub fn inputs(&self) -> impl Iterator<Item = &str> + '_ {
    self.names(Qualifier::In)
  }

  fn names(&self, qualifier: Qualifier) -> impl Iterator<Item = &str> + '_ {
    self
      .declarations
      .iter()
      .filter(move |decl| decl.qualifier == qualifier)
      .map(|decl| decl.name.as_str())
  }
}

/// Scan a stage source.
///
/// Fails with a compiler-like log if the source has no `main` function.
pub fn scan(src: &str) -> Result<StageInfo, String> {
  let mut info = StageInfo::default();
  let mut body = Vec::new();

  for line in src.lines() {
    match declaration(line) {
      Some(decl) => info.declarations.push(decl),
      None => body.push(line),
    }
  }

  let has_main = body.iter().any(|line| {
    let words: Vec<_> = words(line).collect();
    words.windows(2).any(|w| w == ["void", "main"])
  });

  if !has_main {
    return Err("0:1: error: missing entry point `void main()`".to_owned());
  }

  info.used_uniforms = info
    .declarations
    .iter()
    .filter(|decl| decl.qualifier == Qualifier::Uniform)
    .filter(|decl| body.iter().any(|line| words(line).any(|w| w == decl.name)))
    .map(|decl| decl.name.clone())
    .collect();

  Ok(info)
}

/// Check that every input of the fragment stage is written by the vertex stage.
pub fn link(vertex: &StageInfo, fragment: &StageInfo) -> Result<(), String> {
  for input in fragment.inputs() {
    if !vertex.outputs().any(|output| output == input) {
      return Err(format!(
        "error: fragment input `{}` is not written by the vertex stage",
        input
      ));
    }
  }

  Ok(())
}

// Parse lines such as `layout(location = 0) in vec4 position;` or `uniform mat4 u_MVP;`.
fn declaration(line: &str) -> Option<Declaration> {
  let mut line = line.trim();

  if line.starts_with("layout") {
    line = line[line.find(')')? + 1..].trim_start();
  }

  let line = line.strip_suffix(';')?;
  let mut parts = line.split_whitespace();

  let qualifier = match parts.next()? {
    "in" => Qualifier::In,
    "out" => Qualifier::Out,
    "uniform" => Qualifier::Uniform,
    _ => return None,
  };

  let ty = parts.next()?.to_owned();
  let name = parts.next()?;
  let name = name.split('[').next().unwrap_or(name).to_owned();

  Some(Declaration { qualifier, ty, name })
}

fn words(line: &str) -> impl Iterator<Item = &str> {
  // comments don’t count as uses
  let code = line.split("//").next().unwrap_or("");

  code
    .split(|c: char| !(c.is_alphanumeric() || c == '_'))
    .filter(|w| !w.is_empty())
}
