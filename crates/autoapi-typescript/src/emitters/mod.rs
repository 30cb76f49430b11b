pub mod api;
pub mod index;
pub mod models;
pub mod tag;

use minijinja::Environment;

/// Separator between rendered declarations.
pub(crate) const BLANK_LINE: &str = "\n\n";

/// Escape `*/` sequences that would prematurely close a comment block.
pub fn escape_comment(value: String) -> String {
    value.replace("*/", "*\\/")
}

/// A `/* … */` trailing comment, or nothing when there is no text.
pub(crate) fn trailing_comment(description: Option<&str>) -> String {
    match description.filter(|d| !d.is_empty()) {
        Some(text) => format!(" /* {} */", escape_comment(text.to_string())),
        None => String::new(),
    }
}

/// Template environment shared by every emitter. Built once per generation
/// and borrowed by each render call.
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_filter("comment", escape_comment);
    env.add_template("model.ts.j2", include_str!("../../templates/model.ts.j2"))?;
    env.add_template("api.ts.j2", include_str!("../../templates/api.ts.j2"))?;
    env.add_template("index.ts.j2", include_str!("../../templates/index.ts.j2"))?;
    Ok(env)
}
