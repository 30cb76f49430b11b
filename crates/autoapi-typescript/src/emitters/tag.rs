use autoapi_core::ir::{IrTag, MODELS_FILE};
use minijinja::Environment;

use super::BLANK_LINE;
use super::api::{effective_base_path, render_api};

/// Token in the import template replaced with the effective base path.
pub const BASE_PATH_TOKEN: &str = "${basePath}";

/// `import { A, B } from './models'`, models deduplicated in first-use order.
/// `None` when no api of the tag references a model.
pub fn render_model_imports(tag: &IrTag) -> Option<String> {
    let mut names: Vec<&str> = Vec::new();
    for name in tag.apis.iter().flat_map(|api| api.model_names.iter()) {
        if !names.contains(&name.as_str()) {
            names.push(name);
        }
    }
    if names.is_empty() {
        return None;
    }
    Some(format!(
        "import {{ {} }} from './{MODELS_FILE}'",
        names.join(", ")
    ))
}

/// Render one tag file: the import block followed by every binding.
///
/// A tag whose apis reference no model gets no `./models` import line.
pub fn render_tag_file(
    env: &Environment<'_>,
    tag: &IrTag,
    base_path: &str,
    prefix: Option<&str>,
    import: &str,
) -> Result<String, minijinja::Error> {
    let base = effective_base_path(base_path, prefix);

    let mut imports: Vec<String> = Vec::new();
    imports.extend(render_model_imports(tag));
    let import = import.trim();
    if !import.is_empty() {
        imports.push(import.replace(BASE_PATH_TOKEN, &base));
    }

    let mut sections = Vec::with_capacity(tag.apis.len() + 1);
    if !imports.is_empty() {
        sections.push(imports.join("\n"));
    }
    for api in &tag.apis {
        sections.push(render_api(env, api, base_path, prefix)?);
    }
    Ok(sections.join(BLANK_LINE))
}
