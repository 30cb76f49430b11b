use minijinja::{Environment, context};

use autoapi_core::ir::IrApi;

use crate::type_mapper::ir_type_to_ts;

use super::models::render_property;

/// Data argument passed by bodiless methods whose request helper expects one.
const EMPTY_DATA: &str = "{}";

/// The base path call paths are built on: `prefix` joined before `base_path`.
pub fn effective_base_path(base_path: &str, prefix: Option<&str>) -> String {
    join_path(&[prefix.unwrap_or_default(), base_path])
}

/// Posix-style join: duplicate separators collapse, a leading `/` on the
/// first part and a trailing `/` on the last part are kept.
pub fn join_path(parts: &[&str]) -> String {
    let parts: Vec<&str> = parts.iter().copied().filter(|p| !p.is_empty()).collect();
    let segments: Vec<&str> = parts
        .iter()
        .flat_map(|p| p.split('/'))
        .filter(|s| !s.is_empty())
        .collect();

    let mut joined = String::new();
    if parts.first().is_some_and(|p| p.starts_with('/')) {
        joined.push('/');
    }
    joined.push_str(&segments.join("/"));
    if !segments.is_empty() && parts.last().is_some_and(|p| p.ends_with('/')) {
        joined.push('/');
    }
    joined
}

/// Turn `{param}` placeholders into template-literal interpolations.
pub fn interpolate_path(path: &str) -> String {
    path.replace('{', "${")
}

/// Render one request binding.
///
/// Declared parameters are `[data?, params?, ...pathParams]`; call
/// arguments are `[path, data?, { params }?]`.
pub fn render_api(
    env: &Environment<'_>,
    api: &IrApi,
    base_path: &str,
    prefix: Option<&str>,
) -> Result<String, minijinja::Error> {
    let mut params = Vec::new();
    if let Some(ref body) = api.body {
        params.push(format!("data: {}", ir_type_to_ts(body)));
    }
    if let Some(ref query) = api.query {
        params.push(format!("params: {query}"));
    }
    params.extend(api.path_params.iter().map(render_property));

    let base = effective_base_path(base_path, prefix);
    let call_path = join_path(&[base.as_str(), interpolate_path(&api.path).as_str()]);
    let mut args = vec![format!("`{call_path}`")];
    if api.body.is_some() {
        args.push("data".to_string());
    } else if api.method.takes_data() {
        args.push(EMPTY_DATA.to_string());
    }
    if api.query.is_some() {
        args.push("{ params }".to_string());
    }

    env.get_template("api.ts.j2")?.render(context! {
        name => api.name,
        description => api.description,
        params => params,
        response => ir_type_to_ts(&api.response),
        method => api.method.as_str(),
        args => args,
    })
}
