use minijinja::{Environment, context};

use autoapi_core::ir::IrTag;

use super::BLANK_LINE;

/// Render the `index` file: one re-export per tag, in tag order.
pub fn render_index_file(
    env: &Environment<'_>,
    tags: &[IrTag],
) -> Result<String, minijinja::Error> {
    let tmpl = env.get_template("index.ts.j2")?;
    let entries = tags
        .iter()
        .map(|tag| {
            tmpl.render(context! {
                name => tag.name,
                description => tag.description,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries.join(BLANK_LINE))
}
