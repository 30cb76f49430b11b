use minijinja::{Environment, context};

use autoapi_core::ir::{IrModel, IrProperty};

use crate::type_mapper::ir_type_to_ts;

use super::{BLANK_LINE, trailing_comment};

/// Render one field line: `key?: type /* description */`.
pub fn render_property(prop: &IrProperty) -> String {
    let marker = if prop.required { ":" } else { "?:" };
    format!(
        "{}{marker} {}{}",
        prop.key,
        ir_type_to_ts(&prop.prop_type),
        trailing_comment(prop.description.as_deref())
    )
}

/// Render a model as an exported interface, fields in declaration order.
pub fn render_model(
    env: &Environment<'_>,
    model: &IrModel,
) -> Result<String, minijinja::Error> {
    let props: Vec<String> = model.props.iter().map(render_property).collect();
    env.get_template("model.ts.j2")?.render(context! {
        name => model.name,
        description => model.description,
        props => props,
    })
}

/// Render the `models` file: every model in IR order.
pub fn render_models_file(
    env: &Environment<'_>,
    models: &[IrModel],
) -> Result<String, minijinja::Error> {
    let rendered = models
        .iter()
        .map(|model| render_model(env, model))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join(BLANK_LINE))
}
