use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::{MalformedSchemaError, TransformError};
use crate::ir::*;
use crate::parse::operation::{Operation, PathItem};
use crate::parse::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use crate::parse::schema::Schema;
use crate::parse::spec::{SwaggerSpec, Tag};
use crate::parse::type_node::TypeNode;

use super::name_normalizer::{
    NameRegistry, derive_api_name, derive_document_name, sanitize_model_name,
};
use super::type_resolver::resolve_type;

/// Identifier of tags that have neither a usable description nor name.
const DEFAULT_TAG: &str = "default";

/// Status code whose schema becomes the api response type.
const SUCCESS_STATUS: &str = "200";

/// Transform a parsed Swagger document into the IR.
///
/// Any malformed operation aborts the whole document.
pub fn transform(spec: &SwaggerSpec) -> Result<IrDocument, TransformError> {
    // Phase 1: Convert operations and bucket them by their first tag
    let mut buckets: IndexMap<String, Vec<IrApi>> = IndexMap::new();
    let mut query_models = Vec::new();
    let mut api_names = NameRegistry::new();

    for (path, item) in &spec.paths {
        for (method, op) in operations(item) {
            let name = api_names.claim(&derive_api_name(path, method.as_str()));
            let (api, query_model) = build_api(spec, name, method, path, op, &item.parameters)?;
            query_models.extend(query_model);
            buckets.entry(api.tag.clone()).or_default().push(api);
        }
    }

    // Phase 2: Convert definitions
    let definitions = resolve_definitions(&spec.definitions)?;

    // Phase 3: Assign unique model names and rewrite references
    let models = assign_model_names(query_models, definitions, &mut buckets);

    // Phase 4: Group buckets into declared and synthetic tags
    let tags = group_into_tags(&spec.tags, buckets);

    let base_path = spec.base_path().to_string();
    log::debug!(
        "transformed {} tags and {} models for {:?}",
        tags.len(),
        models.len(),
        spec.info.title
    );

    Ok(IrDocument {
        name: derive_document_name(&base_path, &spec.info.title),
        title: spec.info.title.clone(),
        base_path,
        models,
        tags,
    })
}

/// Operations of a path item in canonical method order.
fn operations(item: &PathItem) -> Vec<(HttpMethod, &Operation)> {
    [
        (HttpMethod::Get, &item.get),
        (HttpMethod::Post, &item.post),
        (HttpMethod::Put, &item.put),
        (HttpMethod::Delete, &item.delete),
        (HttpMethod::Patch, &item.patch),
        (HttpMethod::Options, &item.options),
        (HttpMethod::Head, &item.head),
    ]
    .into_iter()
    .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
    .collect()
}

fn build_api(
    spec: &SwaggerSpec,
    name: String,
    method: HttpMethod,
    path: &str,
    op: &Operation,
    shared: &[ParameterOrRef],
) -> Result<(IrApi, Option<IrModel>), TransformError> {
    let mut body = None;
    let mut query_props = Vec::new();
    let mut path_params = Vec::new();

    for param in merge_parameters(spec, shared, &op.parameters)? {
        let prop = IrProperty {
            key: param.name.clone(),
            required: param.required,
            prop_type: resolve_type(&TypeNode::from_parameter(param)?),
            description: param.description.clone(),
        };
        match param.location {
            // Each body parameter replaces the previous one.
            ParameterLocation::Body => body = Some(prop.prop_type),
            ParameterLocation::Query => query_props.push(prop),
            ParameterLocation::Path => path_params.push(prop),
            ParameterLocation::Header | ParameterLocation::FormData => {
                log::debug!(
                    "skipping {:?} parameter {} of {method} {path}",
                    param.location,
                    param.name
                );
            }
        }
    }

    let success = op.responses.get(SUCCESS_STATUS).ok_or_else(|| {
        MalformedSchemaError::MissingSuccessResponse {
            method: method.as_str().to_string(),
            path: path.to_string(),
        }
    })?;
    let response = match success.schema {
        Some(ref schema) => resolve_type(&TypeNode::from_schema(schema)?),
        None => IrType::Unknown,
    };

    let query_model = (!query_props.is_empty()).then(|| IrModel {
        name: format!("{name}Params"),
        description: None,
        props: query_props,
    });

    let description =
        non_empty(op.description.as_deref()).or_else(|| non_empty(op.summary.as_deref()));

    let api = IrApi {
        name,
        tag: op.tags.first().cloned().unwrap_or_default(),
        operation_id: op.operation_id.clone(),
        method,
        path: path.to_string(),
        description,
        body,
        query: query_model.as_ref().map(|m| m.name.clone()),
        path_params,
        response,
        model_names: Vec::new(),
    };

    Ok((api, query_model))
}

/// Path-level parameters followed by operation parameters. An operation
/// parameter overrides a path-level one with the same name and location.
fn merge_parameters<'a>(
    spec: &'a SwaggerSpec,
    shared: &'a [ParameterOrRef],
    own: &'a [ParameterOrRef],
) -> Result<Vec<&'a Parameter>, MalformedSchemaError> {
    let own: Vec<&Parameter> = own
        .iter()
        .map(|p| resolve_parameter(spec, p))
        .collect::<Result<_, _>>()?;

    let mut merged = Vec::with_capacity(shared.len() + own.len());
    for param in shared {
        let param = resolve_parameter(spec, param)?;
        let overridden = own
            .iter()
            .any(|o| o.name == param.name && o.location == param.location);
        if !overridden {
            merged.push(param);
        }
    }
    merged.extend(own);
    Ok(merged)
}

fn resolve_parameter<'a>(
    spec: &'a SwaggerSpec,
    param: &'a ParameterOrRef,
) -> Result<&'a Parameter, MalformedSchemaError> {
    match param {
        ParameterOrRef::Parameter(param) => Ok(&**param),
        ParameterOrRef::Ref { ref_path } => ref_path
            .strip_prefix("#/parameters/")
            .and_then(|name| spec.parameters.get(name))
            .ok_or_else(|| MalformedSchemaError::UnresolvableRef(ref_path.clone())),
    }
}

/// Convert every definition, keyed by its raw name.
fn resolve_definitions(
    definitions: &IndexMap<String, Schema>,
) -> Result<Vec<(String, IrModel)>, TransformError> {
    definitions
        .iter()
        .map(|(key, schema)| Ok((key.clone(), transform_model(key, schema)?)))
        .collect()
}

/// Convert one definition into a model, keeping property order.
pub fn transform_model(key: &str, schema: &Schema) -> Result<IrModel, TransformError> {
    let name = sanitize_model_name(key);
    if name.is_empty() {
        return Err(MalformedSchemaError::UnresolvableRef(format!("#/definitions/{key}")).into());
    }

    let props = schema
        .properties
        .iter()
        .map(|(prop_key, prop)| {
            Ok(IrProperty {
                key: prop_key.clone(),
                required: schema.required.contains(prop_key),
                prop_type: resolve_type(&TypeNode::from_schema(prop)?),
                description: prop.description.clone(),
            })
        })
        .collect::<Result<Vec<_>, MalformedSchemaError>>()?;

    Ok(IrModel {
        name,
        description: non_empty(schema.title.as_deref())
            .or_else(|| non_empty(schema.description.as_deref())),
        props,
    })
}

/// Claim identifiers for query models first, then definitions, and point
/// every reference and api at the claimed names.
fn assign_model_names(
    query_models: Vec<IrModel>,
    definitions: Vec<(String, IrModel)>,
    buckets: &mut IndexMap<String, Vec<IrApi>>,
) -> Vec<IrModel> {
    let mut registry = NameRegistry::new();
    let mut query_names: HashMap<String, String> = HashMap::new();
    let mut definition_names: HashMap<String, String> = HashMap::new();
    let mut models = Vec::with_capacity(query_models.len() + definitions.len());

    for mut model in query_models {
        let claimed = registry.claim(&model.name);
        query_names.insert(model.name.clone(), claimed.clone());
        model.name = claimed;
        models.push(model);
    }

    for (key, mut model) in definitions {
        let claimed = registry.claim(&model.name);
        definition_names.insert(key, claimed.clone());
        model.name = claimed;
        models.push(model);
    }

    let rename = |key: &str| definition_names.get(key).cloned();

    for model in &mut models {
        for prop in &mut model.props {
            prop.prop_type.rename_refs(&rename);
        }
    }

    for api in buckets.values_mut().flatten() {
        if let Some(ref mut body) = api.body {
            body.rename_refs(&rename);
        }
        for param in &mut api.path_params {
            param.prop_type.rename_refs(&rename);
        }
        api.response.rename_refs(&rename);
        if let Some(claimed) = api.query.as_deref().and_then(|q| query_names.get(q)) {
            api.query = Some(claimed.clone());
        }
        api.model_names = collect_model_names(api);
    }

    models
}

/// Models an api needs imported: body, query model, response.
fn collect_model_names(api: &IrApi) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let candidates = [
        api.body.as_ref().and_then(IrType::model_name),
        api.query.as_deref(),
        api.response.model_name(),
    ];
    for name in candidates.into_iter().flatten() {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

fn group_into_tags(declared: &[Tag], mut buckets: IndexMap<String, Vec<IrApi>>) -> Vec<IrTag> {
    let mut files = NameRegistry::for_paths([MODELS_FILE, INDEX_FILE]);
    let mut tags = Vec::with_capacity(declared.len() + buckets.len());

    for tag in declared {
        let apis = buckets.shift_remove(&tag.name).unwrap_or_default();
        tags.push(IrTag {
            name: files.claim(&declared_tag_identifier(tag)),
            description: tag.name.clone(),
            apis,
        });
    }

    // Buckets whose tag string was never declared
    for (key, apis) in buckets {
        let identifier = sanitize_model_name(&key);
        let identifier = if identifier.is_empty() {
            DEFAULT_TAG.to_string()
        } else {
            identifier
        };
        tags.push(IrTag {
            name: files.claim(&identifier),
            description: key,
            apis,
        });
    }

    tags
}

/// The controller name in `description` without spaces or `*`, falling
/// back to the tag name.
fn declared_tag_identifier(tag: &Tag) -> String {
    let controller: String = tag
        .description
        .as_deref()
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '*')
        .collect();

    [controller.as_str(), tag.name.as_str()]
        .into_iter()
        .map(sanitize_model_name)
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_TAG.to_string())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(String::from)
}
