use super::binding::FieldBinding;
use super::naming::{rust_string_literal, sanitize_rust_identifier};
use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::model::{ApiModel, Endpoint, HttpMethod, Service};

/// Template view of one endpoint wrapper plus its envelope alias.
#[derive(Debug, Clone)]
pub struct EndpointView {
    /// Business method called on the receiver
    pub handler: String,
    /// Generated wrapper method
    pub wrapper: String,
    /// Quoted url matched by the dispatcher
    pub url: String,
    /// One-line description used as the wrapper's doc comment
    pub summary: String,
    pub envelope: String,
    pub output: String,
    pub input: String,
    pub post_only: bool,
    pub auth: bool,
    /// Expression selecting where parameters are read from
    pub source: String,
    pub has_fields: bool,
    pub fields: Vec<FieldBinding>,
}

impl EndpointView {
    pub fn new(
        model: &ApiModel,
        endpoint: &Endpoint,
        runtime: &str,
    ) -> Result<Self, GenerateError> {
        let input = model.parameter_type(&endpoint.input_type).ok_or_else(|| {
            GenerateError::UnresolvedType {
                service: endpoint.service.clone(),
                handler: endpoint.handler_name.clone(),
                reference: endpoint.input_type.clone(),
            }
        })?;
        let post_only = endpoint.method == HttpMethod::Post;
        let source = if post_only {
            format!("{runtime}::ParamSource::Form")
        } else {
            format!("{runtime}::ParamSource::for_method(req.method())")
        };
        let mut summary = format!("{} {}", endpoint.method, endpoint.url_path);
        if endpoint.auth_required {
            summary.push_str(", credential required");
        }
        let fields: Vec<FieldBinding> = input.fields.iter().map(FieldBinding::new).collect();

        Ok(EndpointView {
            handler: sanitize_rust_identifier(&endpoint.handler_name),
            wrapper: endpoint.wrapper_name(),
            url: rust_string_literal(&endpoint.url_path),
            summary,
            envelope: endpoint.envelope_name(),
            output: endpoint.output_type.clone(),
            input: input.name.clone(),
            post_only,
            auth: endpoint.auth_required,
            source,
            has_fields: !fields.is_empty(),
            fields,
        })
    }
}

/// Template view of one service's dispatcher.
#[derive(Debug, Clone)]
pub struct ServiceView {
    pub name: String,
    pub endpoints: Vec<EndpointView>,
}

impl ServiceView {
    pub fn new(
        model: &ApiModel,
        service: &Service,
        config: &GeneratorConfig,
    ) -> Result<Self, GenerateError> {
        let endpoints = service
            .endpoints
            .iter()
            .map(|ep| EndpointView::new(model, ep, &config.runtime_path))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ServiceView {
            name: service.name.clone(),
            endpoints,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::decl::{parse_declarations, DeclFormat};
    use crate::model::build_model;

    const DECLS: &str = r#"
types:
  - name: CreateParams
    fields:
      - { name: login, type: string, annotation: "required" }
handlers:
  - { name: create, service: MyApi, input: CreateParams, output: User, api: { url: /user/create, method: POST, auth: true } }
  - { name: type, service: MyApi, input: CreateParams, output: User, api: { url: /user/type } }
"#;

    #[test]
    fn test_endpoint_views() {
        let model = build_model(&parse_declarations(DECLS, DeclFormat::Yaml).unwrap()).unwrap();
        let view = ServiceView::new(&model, &model.services["MyApi"], &GeneratorConfig::default())
            .unwrap();
        assert_eq!(view.name, "MyApi");

        let create = &view.endpoints[0];
        assert!(create.post_only && create.auth && create.has_fields);
        assert_eq!(create.url, "\"/user/create\"");
        assert_eq!(create.wrapper, "serve_create_endpoint");
        assert_eq!(create.source, "::apigen::runtime::ParamSource::Form");
        assert_eq!(create.summary, "POST /user/create, credential required");
        assert_eq!(create.envelope, "ResponseMyApiCreate");

        let ty = &view.endpoints[1];
        assert!(!ty.post_only && !ty.auth);
        assert_eq!(ty.handler, "r#type");
        assert_eq!(ty.wrapper, "serve_type_endpoint");
        assert_eq!(
            ty.source,
            "::apigen::runtime::ParamSource::for_method(req.method())"
        );
    }
}
