use super::{ApiModel, Endpoint, Field, FieldKey, FieldKind, HttpMethod, ParameterType, Service};
use crate::decl::{Declarations, HandlerDecl, RouteBlock, TypeDecl};
use crate::error::GenerateError;
use crate::generator::{is_rust_identifier, is_rust_path, is_usable_field_name};
use crate::rules::parse_annotation;
use std::collections::HashSet;

/// Build the model for one generation run.
///
/// Types are processed first so every routed handler can resolve its input
/// type; the first problem found aborts the run.
pub fn build_model(decls: &Declarations) -> Result<ApiModel, GenerateError> {
    let mut model = ApiModel::default();

    for decl in &decls.types {
        let ty = build_type(decl)?;
        if model.types.contains_key(&ty.name) {
            return Err(GenerateError::DuplicateDeclaration {
                what: "type",
                scope: "declarations".to_string(),
                name: ty.name,
            });
        }
        model.types.insert(ty.name.clone(), ty);
    }

    for handler in &decls.handlers {
        let Some(api) = &handler.api else {
            tracing::debug!(service = %handler.service, handler = %handler.name, "no routing block, skipping");
            continue;
        };
        let endpoint = build_endpoint(&model, handler, api)?;
        let service = model
            .services
            .entry(endpoint.service.clone())
            .or_insert_with(|| Service {
                name: endpoint.service.clone(),
                endpoints: Vec::new(),
            });
        if service.endpoints.iter().any(|e| e.handler_name == endpoint.handler_name) {
            return Err(GenerateError::DuplicateDeclaration {
                what: "handler",
                scope: endpoint.service.clone(),
                name: endpoint.handler_name,
            });
        }
        if service.endpoints.iter().any(|e| e.url_path == endpoint.url_path) {
            return Err(GenerateError::DuplicateDeclaration {
                what: "url",
                scope: endpoint.service.clone(),
                name: endpoint.url_path,
            });
        }
        tracing::debug!(
            service = %endpoint.service,
            handler = %endpoint.handler_name,
            url = %endpoint.url_path,
            method = %endpoint.method,
            "registered endpoint"
        );
        service.endpoints.push(endpoint);
    }

    check_generated_names(&model)?;
    Ok(model)
}

/// Name of the dispatcher method every service gets.
const DISPATCH_METHOD: &str = "serve_http";

/// Reject declarations whose distinct names still collide once turned into
/// generated items: envelope aliases share the module with the parameter
/// structs, and wrappers share each service's impl with its handlers.
fn check_generated_names(model: &ApiModel) -> Result<(), GenerateError> {
    let mut items: HashSet<String> = model.types.keys().cloned().collect();
    for service in model.services.values() {
        let wrappers: HashSet<String> = service.endpoints.iter().map(Endpoint::wrapper_name).collect();
        for endpoint in &service.endpoints {
            if endpoint.handler_name == DISPATCH_METHOD {
                return Err(GenerateError::InvalidIdentifier {
                    what: "handler",
                    name: format!("{}.{}", service.name, endpoint.handler_name),
                });
            }
            if wrappers.contains(&endpoint.handler_name) {
                return Err(GenerateError::DuplicateDeclaration {
                    what: "method",
                    scope: service.name.clone(),
                    name: endpoint.handler_name.clone(),
                });
            }
            let envelope = endpoint.envelope_name();
            if !items.insert(envelope.clone()) {
                return Err(GenerateError::DuplicateDeclaration {
                    what: "envelope",
                    scope: format!("{}.{}", service.name, endpoint.handler_name),
                    name: envelope,
                });
            }
        }
    }
    Ok(())
}

fn build_type(decl: &TypeDecl) -> Result<ParameterType, GenerateError> {
    if !is_rust_identifier(&decl.name) {
        return Err(GenerateError::InvalidIdentifier {
            what: "type",
            name: decl.name.clone(),
        });
    }
    let mut keys = HashSet::new();
    let mut fields = Vec::with_capacity(decl.fields.len());
    for field in &decl.fields {
        let key = FieldKey::new(&decl.name, &field.name);
        if !is_usable_field_name(&field.name) {
            return Err(GenerateError::InvalidIdentifier {
                what: "field",
                name: key.to_string(),
            });
        }
        // Fields are read from the request by lower-cased name.
        if !keys.insert(field.name.to_lowercase()) {
            return Err(GenerateError::DuplicateDeclaration {
                what: "field",
                scope: decl.name.clone(),
                name: field.name.clone(),
            });
        }
        let kind = FieldKind::from_declared(&field.ty).ok_or_else(|| {
            GenerateError::UnsupportedFieldKind {
                field: key.clone(),
                declared: field.ty.clone(),
            }
        })?;
        let rules = parse_annotation(&key, kind, field.annotation.as_deref().unwrap_or(""))?;
        fields.push(Field {
            name: field.name.clone(),
            kind,
            rules,
        });
    }
    Ok(ParameterType {
        name: decl.name.clone(),
        fields,
    })
}

fn build_endpoint(
    model: &ApiModel,
    handler: &HandlerDecl,
    api: &RouteBlock,
) -> Result<Endpoint, GenerateError> {
    if !is_rust_identifier(&handler.service) {
        return Err(GenerateError::InvalidIdentifier {
            what: "service",
            name: handler.service.clone(),
        });
    }
    if !is_usable_field_name(&handler.name) {
        return Err(GenerateError::InvalidIdentifier {
            what: "handler",
            name: format!("{}.{}", handler.service, handler.name),
        });
    }
    let invalid_route = |reason: String| GenerateError::InvalidRoute {
        service: handler.service.clone(),
        handler: handler.name.clone(),
        reason,
    };
    let unresolved = |reference: &str| GenerateError::UnresolvedType {
        service: handler.service.clone(),
        handler: handler.name.clone(),
        reference: reference.to_string(),
    };

    let method = HttpMethod::parse(&api.method)
        .ok_or_else(|| invalid_route(format!("unsupported method '{}'", api.method)))?;
    if !api.url.starts_with('/') {
        return Err(invalid_route(format!("url '{}' must start with '/'", api.url)));
    }
    if api.url.chars().any(|c| c.is_whitespace() || c.is_control() || c == '?') {
        return Err(invalid_route(format!("url '{}' must be a plain path", api.url)));
    }

    let input = handler.input.as_deref().map(str::trim).unwrap_or("");
    if model.parameter_type(input).is_none() {
        return Err(unresolved(input));
    }

    let output = handler
        .output
        .as_deref()
        .map(|o| o.trim().trim_start_matches(['*', '&']).trim())
        .unwrap_or("");
    if output.is_empty() {
        return Err(unresolved(output));
    }
    if !is_rust_path(output) {
        return Err(GenerateError::InvalidIdentifier {
            what: "output type",
            name: output.to_string(),
        });
    }

    Ok(Endpoint {
        handler_name: handler.name.clone(),
        service: handler.service.clone(),
        url_path: api.url.clone(),
        method,
        auth_required: api.auth,
        input_type: input.to_string(),
        output_type: output.to_string(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::decl::{parse_declarations, DeclFormat};

    fn model(yaml: &str) -> Result<ApiModel, GenerateError> {
        build_model(&parse_declarations(yaml, DeclFormat::Yaml).unwrap())
    }

    const BASE: &str = r#"
types:
  - name: CreateParams
    fields:
      - { name: login, type: string, annotation: "required,min=3" }
      - { name: age, type: int, annotation: "min=0,max=128" }
      - { name: note, type: string }
handlers:
  - name: create
    service: MyApi
    input: CreateParams
    output: "*User"
    api: { url: /user/create, method: post, auth: true }
  - name: profile
    service: MyApi
    input: CreateParams
    output: User
    api: { url: /user/profile }
  - name: internal
    service: MyApi
    input: CreateParams
    output: User
  - name: create
    service: OtherApi
    input: CreateParams
    output: OtherUser
    api: { url: /user/create, method: GET }
"#;

    #[test]
    fn test_builds_types_in_declaration_order() {
        let model = model(BASE).unwrap();
        let ty = model.parameter_type("CreateParams").unwrap();
        let names: Vec<_> = ty.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["login", "age", "note"]);
        assert_eq!(ty.fields[1].kind, FieldKind::Integer);
        assert!(ty.fields[2].rules.is_unconstrained());
        let age = model.field(&FieldKey::new("CreateParams", "age")).unwrap();
        assert_eq!(age.rules.max, Some(128));
    }

    #[test]
    fn test_groups_endpoints_by_service_and_skips_unrouted() {
        let model = model(BASE).unwrap();
        let services: Vec<_> = model.services.keys().cloned().collect();
        assert_eq!(services, vec!["MyApi", "OtherApi"]);
        let my_api = &model.services["MyApi"];
        assert_eq!(my_api.endpoints.len(), 2);
        let create = &my_api.endpoints[0];
        assert_eq!(create.method, HttpMethod::Post);
        assert!(create.auth_required);
        assert_eq!(create.output_type, "User");
        assert_eq!(create.envelope_name(), "ResponseMyApiCreate");
        assert_eq!(my_api.endpoints[1].method, HttpMethod::Any);
        assert_eq!(model.services["OtherApi"].endpoints[0].method, HttpMethod::Get);
        assert_eq!(model.endpoints().count(), 3);
    }

    #[test]
    fn test_unsupported_field_kind() {
        let err = model(
            "types:\n  - name: P\n    fields:\n      - { name: ok, type: bool }\n",
        )
        .unwrap_err();
        assert_eq!(
            err,
            GenerateError::UnsupportedFieldKind {
                field: FieldKey::new("P", "ok"),
                declared: "bool".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_annotation_aborts_run() {
        let err = model(
            "types:\n  - name: P\n    fields:\n      - { name: age, type: int, annotation: \"=1\" }\n",
        )
        .unwrap_err();
        assert_eq!(err.kind(), "MalformedAnnotation");
    }

    #[test]
    fn test_unresolved_input_type() {
        let err = model(
            "handlers:\n  - { name: h, service: S, input: Missing, output: O, api: { url: /h } }\n",
        )
        .unwrap_err();
        assert_eq!(
            err,
            GenerateError::UnresolvedType {
                service: "S".to_string(),
                handler: "h".to_string(),
                reference: "Missing".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_output_type_is_unresolved() {
        let yaml = "types:\n  - { name: P }\nhandlers:\n  - { name: h, service: S, input: P, api: { url: /h } }\n";
        assert_eq!(model(yaml).unwrap_err().kind(), "UnresolvedType");
    }

    #[test]
    fn test_unrouted_handler_with_bad_types_is_ignored() {
        let yaml = "handlers:\n  - { name: h, service: S, input: Missing }\n";
        assert!(model(yaml).unwrap().services.is_empty());
    }

    #[test]
    fn test_invalid_method_and_url() {
        let yaml = "types:\n  - { name: P }\nhandlers:\n  - { name: h, service: S, input: P, output: O, api: { url: /h, method: PUT } }\n";
        assert_eq!(model(yaml).unwrap_err().kind(), "InvalidRoute");
        let yaml = "types:\n  - { name: P }\nhandlers:\n  - { name: h, service: S, input: P, output: O, api: { url: h } }\n";
        assert_eq!(model(yaml).unwrap_err().kind(), "InvalidRoute");
        let yaml = "types:\n  - { name: P }\nhandlers:\n  - { name: h, service: S, input: P, output: O, api: { url: \"/h?x=1\" } }\n";
        assert_eq!(model(yaml).unwrap_err().kind(), "InvalidRoute");
    }

    #[test]
    fn test_duplicates_are_rejected() {
        let yaml = "types:\n  - { name: P }\n  - { name: P }\n";
        assert_eq!(model(yaml).unwrap_err().kind(), "DuplicateDeclaration");

        let yaml = "types:\n  - name: P\n    fields:\n      - { name: Login, type: string }\n      - { name: login, type: string }\n";
        assert_eq!(model(yaml).unwrap_err().kind(), "DuplicateDeclaration");

        let yaml = "types:\n  - { name: P }\nhandlers:\n  - { name: a, service: S, input: P, output: O, api: { url: /x } }\n  - { name: b, service: S, input: P, output: O, api: { url: /x } }\n";
        assert_eq!(
            model(yaml).unwrap_err(),
            GenerateError::DuplicateDeclaration {
                what: "url",
                scope: "S".to_string(),
                name: "/x".to_string(),
            }
        );
    }

    #[test]
    fn test_colliding_envelope_names_are_rejected() {
        let yaml = "types:\n  - { name: P }\nhandlers:\n  - { name: get_user, service: S, input: P, output: O, api: { url: /a } }\n  - { name: getUser, service: S, input: P, output: O, api: { url: /b } }\n";
        assert_eq!(
            model(yaml).unwrap_err(),
            GenerateError::DuplicateDeclaration {
                what: "envelope",
                scope: "S.getUser".to_string(),
                name: "ResponseSGetUser".to_string(),
            }
        );

        let yaml = "types:\n  - { name: P }\nhandlers:\n  - { name: b_c, service: A, input: P, output: O, api: { url: /a } }\n  - { name: c, service: AB, input: P, output: O, api: { url: /a } }\n";
        let err = model(yaml).unwrap_err();
        assert_eq!(err.kind(), "DuplicateDeclaration");
        assert!(err.to_string().contains("ResponseABC"));

        let yaml = "types:\n  - { name: ResponseSList }\nhandlers:\n  - { name: list, service: S, input: ResponseSList, output: O, api: { url: /a } }\n";
        assert_eq!(model(yaml).unwrap_err().kind(), "DuplicateDeclaration");
    }

    #[test]
    fn test_handler_names_clashing_with_generated_methods() {
        let yaml = "types:\n  - { name: P }\nhandlers:\n  - { name: serve_http, service: S, input: P, output: O, api: { url: /a } }\n";
        assert_eq!(
            model(yaml).unwrap_err(),
            GenerateError::InvalidIdentifier {
                what: "handler",
                name: "S.serve_http".to_string(),
            }
        );

        let yaml = "types:\n  - { name: P }\nhandlers:\n  - { name: serve_list_endpoint, service: S, input: P, output: O, api: { url: /a } }\n  - { name: list, service: S, input: P, output: O, api: { url: /b } }\n";
        assert_eq!(
            model(yaml).unwrap_err(),
            GenerateError::DuplicateDeclaration {
                what: "method",
                scope: "S".to_string(),
                name: "serve_list_endpoint".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_identifiers() {
        let yaml = "types:\n  - name: P\n    fields:\n      - { name: my-field, type: string }\n";
        assert_eq!(model(yaml).unwrap_err().kind(), "InvalidIdentifier");
        let yaml = "types:\n  - name: P\n    fields:\n      - { name: self, type: string }\n";
        assert_eq!(model(yaml).unwrap_err().kind(), "InvalidIdentifier");
        let yaml = "types:\n  - { name: P }\nhandlers:\n  - { name: h, service: S, input: P, output: \"Vec<O>\", api: { url: /h } }\n";
        assert_eq!(model(yaml).unwrap_err().kind(), "InvalidIdentifier");
    }

    #[test]
    fn test_keyword_field_names_are_allowed() {
        let yaml = "types:\n  - name: P\n    fields:\n      - { name: type, type: string }\n";
        assert!(model(yaml).is_ok());
    }
}
