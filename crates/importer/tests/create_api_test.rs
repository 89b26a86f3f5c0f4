//! End-to-end imports of the bundled fixtures

use mockall::mock;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use swagger_import_common::{
    ApiDraft, HttpMethod, ImportDescriptor, ImportError, ImporterConfig, MetadataFormat,
    VirtualHost, Visibility,
};
use swagger_import_importer::{GroupLookup, GroupRef, Importer};

mock! {
    pub Groups {}

    impl GroupLookup for Groups {
        fn find_groups_by_name(&self, name: &str) -> Vec<GroupRef>;
    }
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn importer() -> Importer {
    let mut groups = MockGroups::new();
    groups
        .expect_find_groups_by_name()
        .returning(|name| match name {
            "group1" | "group2" => vec![GroupRef::new(name, name)],
            _ => Vec::new(),
        });

    Importer::new(&ImporterConfig::default())
        .expect("Failed to create importer")
        .with_groups(Arc::new(groups))
}

fn import_inline(name: &str) -> ApiDraft {
    let content = fs::read_to_string(fixture(name)).expect("Failed to read fixture");
    importer()
        .create_api(&ImportDescriptor::inline(content))
        .expect("Failed to import inline fixture")
}

fn import_url(name: &str) -> ApiDraft {
    import_descriptor(ImportDescriptor::url(fixture(name).to_string_lossy()))
}

fn import_descriptor(descriptor: ImportDescriptor) -> ApiDraft {
    importer()
        .create_api(&descriptor)
        .expect("Failed to import fixture")
}

fn path_keys(draft: &ApiDraft) -> Vec<&str> {
    draft.paths.keys().map(String::as_str).collect()
}

fn assert_base_draft(draft: &ApiDraft) {
    assert_eq!(draft.version, "1.2.3");
    assert_eq!(draft.name, "Gravitee.io Swagger API");
    assert_eq!(draft.proxy.virtual_hosts.len(), 1);
    assert_eq!(draft.proxy.virtual_hosts[0].path, "/gateway/echo");
    assert_eq!(
        draft.endpoint_targets().first().copied(),
        Some("https://demo.gravitee.io/gateway/echo")
    );
    assert_eq!(path_keys(draft), vec!["/pets", "/pets/:petId"]);
    assert!(draft.paths["/pets"].rule_for(HttpMethod::Get).is_some());
    assert!(draft.paths["/pets"].rule_for(HttpMethod::Post).is_some());
    assert_eq!(
        draft.paths["/pets"].rules[0].description,
        "List all pets"
    );
}

fn assert_extended_draft(draft: &ApiDraft) {
    assert_base_draft_without_host(draft);

    assert_eq!(
        draft.proxy.virtual_hosts,
        vec![VirtualHost {
            host: Some("myHost".to_string()),
            path: "myPath".to_string(),
            override_entrypoint: false,
        }]
    );

    let categories: Vec<&str> = draft.categories.iter().map(String::as_str).collect();
    assert_eq!(categories, vec!["cat1", "cat2"]);
    let groups: Vec<&str> = draft.groups.iter().map(String::as_str).collect();
    assert_eq!(groups, vec!["group1", "group2"]);
    assert_eq!(draft.labels, vec!["label1", "label2"]);
    let tags: Vec<&str> = draft.tags.iter().map(String::as_str).collect();
    assert_eq!(tags, vec!["tag1", "tag2"]);

    assert_eq!(draft.properties.len(), 2);
    assert_eq!(draft.properties["prop1"], "propValue1");
    assert_eq!(draft.properties["prop2"], "propValue2");

    assert_eq!(draft.metadata.len(), 2);
    let meta1 = draft.metadata.iter().find(|m| m.name == "meta1").unwrap();
    assert_eq!(meta1.value, "1234");
    assert_eq!(meta1.format, MetadataFormat::Numeric);
    let meta2 = draft.metadata.iter().find(|m| m.name == "meta2").unwrap();
    assert_eq!(meta2.value, "metaValue2");
    assert_eq!(meta2.format, MetadataFormat::String);

    assert_eq!(draft.visibility, Visibility::Private);
    assert_eq!(draft.picture.as_deref(), Some("dataUriPicture"));
}

fn assert_base_draft_without_host(draft: &ApiDraft) {
    assert_eq!(draft.version, "1.2.3");
    assert_eq!(draft.name, "Gravitee.io Swagger API");
    assert_eq!(path_keys(draft), vec!["/pets", "/pets/:petId"]);
}

fn mock_configuration(draft: &ApiDraft, path: &str, method: HttpMethod) -> Value {
    let rule = draft.paths[path]
        .rule_for(method)
        .unwrap_or_else(|| panic!("no {} rule on {}", method, path));
    assert_eq!(rule.policies.len(), 1, "expected one policy on {} {}", method, path);
    assert_eq!(rule.policies[0].name, "mock");
    serde_json::from_str(&rule.policies[0].configuration).unwrap()
}

#[test]
fn test_swagger_v1_inline_and_url() {
    let draft = import_url("swagger-v1.json");
    assert_base_draft(&draft);
    assert_eq!(draft.paths["/pets/:petId"].rules.len(), 1);

    let inline = import_inline("swagger-v1.json");
    assert_base_draft(&inline);
    assert_eq!(inline, draft);
}

#[test]
fn test_swagger_v2_inline_and_url() {
    for name in ["swagger-v2.json", "swagger-v2.yaml"] {
        assert_base_draft(&import_inline(name));
        assert_base_draft(&import_url(name));
    }
}

#[test]
fn test_openapi_inline_and_url() {
    for name in ["openapi.json", "openapi.yaml"] {
        assert_base_draft(&import_inline(name));
        assert_base_draft(&import_url(name));
    }
}

#[test]
fn test_json_and_yaml_produce_same_draft() {
    assert_eq!(import_inline("openapi.json"), import_inline("openapi.yaml"));
    assert_eq!(import_inline("swagger-v2.json"), import_inline("swagger-v2.yaml"));
}

#[test]
fn test_swagger_v2_with_extensions() {
    for name in ["swagger-withExtensions-v2.json", "swagger-withExtensions-v2.yaml"] {
        assert_extended_draft(&import_inline(name));
        assert_extended_draft(&import_url(name));
    }
}

#[test]
fn test_openapi_with_extensions() {
    for name in ["openapi-withExtensions.json", "openapi-withExtensions.yaml"] {
        assert_extended_draft(&import_inline(name));
        assert_extended_draft(&import_url(name));
    }
}

#[test]
fn test_without_extensions_keeps_defaults() {
    let draft = import_inline("openapi.json");
    assert!(draft.groups.is_empty());
    assert!(draft.categories.is_empty());
    assert!(draft.labels.is_empty());
    assert!(draft.metadata.is_empty());
    assert!(draft.picture.is_none());
    assert_eq!(draft.visibility, Visibility::Public);
}

#[test]
fn test_unsupported_version() {
    let result = importer().create_api(&ImportDescriptor::url(
        fixture("unsupported-version.json").to_string_lossy(),
    ));
    assert!(matches!(result, Err(ImportError::UnsupportedSpecVersion(_))));
}

#[test]
fn test_missing_fixture_is_unreachable() {
    let result = importer().create_api(&ImportDescriptor::url(
        fixture("does-not-exist.yaml").to_string_lossy(),
    ));
    assert!(matches!(result, Err(ImportError::UnreachableSource { .. })));
}

#[test]
fn test_no_policies_without_request() {
    let draft = import_url("mock/petstore.yaml");
    assert!(draft
        .paths
        .values()
        .flat_map(|path| &path.rules)
        .all(|rule| rule.policies.is_empty()));
}

#[test]
fn test_mock_api_with_examples() {
    let draft = import_descriptor(
        ImportDescriptor::url(fixture("mock/api-with-examples.yaml").to_string_lossy())
            .with_policies(["mock"])
            .with_policy_paths(true),
    );

    assert_eq!(draft.version, "2.0.0");
    assert_eq!(draft.name, "Simple API overview");
    assert_eq!(draft.proxy.virtual_hosts[0].path, "simpleapioverview");
    assert_eq!(draft.endpoint_targets(), vec!["/"]);
    assert_eq!(path_keys(&draft), vec!["/", "/v2"]);

    let root = &draft.paths["/"];
    assert_eq!(root.rules.len(), 1);
    assert_eq!(root.rules[0].description, "List API versions");

    let config = mock_configuration(&draft, "/", HttpMethod::Get);
    assert_eq!(config["status"], "200");
    assert_eq!(config["headers"][0]["value"], "application/json");
    assert!(config["content"].as_str().unwrap().contains("CURRENT"));
}

#[test]
fn test_mock_callback_example() {
    let draft = import_descriptor(
        ImportDescriptor::url(fixture("mock/callback-example.yaml").to_string_lossy())
            .with_policies(["mock"])
            .with_policy_paths(true),
    );

    assert_eq!(draft.version, "1.0.0");
    assert_eq!(draft.name, "Callback Example");
    assert_eq!(draft.proxy.virtual_hosts[0].path, "callbackexample");
    assert_eq!(draft.endpoint_targets(), vec!["/"]);
    assert_eq!(path_keys(&draft), vec!["/streams"]);

    let streams = &draft.paths["/streams"];
    assert_eq!(streams.rules[0].methods.first(), Some(&HttpMethod::Post));
    assert_eq!(
        streams.rules[0].description,
        "subscribes a client to receive out-of-band data"
    );

    let config = mock_configuration(&draft, "/streams", HttpMethod::Post);
    assert_eq!(config["status"], "201");
    assert!(config["content"]
        .as_str()
        .unwrap()
        .contains("2531329f-fb09-4ef7-887e-84e648214436"));
}

#[test]
fn test_mock_link_example() {
    let draft = import_descriptor(
        ImportDescriptor::url(fixture("mock/link-example.yaml").to_string_lossy())
            .with_policies(["mock"])
            .with_policy_paths(true),
    );

    assert_eq!(draft.name, "Link Example");
    assert_eq!(draft.proxy.virtual_hosts[0].path, "linkexample");
    assert_eq!(
        path_keys(&draft),
        vec![
            "/2.0/users/:username",
            "/2.0/repositories/:username",
            "/2.0/repositories/:username/:slug",
            "/2.0/repositories/:username/:slug/pullrequests",
            "/2.0/repositories/:username/:slug/pullrequests/:pid",
            "/2.0/repositories/:username/:slug/pullrequests/:pid/merge",
        ]
    );
    mock_configuration(&draft, "/2.0/users/:username", HttpMethod::Get);
}

#[test]
fn test_mock_petstore() {
    let draft = import_descriptor(
        ImportDescriptor::url(fixture("mock/petstore.yaml").to_string_lossy())
            .with_policies(["mock"])
            .with_policy_paths(true),
    );

    assert_eq!(draft.version, "1.0.0");
    assert_eq!(draft.name, "Swagger Petstore");
    assert_eq!(draft.proxy.virtual_hosts[0].path, "/v1");
    assert_eq!(draft.endpoint_targets(), vec!["http://petstore.swagger.io/v1"]);
    assert_eq!(path_keys(&draft), vec!["/pets", "/pets/:petId"]);

    let config = mock_configuration(&draft, "/pets/:petId", HttpMethod::Get);
    assert_eq!(config["status"], "200");
    let content: Value = serde_json::from_str(config["content"].as_str().unwrap()).unwrap();
    assert!(content.get("name").is_some());
}

#[test]
fn test_mock_petstore_expanded() {
    let draft = import_descriptor(
        ImportDescriptor::url(fixture("mock/petstore-expanded.yaml").to_string_lossy())
            .with_policies(["mock"])
            .with_policy_paths(true),
    );

    assert_eq!(draft.proxy.virtual_hosts[0].path, "/api");
    assert_eq!(draft.endpoint_targets(), vec!["http://petstore.swagger.io/api"]);
    assert_eq!(path_keys(&draft), vec!["/pets", "/pets/:id"]);
    assert_eq!(draft.paths["/pets/:id"].rules.len(), 2);
}

#[test]
fn test_mock_uspto() {
    let draft = import_descriptor(
        ImportDescriptor::url(fixture("mock/uspto.yaml").to_string_lossy())
            .with_policies(["mock"])
            .with_policy_paths(true),
    );

    assert_eq!(draft.name, "USPTO Data Set API");
    assert_eq!(draft.proxy.virtual_hosts[0].path, "/ds-api");
    assert_eq!(
        draft.endpoint_targets(),
        vec![
            "https://developer.uspto.gov/ds-api",
            "http://developer.uspto.gov/ds-api",
        ]
    );
    assert_eq!(
        path_keys(&draft),
        vec!["/", "/:dataset/:version/fields", "/:dataset/:version/records"]
    );

    let endpoints = &draft.proxy.groups[0].endpoints;
    assert_eq!(endpoints[0].name, "default");
    assert_eq!(endpoints[1].name, "server1");
}

#[test]
fn test_mock_enum_example() {
    let draft = import_descriptor(
        ImportDescriptor::url(fixture("mock/enum-example.yml").to_string_lossy())
            .with_policies(["mock"])
            .with_policy_paths(true),
    );

    assert_eq!(draft.version, "v1");
    assert_eq!(draft.name, "Gravitee Import Mock Example");
    assert_eq!(draft.proxy.virtual_hosts[0].path, "graviteeimportmockexample");
    assert_eq!(draft.endpoint_targets(), vec!["/"]);
    assert_eq!(path_keys(&draft), vec!["/"]);

    let config = mock_configuration(&draft, "/", HttpMethod::Get);
    let content: Value = serde_json::from_str(config["content"].as_str().unwrap()).unwrap();
    assert_eq!(content["state"], "UP");
}

#[test]
fn test_monoserver() {
    let draft = import_url("mock/openapi-monoserver.yaml");
    assert_eq!(draft.proxy.virtual_hosts[0].path, "/v1");
    assert_eq!(
        draft.endpoint_targets(),
        vec!["https://development.gigantic-server.com/v1"]
    );
}

#[test]
fn test_multiserver() {
    let draft = import_url("mock/openapi-multiserver.yaml");
    assert_eq!(draft.proxy.virtual_hosts[0].path, "/v1");
    assert_eq!(
        draft.endpoint_targets(),
        vec![
            "https://development.gigantic-server.com/v1",
            "https://staging.gigantic-server.com/v1",
            "https://api.gigantic-server.com/v1",
        ]
    );
}

#[test]
fn test_noserver() {
    let descriptor = ImportDescriptor::url(fixture("mock/openapi-noserver.yaml").to_string_lossy());

    let draft = import_descriptor(descriptor.clone().with_policy_paths(true));
    assert_eq!(draft.proxy.virtual_hosts[0].path, "noserver");
    assert_eq!(draft.endpoint_targets(), vec!["/"]);

    let draft = import_descriptor(descriptor);
    assert_eq!(draft.proxy.virtual_hosts[0].path, "/");
}

#[test]
fn test_variables_in_server() {
    let draft = import_url("mock/openapi-variables-in-server.yaml");
    assert_eq!(draft.proxy.virtual_hosts[0].path, "/v2");
    assert_eq!(
        draft.endpoint_targets(),
        vec![
            "https://demo.gigantic-server.com:443/v2",
            "https://demo.gigantic-server.com:8443/v2",
        ]
    );
}

#[test]
fn test_configured_plugin_schema_drops_mock_policy() {
    let mut config_file = tempfile::NamedTempFile::new().unwrap();
    write!(
        config_file,
        r#"
policies:
  plugins:
    - id: mock
      name: Strict mock
      schema: '{{"type": "object", "required": ["delay"]}}'
      phases: [on_request]
"#
    )
    .unwrap();

    let config = ImporterConfig::load(config_file.path()).expect("Failed to load config");
    let importer = Importer::new(&config).expect("Failed to create importer");
    let draft = importer
        .create_api(
            &ImportDescriptor::url(fixture("mock/petstore.yaml").to_string_lossy())
                .with_policies(["mock"]),
        )
        .expect("Failed to import fixture");

    assert_eq!(path_keys(&draft), vec!["/pets", "/pets/:petId"]);
    assert!(draft.paths["/pets"].rules[0].policies.is_empty());
}
