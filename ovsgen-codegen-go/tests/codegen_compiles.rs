//! Integration tests that verify generated code is valid Go.
//!
//! These tests generate Go files from schemas and run `gofmt -e` over them.
//! They are skipped when `gofmt` is not installed.

use ovsgen_codegen::testing::{GoChecker, SyntaxChecker, assert_generates_valid_code, tool_available};
use ovsgen_codegen_go::{Block, Generator, LanguageCodegen, OverrideTemplate};
use ovsgen_schema::DatabaseSchema;

fn assert_generated_code_is_valid(schema_json: &str, template: OverrideTemplate) {
    let checker = GoChecker;
    if !tool_available(checker.tool()) {
        eprintln!("skipping: {} not available", checker.tool());
        return;
    }

    let schema: DatabaseSchema = schema_json.parse().expect("Failed to parse schema");
    let generator = Generator::new(&schema, "ovsmodel").with_template(template);

    assert_generates_valid_code(
        |dir| {
            generator.generate(dir)?;
            Ok(())
        },
        &checker,
    )
    .expect("Generated code is not valid Go");
}

#[test]
fn test_enums_and_compound_types_are_valid() {
    assert_generated_code_is_valid(
        r#"{
            "name": "Sample",
            "version": "1.0.0",
            "tables": {
                "Logical_Router": {
                    "columns": {
                        "name": { "type": "string" },
                        "enabled": { "type": { "key": "boolean", "min": 0, "max": 1 } },
                        "ports": {
                            "type": { "key": { "type": "uuid", "refTable": "Port" }, "min": 0, "max": "unlimited" }
                        },
                        "external_ids": {
                            "type": { "key": "string", "value": "string", "min": 0, "max": "unlimited" }
                        },
                        "policy": {
                            "type": { "key": { "type": "string", "enum": ["set", ["allow", "drop", "reroute"]] } }
                        },
                        "weights": {
                            "type": { "key": { "type": "real", "enum": ["set", [0.5, 1.5]] } }
                        }
                    }
                },
                "Port": {
                    "columns": { "mtu": { "type": "integer" } }
                }
            }
        }"#,
        OverrideTemplate::default(),
    );
}

#[test]
fn test_overridden_blocks_are_valid() {
    assert_generated_code_is_valid(
        r#"{
            "name": "Sample",
            "version": "1.0.0",
            "tables": {
                "Bridge": { "columns": { "name": { "type": "string" } } }
            }
        }"#,
        OverrideTemplate::new()
            .with_block(Block::PreStructDefinitions, "import \"fmt\"")
            .with_block(Block::ExtraTags, " json:\"{Column}\"")
            .with_block(Block::ExtraFields, "Extra map[string]string")
            .with_block(
                Block::PostStructDefinitions,
                "func (b *{StructName}) String() string {\n\treturn fmt.Sprint(b.Name)\n}",
            ),
    );
}
