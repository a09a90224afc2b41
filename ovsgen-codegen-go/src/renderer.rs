//! Go source rendering for a single table.

use ovsgen_codegen::{
    ModelData,
    builder::{CodeBuilder, CodeFragment, align_columns},
};

use crate::template::{DefaultTemplate, TableTemplate};

/// Renders a [`ModelData`] into a Go source file.
///
/// The layout is fixed: header, package clause, pre-struct definitions,
/// enums, the struct comment and declaration, then post-struct definitions.
/// What goes into each section is up to the [`TableTemplate`].
pub struct GoRenderer<'a> {
    template: &'a dyn TableTemplate,
}

impl<'a> GoRenderer<'a> {
    pub fn new(template: &'a dyn TableTemplate) -> Self {
        Self { template }
    }

    /// Render one table.
    pub fn render(&self, model: &ModelData) -> String {
        let mut builder = CodeBuilder::go();

        let header = self.template.header(model);
        if !header.is_empty() {
            builder.emit(&header).push_blank();
        }
        builder.push_line(&format!("package {}", model.package_name()));

        emit_section(&mut builder, self.template.pre_struct_definitions(model));
        emit_section(&mut builder, self.template.enums(model));

        builder.push_blank();
        builder.emit(&self.template.struct_comment(model));
        builder.emit(&self.struct_declaration(model));

        emit_section(&mut builder, self.template.post_struct_definitions(model));

        builder.build()
    }

    fn struct_declaration(&self, model: &ModelData) -> Vec<CodeFragment> {
        let rows: Vec<Vec<String>> = model
            .fields()
            .iter()
            .map(|field| {
                vec![
                    field.name.clone(),
                    field.ty.clone(),
                    format!("`{}{}`", field.tag, self.template.extra_tags(model, field)),
                ]
            })
            .collect();

        let mut body: Vec<CodeFragment> = align_columns(&rows)
            .into_iter()
            .map(CodeFragment::Line)
            .collect();
        body.extend(self.template.extra_fields(model));

        vec![CodeFragment::block(
            format!("type {} struct {{", model.struct_name()),
            body,
            Some("}".to_string()),
        )]
    }
}

impl Default for GoRenderer<'static> {
    fn default() -> Self {
        Self::new(&DefaultTemplate)
    }
}

/// Emit a section preceded by a blank line, or nothing if it is empty.
fn emit_section(builder: &mut CodeBuilder, fragments: Vec<CodeFragment>) {
    if !fragments.is_empty() {
        builder.push_blank().emit(&fragments);
    }
}
