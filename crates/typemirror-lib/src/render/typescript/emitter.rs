//! TypeScript output assembler.

use std::fmt::{self, Write};

use super::Config;
use super::syntax::{literal, property_name, type_text, write_doc};
use crate::registry::{Declaration, EnumMember, FieldDescriptor};
use crate::render::{OutputAssembler, RenderContext};

/// Default [`OutputAssembler`]: one `interface` per aggregate, one `enum`
/// per enumeration, optionally wrapped in a `namespace`.
#[derive(Clone, Debug, Default)]
pub struct TypeScript {
    config: Config,
}

impl TypeScript {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn export(&self) -> &'static str {
        if self.config.export { "export " } else { "" }
    }

    fn declaration(
        &self,
        cx: &RenderContext<'_>,
        decl: &Declaration,
        out: &mut String,
    ) -> fmt::Result {
        let indent = &decl.indent;

        if let Some(doc) = &decl.doc {
            write_doc(out, indent, doc)?;
        }
        writeln!(out, "{indent}// {}", decl.origin.qualified())?;

        if decl.is_enumeration() {
            return self.enumeration(decl, out);
        }
        self.interface(cx, decl, out)
    }

    fn interface(
        &self,
        cx: &RenderContext<'_>,
        decl: &Declaration,
        out: &mut String,
    ) -> fmt::Result {
        let indent = &decl.indent;
        let extends = if decl.inherited().is_empty() {
            String::new()
        } else {
            format!(" extends {}", decl.inherited().join(", "))
        };

        write!(
            out,
            "{indent}{}interface {}{extends} {{",
            self.export(),
            decl.name
        )?;
        if decl.fields().is_empty() {
            return writeln!(out, "}}");
        }
        out.push('\n');

        for field in decl.fields() {
            self.field(cx, field, out)?;
        }
        writeln!(out, "{indent}}}")
    }

    fn field(
        &self,
        cx: &RenderContext<'_>,
        field: &FieldDescriptor,
        out: &mut String,
    ) -> fmt::Result {
        let indent = &field.indent;
        if let Some(doc) = &field.doc {
            write_doc(out, indent, doc)?;
        }

        let optional = if field.optional { "?" } else { "" };
        writeln!(
            out,
            "{indent}{}{optional}: {};",
            property_name(&field.name),
            type_text(&cx.resolve(field.ty))
        )
    }

    fn enumeration(&self, decl: &Declaration, out: &mut String) -> fmt::Result {
        let indent = &decl.indent;
        write!(out, "{indent}{}enum {} {{", self.export(), decl.name)?;
        if decl.members().is_empty() {
            return writeln!(out, "}}");
        }
        out.push('\n');

        for member in decl.members() {
            self.member(member, out)?;
        }
        writeln!(out, "{indent}}}")
    }

    fn member(&self, member: &EnumMember, out: &mut String) -> fmt::Result {
        write!(
            out,
            "{}{} = {},",
            member.indent,
            property_name(&member.name),
            literal(&member.value)
        )?;
        // Trailing comments must stay on one line.
        let comment = member
            .comment
            .as_deref()
            .map(|c| c.split_whitespace().collect::<Vec<_>>().join(" "))
            .unwrap_or_default();
        if comment.is_empty() {
            out.write_char('\n')
        } else {
            writeln!(out, " // {comment}")
        }
    }
}

impl OutputAssembler for TypeScript {
    fn indent_unit(&self) -> &str {
        &self.config.indent
    }

    fn assemble(&self, cx: &RenderContext<'_>, out: &mut String) -> fmt::Result {
        if !cx.header().is_empty() {
            writeln!(out, "{}", cx.header())?;
            out.push('\n');
        }

        if let Some(namespace) = cx.namespace() {
            writeln!(out, "{}namespace {namespace} {{", self.export())?;
        }

        for (i, decl) in cx.declarations().iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            self.declaration(cx, decl, out)?;
        }

        if cx.namespace().is_some() {
            writeln!(out, "}}")?;
        }
        Ok(())
    }
}
