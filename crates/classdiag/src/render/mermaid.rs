//! Mermaid class diagram backend.
//!
//! Mermaid has no namespace blocks, so every classifier is identified by its
//! qualified name with separators turned into underscores.

use classdiag_core::model::{Classifier, ClassifierKind, Field, Method};

use crate::{
    config::RenderOptions,
    render::{Edge, EdgeKind, LineWriter, Renderer, method_signature, visibility},
};

/// Renders `classDiagram` documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mermaid;

impl Renderer for Mermaid {
    fn begin(&self, out: &mut LineWriter, options: &RenderOptions) {
        if !options.title().is_empty() {
            out.line(0, "---");
            out.line(0, format!("title: {}", options.title()));
            out.line(0, "---");
        }
        out.line(0, "classDiagram");
        let notes = options.notes().trim();
        if !notes.is_empty() {
            let escaped = notes.replace('"', "'").replace('\n', "\\n");
            out.line(1, format!("note \"{escaped}\""));
        }
    }

    fn end(&self, _out: &mut LineWriter, _options: &RenderOptions) {}

    fn open_classifier(&self, out: &mut LineWriter, classifier: &Classifier) {
        let annotation = match classifier.kind() {
            Some(ClassifierKind::Interface) => "<<interface>>",
            Some(ClassifierKind::Alias) => "<<alias>>",
            Some(ClassifierKind::Record) | None => "<<record>>",
        };
        out.line(1, format!("class {} {{", identifier(&classifier.qualified_name())));
        out.line(2, annotation);
    }

    fn close_classifier(&self, out: &mut LineWriter, _classifier: &Classifier) {
        out.line(1, "}");
    }

    fn field(&self, out: &mut LineWriter, field: &Field) {
        out.line(
            2,
            format!(
                "{}{} {}",
                visibility(field.is_exported()),
                field.name(),
                member_type(field.ty().display())
            ),
        );
    }

    fn method(&self, out: &mut LineWriter, method: &Method) {
        out.line(
            2,
            format!(
                "{}{}",
                visibility(method.is_exported()),
                method_signature(method, member_type)
            ),
        );
    }

    fn renamed_stub(&self, out: &mut LineWriter, namespace: &str, synthetic: &str, original: &str) {
        out.line(
            1,
            format!(
                "class {}_{synthetic}[\"{original}\"]",
                identifier(namespace)
            ),
        );
    }

    fn edge(&self, out: &mut LineWriter, edge: &Edge, labeled: bool) {
        let owner = identifier(edge.owner());
        let target = identifier(edge.target());
        let mut line = match edge.kind() {
            EdgeKind::Composition => format!("{target} *-- {owner}"),
            EdgeKind::Extension => format!("{target} <|-- {owner}"),
            EdgeKind::Implementation => format!("{target} <|.. {owner}"),
            EdgeKind::Aggregation => format!("{owner} o-- {target}"),
            EdgeKind::Alias => format!("{target} .. {owner}"),
        };
        if labeled {
            line.push_str(" : ");
            line.push_str(edge.kind().label());
        }
        out.line(1, line);
    }
}

/// A Mermaid identifier for a qualified name: separators and any other
/// character Mermaid does not accept in an identifier become underscores.
fn identifier(qualified: &str) -> String {
    qualified
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Member types drop brace-delimited bodies of inline structs and
/// interfaces, which would close the class block, and use underscores
/// for separators.
fn member_type(ty: &str) -> String {
    let mut out = String::with_capacity(ty.len());
    let mut depth = 0usize;
    for c in ty.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            '.' => out.push('_'),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Model;
    use classdiag_core::model::{Alias, Parameter, Registry, TargetNamespace, TypeRef};

    fn geo_model() -> Model {
        let mut registry = Registry::new();

        let square = registry.get_or_create("geo.shapes", "Square");
        square.declare_kind(ClassifierKind::Record).unwrap();
        square.add_field(Field::new(
            "Side",
            TypeRef::new("float64", "float64"),
            vec![],
        ));
        square.add_field(Field::new(
            "meta",
            TypeRef::new("interface{}", "interface{}"),
            vec![],
        ));
        square.add_method(Method::new(
            "Scale",
            vec![Parameter::new("by", TypeRef::new("units.Factor", "units.Factor"))],
            vec![TypeRef::new("Square", "geo.shapes.Square")],
        ));
        square.add_extension("geo.shapes.Shape");
        square.add_aggregation("units.Factor");

        let shape = registry.get_or_create("geo.shapes", "Shape");
        shape.declare_kind(ClassifierKind::Interface).unwrap();

        registry
            .get_or_create("geo.shapes", "Sides")
            .declare_kind(ClassifierKind::Alias)
            .unwrap();
        registry.add_alias(Alias::new(
            "geo.shapes",
            "Sides",
            "[]float64",
            TargetNamespace::Builtin,
        ));

        Model::new(registry)
    }

    #[test]
    fn test_render_default_options() {
        let text = Mermaid.render(&geo_model(), &RenderOptions::default());

        let expected = r#"classDiagram
    class geo_shapes_Shape {
        <<interface>>
    }
    class geo_shapes_Sides {
        <<alias>>
    }
    class geo_shapes_Square {
        <<record>>
        +Side float64
        +Scale(by units_Factor) Square
    }
    geo_shapes_Shape <|.. geo_shapes_Square
    builtin___float64 .. geo_shapes_Sides
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_title_notes_and_labels() {
        let mut options = RenderOptions::default();
        options.set_str("title", "Geometry").unwrap();
        options.set_str("notes", "say \"hi\"").unwrap();
        options.set_str("connection_labels", "true").unwrap();
        options.set_str("aggregations", "true").unwrap();
        options.set_str("private_members", "true").unwrap();

        let text = Mermaid.render(&geo_model(), &options);

        assert!(text.starts_with("---\ntitle: Geometry\n---\nclassDiagram\n    note \"say 'hi'\"\n"));
        assert!(text.contains("        -meta interface\n"));
        assert!(text.contains("    geo_shapes_Square o-- units_Factor : uses\n"));
        assert!(text.contains("    geo_shapes_Shape <|.. geo_shapes_Square : implements\n"));
    }

    #[test]
    fn test_renamed_stub() {
        let mut registry = Registry::new();
        registry.rename("app", "time.Time");
        let model = Model::new(registry);

        let text = Mermaid.render(&model, &RenderOptions::default());

        assert_eq!(text, "classDiagram\n    class app_timeTime[\"time.Time\"]\n");
    }

    #[test]
    fn test_member_type_drops_inline_bodies() {
        assert_eq!(member_type("interface{}"), "interface");
        assert_eq!(member_type("struct{x int; Base}"), "struct");
        assert_eq!(member_type("map[string]interface{Len() int}"), "map[string]interface");
        assert_eq!(member_type("func(struct{a struct{}}) time.Time"), "func(struct) time_Time");
    }

    #[test]
    fn test_inline_struct_field_keeps_class_block_balanced() {
        let mut registry = Registry::new();
        let point = registry.get_or_create("geo", "Point");
        point.declare_kind(ClassifierKind::Record).unwrap();
        point.add_field(Field::new(
            "x",
            TypeRef::new("struct{x int}", "struct{x int}"),
            vec![],
        ));
        point.add_field(Field::new(
            "Meta",
            TypeRef::new("interface{Len() int}", "interface{Len() int}"),
            vec![],
        ));
        let mut options = RenderOptions::default();
        options.set_str("private_members", "true").unwrap();

        let text = Mermaid.render(&Model::new(registry), &options);

        assert!(text.contains("        -x struct\n"), "{text}");
        assert!(text.contains("        +Meta interface\n"), "{text}");
        assert_eq!(text.matches('{').count(), text.matches('}').count());
        assert_eq!(text.matches('{').count(), 1);
    }

    #[test]
    fn test_identifier() {
        assert_eq!(identifier("pkg.a.Foo"), "pkg_a_Foo");
        assert_eq!(identifier("shop.[]Item"), "shop___Item");
    }
}
