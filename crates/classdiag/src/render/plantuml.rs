//! PlantUML class diagram backend.

use classdiag_core::model::{Classifier, ClassifierKind, Field, Method};

use crate::{
    config::RenderOptions,
    render::{Edge, EdgeKind, LineWriter, Renderer, method_signature, visibility},
};

const KEYWORDS: [&str; 5] = ["map", "chan", "struct", "interface", "func"];

const STUB_COMMENT: &str =
    "' Stands in for a name containing dots, which would otherwise break the namespace.";

/// Renders `@startuml` documents with one `namespace` block per namespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlantUml;

impl Renderer for PlantUml {
    fn begin(&self, out: &mut LineWriter, options: &RenderOptions) {
        out.line(0, "@startuml");
        if !options.title().is_empty() {
            out.line(0, format!("title {}", options.title()));
        }
        let notes = options.notes().trim();
        if !notes.is_empty() {
            out.line(0, "legend");
            out.line(0, notes);
            out.line(0, "end legend");
        }
    }

    fn end(&self, out: &mut LineWriter, options: &RenderOptions) {
        if !options.fields() {
            out.line(0, "hide fields");
        }
        if !options.methods() {
            out.line(0, "hide methods");
        }
        out.line(0, "@enduml");
    }

    fn open_namespace(&self, out: &mut LineWriter, namespace: &str) {
        out.line(0, format!("namespace {namespace} {{"));
    }

    fn close_namespace(&self, out: &mut LineWriter, _namespace: &str) {
        out.line(0, "}");
    }

    fn open_classifier(&self, out: &mut LineWriter, classifier: &Classifier) {
        let head = match classifier.kind() {
            Some(ClassifierKind::Interface) => format!("interface {} {{", classifier.name()),
            Some(ClassifierKind::Alias) => {
                format!("class {} << (T, #FF7700) >> {{", classifier.name())
            }
            Some(ClassifierKind::Record) | None => {
                format!("class {} << (S,Aquamarine) >> {{", classifier.name())
            }
        };
        out.line(1, head);
    }

    fn close_classifier(&self, out: &mut LineWriter, _classifier: &Classifier) {
        out.line(1, "}");
    }

    fn field(&self, out: &mut LineWriter, field: &Field) {
        out.line(
            2,
            format!(
                "{} {} {}",
                visibility(field.is_exported()),
                field.name(),
                highlight_keywords(field.ty().display())
            ),
        );
    }

    fn method(&self, out: &mut LineWriter, method: &Method) {
        out.line(
            2,
            format!(
                "{} {}",
                visibility(method.is_exported()),
                method_signature(method, highlight_keywords)
            ),
        );
    }

    fn renamed_stub(&self, out: &mut LineWriter, _namespace: &str, synthetic: &str, original: &str) {
        out.line(1, format!("class \"{original}\" as {synthetic} {{"));
        out.line(2, STUB_COMMENT);
        out.line(1, "}");
    }

    fn edge(&self, out: &mut LineWriter, edge: &Edge, labeled: bool) {
        let (owner, target) = (edge.owner(), edge.target());
        let mut line = match edge.kind() {
            EdgeKind::Composition => format!("\"{target}\" *-- \"{owner}\""),
            EdgeKind::Extension => format!("\"{target}\" <|-- \"{owner}\""),
            EdgeKind::Implementation => format!("\"{target}\" <|.. \"{owner}\""),
            EdgeKind::Aggregation => format!("\"{owner}\" o-- \"{target}\""),
            EdgeKind::Alias => format!("\"{target}\" #.. \"{owner}\""),
        };
        if labeled {
            line.push_str(" : ");
            line.push_str(edge.kind().label());
        }
        out.line(0, line);
    }
}

/// Wraps the composite type keywords of a member type in a blue font tag.
fn highlight_keywords(ty: &str) -> String {
    let mut out = String::with_capacity(ty.len());
    let mut rest = ty;
    let mut prev: Option<char> = None;

    while let Some(ch) = rest.chars().next() {
        let word_start = ch.is_ascii_alphabetic()
            && !prev.is_some_and(|p| p.is_alphanumeric() || p == '_' || p == '.');
        if !word_start {
            out.push(ch);
            prev = Some(ch);
            rest = &rest[ch.len_utf8()..];
            continue;
        }

        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        let (word, tail) = rest.split_at(end);
        if KEYWORDS.contains(&word) && tail.starts_with(['[', '{', '(', ' ', '<']) {
            out.push_str("<font color=blue>");
            out.push_str(word);
            out.push_str("</font>");
        } else {
            out.push_str(word);
        }
        prev = word.chars().last();
        rest = tail;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Model;
    use classdiag_core::model::{Alias, Parameter, Registry, TargetNamespace, TypeRef};

    fn shop_model() -> Model {
        let mut registry = Registry::new();

        let cart = registry.get_or_create("shop", "Cart");
        cart.declare_kind(ClassifierKind::Record).unwrap();
        cart.add_field(Field::new(
            "Items",
            TypeRef::new("[]Item", "[]shop.Item"),
            vec!["shop.Item".to_string()],
        ));
        cart.add_field(Field::new(
            "index",
            TypeRef::new("map[string]int", "map[string]int"),
            vec![],
        ));
        cart.add_method(Method::new(
            "Total",
            vec![],
            vec![TypeRef::new("float64", "float64")],
        ));
        cart.add_method(Method::new(
            "Add",
            vec![Parameter::new("item", TypeRef::new("Item", "shop.Item"))],
            vec![],
        ));
        cart.add_composition("shop.Base");
        cart.add_aggregation("shop.Item");
        cart.add_extension("shop.Totaler");

        let totaler = registry.get_or_create("shop", "Totaler");
        totaler.declare_kind(ClassifierKind::Interface).unwrap();
        totaler.add_method(Method::new(
            "Total",
            vec![],
            vec![TypeRef::new("float64", "float64")],
        ));
        totaler.add_composition("io.Closer");

        registry
            .get_or_create("shop", "Stamp")
            .declare_kind(ClassifierKind::Alias)
            .unwrap();
        let synthetic = registry.rename("shop", "time.Time");
        registry.add_alias(
            Alias::new("shop", "Stamp", "time.Time", TargetNamespace::Modeled)
                .with_synthetic_target(synthetic),
        );

        Model::new(registry)
    }

    #[test]
    fn test_render_default_options() {
        let text = PlantUml.render(&shop_model(), &RenderOptions::default());

        let expected = r#"@startuml
namespace shop {
    class Cart << (S,Aquamarine) >> {
        + Items []Item
        + Add(item Item)
        + Total() float64
    }
    class Stamp << (T, #FF7700) >> {
    }
    interface Totaler {
        + Total() float64
    }
    class "time.Time" as timeTime {
        ' Stands in for a name containing dots, which would otherwise break the namespace.
    }
}
"shop.Base" *-- "shop.Cart"
"io.Closer" <|-- "shop.Totaler"
"shop.Totaler" <|.. "shop.Cart"
"shop.timeTime" #.. "shop.Stamp"
@enduml
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_all_options() {
        let mut options = RenderOptions::default();
        options.set_str("private_members", "true").unwrap();
        options.set_str("aggregations", "true").unwrap();
        options.set_str("connection_labels", "true").unwrap();
        options.set_str("title", "Shop").unwrap();
        options.set_str("notes", "  generated\n").unwrap();

        let text = PlantUml.render(&shop_model(), &options);

        assert!(text.starts_with("@startuml\ntitle Shop\nlegend\ngenerated\nend legend\n"));
        assert!(text.contains("        - index <font color=blue>map</font>[string]int\n"));
        assert!(text.contains("\"shop.Base\" *-- \"shop.Cart\" : embeds\n"));
        assert!(text.contains("\"shop.Cart\" o-- \"shop.Item\" : uses\n"));
        assert!(text.contains("\"shop.Totaler\" <|.. \"shop.Cart\" : implements\n"));
        assert!(text.contains("\"shop.timeTime\" #.. \"shop.Stamp\" : alias of\n"));
    }

    #[test]
    fn test_hidden_members() {
        let mut options = RenderOptions::default();
        options.set_str("fields", "false").unwrap();
        options.set_str("methods", "false").unwrap();
        options.set_str("compositions", "false").unwrap();
        options.set_str("implementations", "false").unwrap();
        options.set_str("aliases", "false").unwrap();

        let text = PlantUml.render(&shop_model(), &options);

        assert!(!text.contains("Items"));
        assert!(!text.contains("Total()"));
        assert!(!text.contains("*--"));
        assert!(!text.contains("<|"));
        assert!(!text.contains("#.."));
        assert!(text.ends_with("hide fields\nhide methods\n@enduml\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let model = shop_model();
        let options = RenderOptions::default();

        assert_eq!(
            PlantUml.render(&model, &options),
            PlantUml.render(&model, &options)
        );
    }

    #[test]
    fn test_highlight_keywords() {
        assert_eq!(
            highlight_keywords("map[string]chan<- func()"),
            "<font color=blue>map</font>[string]<font color=blue>chan</font><- <font color=blue>func</font>()"
        );
        assert_eq!(
            highlight_keywords("<-chan mapper.Map"),
            "<-<font color=blue>chan</font> mapper.Map"
        );
        assert_eq!(highlight_keywords("*Item"), "*Item");
        assert_eq!(
            highlight_keywords("struct{}"),
            "<font color=blue>struct</font>{}"
        );
    }
}
