//! Structural interface satisfaction.
//!
//! Once every declaration is known, each record is checked against each
//! interface. A record satisfies an interface when it has an exact match for
//! every method the interface requires, including the methods inherited from
//! embedded interfaces.

use indexmap::IndexSet;
use log::{debug, trace};

use classdiag_core::model::{Classifier, ClassifierKind, Method, Registry};

/// Returns `true` if `record_methods` has an exact signature match for every
/// entry of `required`.
///
/// An empty requirement list is never satisfied, so marker interfaces do not
/// pick up an edge from every record.
///
/// # Examples
///
/// ```
/// use classdiag_analyzer::relations::satisfies;
/// use classdiag_core::model::{Method, TypeRef};
///
/// let close = Method::new("Close", vec![], vec![TypeRef::new("error", "error")]);
/// assert!(satisfies(&[close.clone()], &[close.clone()]));
/// assert!(!satisfies(&[close], &[]));
/// ```
pub fn satisfies(record_methods: &[Method], required: &[Method]) -> bool {
    !required.is_empty()
        && required.iter().all(|wanted| {
            record_methods
                .iter()
                .any(|method| method.signature_matches(wanted))
        })
}

/// Collects the methods of `interface` and of every interface it embeds,
/// transitively. Embedded names missing from the registry contribute nothing.
pub fn flatten_methods(registry: &Registry, interface: &Classifier) -> Vec<Method> {
    let mut visited = IndexSet::new();
    visited.insert(interface.qualified_name());
    let mut methods = Vec::new();
    collect_methods(registry, interface, &mut visited, &mut methods);
    methods
}

fn collect_methods(
    registry: &Registry,
    interface: &Classifier,
    visited: &mut IndexSet<String>,
    methods: &mut Vec<Method>,
) {
    methods.extend(interface.methods().iter().cloned());
    for embedded in interface.compositions() {
        if !visited.insert(embedded.clone()) {
            continue;
        }
        match registry.get(embedded) {
            Some(inner) if inner.kind() == Some(ClassifierKind::Interface) => {
                collect_methods(registry, inner, visited, methods);
            }
            _ => trace!(embedded = embedded.as_str(); "Embedded interface not modeled"),
        }
    }
}

/// Adds a structural extension edge from every record to every interface it
/// satisfies. Returns the number of edges added.
pub fn resolve_extensions(registry: &mut Registry) -> usize {
    let matches = find_matches(registry);

    let mut edges = 0;
    for (record_name, satisfied) in matches {
        let Some(record) = registry.get_mut(&record_name) else {
            continue;
        };
        for interface in satisfied {
            debug!(
                record = record_name.as_str(),
                interface = interface.as_str();
                "Record satisfies interface"
            );
            record.add_extension(&interface);
            edges += 1;
        }
    }
    edges
}

/// Pairs every record with the interfaces it satisfies.
fn find_matches(registry: &Registry) -> Vec<(String, Vec<String>)> {
    let interfaces: Vec<(String, Vec<Method>)> = registry
        .classifiers_of(ClassifierKind::Interface)
        .map(|interface| {
            (
                interface.qualified_name(),
                flatten_methods(registry, interface),
            )
        })
        .collect();

    registry
        .classifiers_of(ClassifierKind::Record)
        .map(|record| {
            let record_name = record.qualified_name();
            let satisfied = interfaces
                .iter()
                .filter(|(name, required)| {
                    *name != record_name && satisfies(record.methods(), required)
                })
                .map(|(name, _)| name.clone())
                .collect();
            (record_name, satisfied)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use classdiag_core::model::{Parameter, TypeRef};

    fn ty(name: &str) -> TypeRef {
        TypeRef::new(name, name)
    }

    fn method(name: &str, params: &[&str], results: &[&str]) -> Method {
        Method::new(
            name,
            params.iter().map(|p| Parameter::new("", ty(p))).collect(),
            results.iter().map(|r| ty(r)).collect(),
        )
    }

    fn interface(registry: &mut Registry, namespace: &str, name: &str, methods: Vec<Method>, embeds: &[&str]) {
        let classifier = registry.get_or_create(namespace, name);
        classifier.declare_kind(ClassifierKind::Interface).unwrap();
        for m in methods {
            classifier.add_method(m);
        }
        for embedded in embeds {
            classifier.add_composition(embedded);
        }
    }

    fn record(registry: &mut Registry, namespace: &str, name: &str, methods: Vec<Method>) {
        let classifier = registry.get_or_create(namespace, name);
        classifier.declare_kind(ClassifierKind::Record).unwrap();
        for m in methods {
            classifier.add_method(m);
        }
    }

    #[test]
    fn test_satisfies_exact_signatures() {
        let required = vec![
            method("A", &[], &["int"]),
            method("B", &["string"], &["error"]),
        ];

        assert!(satisfies(&required, &required));
        assert!(!satisfies(
            &[method("A", &[], &["int"]), method("B", &[], &["error"])],
            &required
        ));
    }

    #[test]
    fn test_satisfies_ignores_extra_methods() {
        let required = vec![method("A", &[], &[])];
        let record = vec![method("A", &[], &[]), method("Z", &["int"], &[])];

        assert!(satisfies(&record, &required));
    }

    #[test]
    fn test_empty_interface_is_never_satisfied() {
        assert!(!satisfies(&[method("A", &[], &[])], &[]));
    }

    #[test]
    fn test_flatten_is_transitive_and_cycle_safe() {
        let mut registry = Registry::new();
        interface(&mut registry, "p", "A", vec![method("A", &[], &[])], &["p.B"]);
        interface(&mut registry, "p", "B", vec![method("B", &[], &[])], &["p.C", "q.Missing"]);
        interface(&mut registry, "p", "C", vec![method("C", &[], &[])], &["p.A"]);

        let a = registry.get("p.A").unwrap();
        let names: Vec<String> = flatten_methods(&registry, a)
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_resolve_extensions() {
        let mut registry = Registry::new();
        interface(
            &mut registry,
            "p",
            "Shape",
            vec![method("Area", &[], &["float64"])],
            &[],
        );
        interface(&mut registry, "p", "Marker", vec![], &[]);
        record(
            &mut registry,
            "p",
            "Square",
            vec![method("Area", &[], &["float64"])],
        );
        record(&mut registry, "p", "Point", vec![]);

        let edges = resolve_extensions(&mut registry);

        assert_eq!(edges, 1);
        let square = registry.get("p.Square").unwrap();
        assert_eq!(square.extensions().iter().collect::<Vec<_>>(), vec!["p.Shape"]);
        assert!(registry.get("p.Point").unwrap().extensions().is_empty());
    }

    #[test]
    fn test_record_embedding_does_not_lend_methods() {
        let mut registry = Registry::new();
        interface(&mut registry, "b", "Bar", vec![method("Hi", &[], &["string"])], &[]);
        record(&mut registry, "a", "Foo", vec![]);
        registry.get_or_create("a", "Foo").add_composition("b.Bar");

        resolve_extensions(&mut registry);

        assert!(registry.get("a.Foo").unwrap().extensions().is_empty());
    }
}
