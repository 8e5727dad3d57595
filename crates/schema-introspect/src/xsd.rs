//! XML Schema Definition introspection.
//!
//! The record shape is taken from a `complexType`:
//!
//! 1. the inline `complexType` of the first top-level `element`, or
//! 2. the named top-level `complexType` that element references via `type`, or
//! 3. the first top-level `complexType` when the schema declares no element.
//!
//! Every `element` under its `sequence` / `all` / `choice` compositors becomes
//! one [`SchemaElement`]. Elements are required unless `minOccurs="0"` or they
//! sit inside a `choice`. DTDs are rejected by the XML parser.

use crate::{decode_utf8, Introspector};
use roxmltree::{Document, Node};
use std::collections::{HashMap, HashSet};
use synth_core::{
    ElementType, FieldConstraints, SchemaDialect, SchemaElement, SchemaError, SchemaErrorKind,
    Value,
};

/// The W3C XML Schema namespace.
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Introspector for XML Schema Definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct XsdIntrospector;

impl Introspector for XsdIntrospector {
    fn dialect(&self) -> SchemaDialect {
        SchemaDialect::Xml
    }

    fn introspect(&self, document: &[u8]) -> Result<Vec<SchemaElement>, SchemaError> {
        let text = decode_utf8(document, SchemaDialect::Xml)?;
        let doc = Document::parse(text).map_err(|e| {
            let pos = e.pos();
            error(
                SchemaErrorKind::Syntax,
                format!("line {}, column {}", pos.row, pos.col),
                e.to_string(),
            )
        })?;

        let root = doc.root_element();
        if !is_xsd(&root, "schema") {
            return Err(error(
                SchemaErrorKind::UnsupportedRoot,
                format!("/{}", root.tag_name().name()),
                "root element must be <xs:schema>",
            ));
        }

        let context = SchemaContext::new(root);
        let (record_type, path) = context.record_type()?;
        context.collect_record(record_type, &path)
    }
}

fn error(
    kind: SchemaErrorKind,
    location: impl Into<String>,
    message: impl Into<String>,
) -> SchemaError {
    SchemaError::new(SchemaDialect::Xml, kind, location, message)
}

/// Whether `node` is the XSD element `<xs:{name}>`.
///
/// Unqualified names are accepted so that schemas without a namespace
/// declaration still introspect.
fn is_xsd(node: &Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node
            .tag_name()
            .namespace()
            .map_or(true, |ns| ns == XSD_NAMESPACE)
}

fn xsd_children<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| is_xsd(child, name))
}

fn first_xsd_child<'a, 'input>(node: Node<'a, 'input>, name: &'static str) -> Option<Node<'a, 'input>> {
    xsd_children(node, name).next()
}

/// Split a QName into `(prefix, local)`.
fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, qname),
    }
}

/// Map an XSD builtin type local name onto the element vocabulary.
pub fn map_builtin_type(local: &str) -> ElementType {
    match local {
        "integer" | "int" | "long" | "short" | "byte" | "nonNegativeInteger"
        | "positiveInteger" | "negativeInteger" | "nonPositiveInteger" | "unsignedLong"
        | "unsignedInt" | "unsignedShort" | "unsignedByte" => ElementType::Integer,
        "decimal" | "float" | "double" => ElementType::Float,
        "boolean" => ElementType::Boolean,
        "date" => ElementType::Date,
        "dateTime" => ElementType::Datetime,
        _ => ElementType::String,
    }
}

/// Type information resolved for one element.
struct ResolvedType {
    element_type: ElementType,
    constraints: FieldConstraints,
}

impl ResolvedType {
    fn plain(element_type: ElementType) -> Self {
        Self {
            element_type,
            constraints: FieldConstraints::default(),
        }
    }
}

/// Top-level declarations of one schema, indexed by name.
struct SchemaContext<'a, 'input> {
    root: Node<'a, 'input>,
    elements: HashMap<&'a str, Node<'a, 'input>>,
    complex_types: HashMap<&'a str, Node<'a, 'input>>,
    simple_types: HashMap<&'a str, Node<'a, 'input>>,
}

impl<'a, 'input> SchemaContext<'a, 'input> {
    fn new(root: Node<'a, 'input>) -> Self {
        let named = |kind: &'static str| -> HashMap<&'a str, Node<'a, 'input>> {
            xsd_children(root, kind)
                .filter_map(|node| node.attribute("name").map(|name| (name, node)))
                .collect()
        };
        Self {
            root,
            elements: named("element"),
            complex_types: named("complexType"),
            simple_types: named("simpleType"),
        }
    }

    /// Locate the complexType describing the record, with a path for errors.
    fn record_type(&self) -> Result<(Node<'a, 'input>, String), SchemaError> {
        if let Some(element) = first_xsd_child(self.root, "element") {
            let name = element.attribute("name").unwrap_or("?");
            let path = format!("/schema/element[@name='{name}']");

            if let Some(inline) = first_xsd_child(element, "complexType") {
                return Ok((inline, format!("{path}/complexType")));
            }
            if let Some(type_ref) = element.attribute("type") {
                let (_, local) = split_qname(type_ref);
                if let Some(named) = self.complex_types.get(local) {
                    return Ok((*named, format!("/schema/complexType[@name='{local}']")));
                }
            }
            return Err(error(
                SchemaErrorKind::MissingStructure,
                path,
                format!("top-level element '{name}' has no complexType"),
            ));
        }

        if let Some(complex) = first_xsd_child(self.root, "complexType") {
            let name = complex.attribute("name").unwrap_or("?");
            return Ok((complex, format!("/schema/complexType[@name='{name}']")));
        }

        Err(error(
            SchemaErrorKind::MissingStructure,
            "/schema",
            "schema declares no element or complexType",
        ))
    }

    fn collect_record(
        &self,
        complex: Node<'a, 'input>,
        path: &str,
    ) -> Result<Vec<SchemaElement>, SchemaError> {
        let compositor = complex
            .children()
            .find(|child| ["sequence", "all", "choice"].iter().any(|c| is_xsd(child, c)))
            .ok_or_else(|| {
                error(
                    SchemaErrorKind::MissingStructure,
                    path,
                    "complexType has no sequence, all or choice",
                )
            })?;

        let mut elements = Vec::new();
        let compositor_path = format!("{path}/{}", compositor.tag_name().name());
        self.collect_compositor(compositor, &compositor_path, false, &mut elements)?;

        let mut seen = HashSet::new();
        for element in &elements {
            if !seen.insert(element.name.as_str()) {
                return Err(error(
                    SchemaErrorKind::DuplicateElement,
                    &compositor_path,
                    format!("element '{}' is declared more than once", element.name),
                ));
            }
        }
        Ok(elements)
    }

    fn collect_compositor(
        &self,
        compositor: Node<'a, 'input>,
        path: &str,
        optional: bool,
        out: &mut Vec<SchemaElement>,
    ) -> Result<(), SchemaError> {
        let optional = optional || is_xsd(&compositor, "choice");
        for (position, child) in compositor.children().filter(|c| c.is_element()).enumerate() {
            let child_path = format!("{path}/{}[{}]", child.tag_name().name(), position + 1);
            if is_xsd(&child, "element") {
                out.push(self.parse_element(child, &child_path, optional)?);
            } else if ["sequence", "all", "choice"].iter().any(|c| is_xsd(&child, c)) {
                self.collect_compositor(child, &child_path, optional, out)?;
            }
        }
        Ok(())
    }

    fn parse_element(
        &self,
        node: Node<'a, 'input>,
        path: &str,
        optional: bool,
    ) -> Result<SchemaElement, SchemaError> {
        // `ref` points at a top-level declaration that carries the type.
        let (name, declaration) = match (node.attribute("name"), node.attribute("ref")) {
            (Some(name), _) => (name, node),
            (None, Some(reference)) => {
                let (_, local) = split_qname(reference);
                let target = self.elements.get(local).copied().ok_or_else(|| {
                    error(
                        SchemaErrorKind::InvalidDefinition,
                        path,
                        format!("element ref '{reference}' does not match a top-level element"),
                    )
                })?;
                (local, target)
            }
            (None, None) => {
                return Err(error(
                    SchemaErrorKind::InvalidDefinition,
                    path,
                    "element must have a 'name' or 'ref' attribute",
                ))
            }
        };

        let min_occurs_zero = node
            .attribute("minOccurs")
            .and_then(|v| v.trim().parse::<u64>().ok())
            == Some(0);
        let resolved = self.resolve_type(declaration, path)?;

        let mut element = SchemaElement::new(name, resolved.element_type, !(optional || min_occurs_zero));
        element.nullable = declaration.attribute("nillable") == Some("true");
        element.description = documentation(declaration);
        element.constraints = resolved.constraints;
        Ok(element)
    }

    fn resolve_type(&self, node: Node<'a, 'input>, path: &str) -> Result<ResolvedType, SchemaError> {
        if first_xsd_child(node, "complexType").is_some() {
            return Ok(ResolvedType::plain(ElementType::Object));
        }
        if let Some(simple) = first_xsd_child(node, "simpleType") {
            return self.resolve_simple_type(simple, &format!("{path}/simpleType"), &mut Vec::new());
        }
        match node.attribute("type") {
            Some(type_ref) => self.resolve_type_ref(node, type_ref, &mut Vec::new()),
            None => Ok(ResolvedType::plain(ElementType::String)),
        }
    }

    /// `visiting` holds the named simple types on the current resolution chain.
    fn resolve_type_ref(
        &self,
        node: Node<'a, 'input>,
        type_ref: &str,
        visiting: &mut Vec<String>,
    ) -> Result<ResolvedType, SchemaError> {
        let (prefix, local) = split_qname(type_ref);
        if node.lookup_namespace_uri(prefix) == Some(XSD_NAMESPACE) {
            return Ok(ResolvedType::plain(map_builtin_type(local)));
        }
        if self.complex_types.contains_key(local) {
            return Ok(ResolvedType::plain(ElementType::Object));
        }
        if let Some(simple) = self.simple_types.get(local) {
            let path = format!("/schema/simpleType[@name='{local}']");
            if visiting.iter().any(|name| name == local) {
                return Err(error(
                    SchemaErrorKind::InvalidDefinition,
                    path,
                    format!("simpleType '{local}' is derived from itself"),
                ));
            }
            visiting.push(local.to_string());
            let resolved = self.resolve_simple_type(*simple, &path, visiting)?;
            visiting.pop();
            return Ok(resolved);
        }
        // Undeclared prefix or unknown name: fall back to the builtin mapping.
        Ok(ResolvedType::plain(map_builtin_type(local)))
    }

    fn resolve_simple_type(
        &self,
        simple: Node<'a, 'input>,
        path: &str,
        visiting: &mut Vec<String>,
    ) -> Result<ResolvedType, SchemaError> {
        let Some(restriction) = first_xsd_child(simple, "restriction") else {
            // list / union content degrades to string
            return Ok(ResolvedType::plain(ElementType::String));
        };
        let restriction_path = format!("{path}/restriction");

        let mut resolved = match restriction.attribute("base") {
            Some(base) => self.resolve_type_ref(restriction, base, visiting)?,
            None => ResolvedType::plain(ElementType::String),
        };
        apply_facets(restriction, &restriction_path, &mut resolved)?;
        Ok(resolved)
    }
}

fn apply_facets(
    restriction: Node,
    path: &str,
    resolved: &mut ResolvedType,
) -> Result<(), SchemaError> {
    for facet in restriction.children().filter(|c| c.is_element()) {
        let facet_name = facet.tag_name().name();
        let value = facet.attribute("value").unwrap_or_default();
        let facet_path = format!("{path}/{facet_name}");
        let invalid = |expected: &str| {
            error(
                SchemaErrorKind::InvalidDefinition,
                facet_path.clone(),
                format!("facet '{facet_name}' value '{value}' is not {expected}"),
            )
        };
        let constraints = &mut resolved.constraints;
        match facet_name {
            "length" => {
                let n = value.trim().parse().map_err(|_| invalid("a length"))?;
                constraints.min_length = Some(n);
                constraints.max_length = Some(n);
            }
            "minLength" => {
                constraints.min_length = Some(value.trim().parse().map_err(|_| invalid("a length"))?)
            }
            "maxLength" => {
                constraints.max_length = Some(value.trim().parse().map_err(|_| invalid("a length"))?)
            }
            "minInclusive" => {
                constraints.min_value = Some(value.trim().parse().map_err(|_| invalid("a number"))?)
            }
            "maxInclusive" => {
                constraints.max_value = Some(value.trim().parse().map_err(|_| invalid("a number"))?)
            }
            "pattern" => constraints.pattern = Some(value.to_string()),
            "enumeration" => constraints
                .allowed_values
                .push(enumeration_value(value, resolved.element_type)),
            _ => {}
        }
    }
    Ok(())
}

/// Convert an enumeration facet value according to the restriction base type.
fn enumeration_value(raw: &str, element_type: ElementType) -> Value {
    match element_type {
        ElementType::Integer => raw
            .trim()
            .parse()
            .map(Value::Integer)
            .unwrap_or_else(|_| Value::from(raw)),
        ElementType::Float => raw
            .trim()
            .parse()
            .map(Value::Float)
            .unwrap_or_else(|_| Value::from(raw)),
        ElementType::Boolean => match raw.trim() {
            "true" | "1" => Value::Bool(true),
            "false" | "0" => Value::Bool(false),
            _ => Value::from(raw),
        },
        _ => Value::from(raw),
    }
}

/// Text of `xs:annotation/xs:documentation`, if any.
fn documentation(node: Node) -> Option<String> {
    let annotation = first_xsd_child(node, "annotation")?;
    let doc = first_xsd_child(annotation, "documentation")?;
    let text: String = doc
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(doc: &str) -> Result<Vec<SchemaElement>, SchemaError> {
        XsdIntrospector.introspect(doc.as_bytes())
    }

    #[test]
    fn test_inline_complex_type() {
        let elements = run(r#"<?xml version="1.0"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:element name="user">
    <xs:complexType>
      <xs:sequence>
        <xs:element name="id" type="xs:integer"/>
        <xs:element name="name" type="xs:string"/>
        <xs:element name="email" type="xs:string" minOccurs="0"/>
        <xs:element name="active" type="xs:boolean"/>
        <xs:element name="born" type="xs:date"/>
        <xs:element name="seen" type="xs:dateTime"/>
        <xs:element name="rating" type="xs:double"/>
        <xs:element name="shape" type="xs:anyURI"/>
      </xs:sequence>
    </xs:complexType>
  </xs:element>
</xs:schema>"#)
        .unwrap();

        let summary: Vec<_> = elements
            .iter()
            .map(|e| (e.name.as_str(), e.element_type, e.required))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("id", ElementType::Integer, true),
                ("name", ElementType::String, true),
                ("email", ElementType::String, false),
                ("active", ElementType::Boolean, true),
                ("born", ElementType::Date, true),
                ("seen", ElementType::Datetime, true),
                ("rating", ElementType::Float, true),
                ("shape", ElementType::String, true),
            ]
        );
    }

    #[test]
    fn test_named_complex_type_and_nested_object() {
        let elements = run(r#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <xsd:element name="order" type="OrderType"/>
  <xsd:complexType name="AddressType">
    <xsd:sequence><xsd:element name="street" type="xsd:string"/></xsd:sequence>
  </xsd:complexType>
  <xsd:complexType name="OrderType">
    <xsd:all>
      <xsd:element name="total" type="xsd:decimal"/>
      <xsd:element name="shipping" type="AddressType"/>
      <xsd:element name="notes">
        <xsd:complexType><xsd:sequence/></xsd:complexType>
      </xsd:element>
    </xsd:all>
  </xsd:complexType>
</xsd:schema>"#)
        .unwrap();

        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0].element_type, ElementType::Float);
        assert_eq!(elements[1].element_type, ElementType::Object);
        assert_eq!(elements[2].element_type, ElementType::Object);
    }

    #[test]
    fn test_choice_elements_are_optional() {
        let elements = run(r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:complexType name="Contact">
    <xs:sequence>
      <xs:element name="name" type="xs:string"/>
      <xs:choice>
        <xs:element name="phone" type="xs:string"/>
        <xs:element name="email" type="xs:string"/>
      </xs:choice>
    </xs:sequence>
  </xs:complexType>
</xs:schema>"#)
        .unwrap();

        let required: Vec<_> = elements.iter().map(|e| e.required).collect();
        assert_eq!(required, vec![true, false, false]);
    }

    #[test]
    fn test_restrictions_annotation_and_nillable() {
        let elements = run(r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:simpleType name="Tier">
    <xs:restriction base="xs:string">
      <xs:enumeration value="gold"/>
      <xs:enumeration value="silver"/>
    </xs:restriction>
  </xs:simpleType>
  <xs:element name="member">
    <xs:complexType>
      <xs:sequence>
        <xs:element name="age" nillable="true">
          <xs:annotation><xs:documentation>Age in
            years</xs:documentation></xs:annotation>
          <xs:simpleType>
            <xs:restriction base="xs:int">
              <xs:minInclusive value="18"/>
              <xs:maxInclusive value="99"/>
            </xs:restriction>
          </xs:simpleType>
        </xs:element>
        <xs:element name="tier" type="Tier"/>
        <xs:element name="zip">
          <xs:simpleType>
            <xs:restriction base="xs:string">
              <xs:length value="5"/>
              <xs:pattern value="\d{5}"/>
            </xs:restriction>
          </xs:simpleType>
        </xs:element>
      </xs:sequence>
    </xs:complexType>
  </xs:element>
</xs:schema>"#)
        .unwrap();

        let age = &elements[0];
        assert_eq!(age.element_type, ElementType::Integer);
        assert!(age.nullable);
        assert_eq!(age.description.as_deref(), Some("Age in years"));
        assert_eq!(age.constraints.min_value, Some(18.0));
        assert_eq!(age.constraints.max_value, Some(99.0));

        let tier = &elements[1];
        assert_eq!(
            tier.constraints.allowed_values,
            vec![Value::from("gold"), Value::from("silver")]
        );

        let zip = &elements[2];
        assert_eq!(zip.constraints.min_length, Some(5));
        assert_eq!(zip.constraints.max_length, Some(5));
        assert_eq!(zip.constraints.pattern.as_deref(), Some("\\d{5}"));
    }

    #[test]
    fn test_element_ref() {
        let elements = run(r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:element name="book">
    <xs:complexType>
      <xs:sequence><xs:element ref="isbn" minOccurs="0"/></xs:sequence>
    </xs:complexType>
  </xs:element>
  <xs:element name="isbn" type="xs:long"/>
</xs:schema>"#)
        .unwrap();

        assert_eq!(elements[0].name, "isbn");
        assert_eq!(elements[0].element_type, ElementType::Integer);
        assert!(!elements[0].required);
    }

    #[test]
    fn test_malformed_xml() {
        let err = run("<xs:schema><xs:element></xs:schema>").unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::Syntax);
        assert_eq!(err.dialect, SchemaDialect::Xml);
        assert!(err.location.starts_with("line 1"));
    }

    #[test]
    fn test_root_must_be_schema() {
        let err = run("<person><name>Alice</name></person>").unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::UnsupportedRoot);
        assert_eq!(err.location, "/person");
    }

    #[test]
    fn test_missing_structure() {
        let err = run(r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:element name="root" type="xs:string"/>
</xs:schema>"#)
        .unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::MissingStructure);
        assert_eq!(err.location, "/schema/element[@name='root']");

        let err = run(r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"/>"#).unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::MissingStructure);
    }

    #[test]
    fn test_duplicate_and_unnamed_elements() {
        let err = run(r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:complexType name="T">
    <xs:sequence>
      <xs:element name="a" type="xs:string"/>
      <xs:element name="a" type="xs:int"/>
    </xs:sequence>
  </xs:complexType>
</xs:schema>"#)
        .unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::DuplicateElement);

        let err = run(r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:complexType name="T">
    <xs:sequence><xs:element type="xs:int"/></xs:sequence>
  </xs:complexType>
</xs:schema>"#)
        .unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::InvalidDefinition);
        assert_eq!(err.location, "/schema/complexType[@name='T']/sequence/element[1]");
    }

    #[test]
    fn test_invalid_facet_value() {
        let err = run(r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:complexType name="T">
    <xs:sequence>
      <xs:element name="n">
        <xs:simpleType>
          <xs:restriction base="xs:int"><xs:minInclusive value="low"/></xs:restriction>
        </xs:simpleType>
      </xs:element>
    </xs:sequence>
  </xs:complexType>
</xs:schema>"#)
        .unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::InvalidDefinition);
        assert!(err.location.ends_with("/restriction/minInclusive"));
    }

    #[test]
    fn test_cyclic_simple_type_is_schema_error() {
        let self_cycle = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:simpleType name="a"><xs:restriction base="a"/></xs:simpleType>
  <xs:complexType name="T">
    <xs:sequence><xs:element name="x" type="a"/></xs:sequence>
  </xs:complexType>
</xs:schema>"#;
        let err = run(self_cycle).unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::InvalidDefinition);
        assert_eq!(err.location, "/schema/simpleType[@name='a']");

        let two_cycle = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:simpleType name="a"><xs:restriction base="b"/></xs:simpleType>
  <xs:simpleType name="b"><xs:restriction base="a"/></xs:simpleType>
  <xs:complexType name="T">
    <xs:sequence>
      <xs:element name="x">
        <xs:simpleType><xs:restriction base="a"/></xs:simpleType>
      </xs:element>
    </xs:sequence>
  </xs:complexType>
</xs:schema>"#;
        let err = run(two_cycle).unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::InvalidDefinition);
        assert_eq!(err.location, "/schema/simpleType[@name='a']");
    }

    #[test]
    fn test_shared_simple_type_is_not_a_cycle() {
        let elements = run(r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:simpleType name="code"><xs:restriction base="xs:string"><xs:length value="3"/></xs:restriction></xs:simpleType>
  <xs:simpleType name="country"><xs:restriction base="code"/></xs:simpleType>
  <xs:complexType name="T">
    <xs:sequence>
      <xs:element name="from" type="country"/>
      <xs:element name="to" type="country"/>
    </xs:sequence>
  </xs:complexType>
</xs:schema>"#)
        .unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[1].constraints.max_length, Some(3));
    }
}
