use metadeps::{Component, GraphSerializer, OutputFormat};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn sample() -> Vec<Component> {
    vec![
        Component::new("1", "CustomField", "Account.Region__c"),
        Component::new("2", "ApexClass", "AccountService"),
        Component::new("3", "Layout", "Account-Account Layout"),
        Component::new("4", "ApexClass", "Quote, \"Legacy\""),
    ]
}

#[test]
fn csv_round_trips_through_a_reader() {
    let components = sample();
    let rendered = GraphSerializer::new("61.0")
        .render(&components, OutputFormat::Csv)
        .unwrap();
    assert_eq!(rendered.content_type, "text/csv");

    let mut reader = csv::Reader::from_reader(rendered.body.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["fullName", "type"]);

    let parsed: BTreeSet<(String, String)> = reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            (r[0].to_string(), r[1].to_string())
        })
        .collect();
    let expected: BTreeSet<(String, String)> = components
        .iter()
        .map(|c| (c.full_name.clone(), c.component_type.clone()))
        .collect();
    assert_eq!(parsed, expected);
}

#[test]
fn package_manifest_layout() {
    let xml = GraphSerializer::new("61.0")
        .to_package_xml(&sample()[..3])
        .unwrap();

    let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<Package xmlns="http://soap.sforce.com/2006/04/metadata">
  <types>
    <members>AccountService</members>
    <name>ApexClass</name>
  </types>
  <types>
    <members>Account.Region__c</members>
    <name>CustomField</name>
  </types>
  <types>
    <members>Account-Account Layout</members>
    <name>Layout</name>
  </types>
  <version>61.0</version>
</Package>"#;
    assert_eq!(xml, expected);
}

#[test]
fn json_keeps_discovery_order() {
    let components = sample();
    let body = GraphSerializer::new("61.0").to_json(&components).unwrap();
    let parsed: Vec<Component> = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed, components);
}

fn component_strategy() -> impl Strategy<Value = Component> {
    (
        "[a-z0-9]{1,6}",
        prop::sample::select(vec!["ApexClass", "ApexPage", "CustomField", "Layout"]),
        "[A-Za-z_.]{1,12}",
    )
        .prop_map(|(id, ty, name)| Component::new(id, ty, name))
}

proptest! {
    #[test]
    fn package_is_independent_of_input_order(
        (components, shuffled) in prop::collection::vec(component_strategy(), 0..20)
            .prop_flat_map(|v| {
                let ordered = v.clone();
                (Just(ordered), Just(v).prop_shuffle())
            })
    ) {
        let serializer = GraphSerializer::new("61.0");
        let a = serializer.render(&components, OutputFormat::Package).unwrap();
        let b = serializer.render(&shuffled, OutputFormat::Package).unwrap();
        prop_assert_eq!(a.body, b.body);
    }
}
