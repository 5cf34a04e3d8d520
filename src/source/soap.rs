//! Envelope building and response parsing for the metadata SOAP endpoint.

use crate::core::errors::MetadataError;
use crate::core::types::{ComponentRecord, Direction, TypeDescription};
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// Flat child elements of one record, in document order. Repeated children
/// (such as `childXmlNames`) appear once per occurrence.
pub type SoapRecord = Vec<(String, String)>;

pub fn envelope(session_id: &str, body: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" "#,
            r#"xmlns="http://soap.sforce.com/2006/04/metadata">"#,
            "<soapenv:Header><SessionHeader><sessionId>{}</sessionId></SessionHeader></soapenv:Header>",
            "<soapenv:Body>{}</soapenv:Body>",
            "</soapenv:Envelope>"
        ),
        escape(session_id),
        body
    )
}

pub fn describe_metadata_body(api_version: &str) -> String {
    format!(
        "<describeMetadata><asOfVersion>{}</asOfVersion></describeMetadata>",
        escape(api_version)
    )
}

pub fn list_metadata_body(component_type: &str, api_version: &str) -> String {
    format!(
        "<listMetadata><queries><type>{}</type></queries><asOfVersion>{}</asOfVersion></listMetadata>",
        escape(component_type),
        escape(api_version)
    )
}

/// Collect every `record_element` in `xml` with its direct text children.
pub fn parse_records(xml: &str, record_element: &str) -> Result<Vec<SoapRecord>, MetadataError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut records = Vec::new();
    let mut current: Option<SoapRecord> = None;
    let mut field: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if current.is_some() {
                    field = Some(name);
                } else if name == record_element {
                    current = Some(Vec::new());
                }
            }
            Ok(Event::Text(ref t)) => {
                if let (Some(record), Some(name)) = (current.as_mut(), field.as_ref()) {
                    let value = t
                        .unescape()
                        .map_err(|e| MetadataError::decode(record_element, e))?;
                    record.push((name.clone(), value.into_owned()));
                }
            }
            Ok(Event::End(ref e)) => {
                let local = e.local_name();
                let name = String::from_utf8_lossy(local.as_ref());
                if field.as_deref() == Some(name.as_ref()) {
                    field = None;
                } else if name == record_element {
                    if let Some(record) = current.take() {
                        records.push(record);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(MetadataError::decode(record_element, e)),
            _ => {}
        }
    }

    Ok(records)
}

/// `faultstring` of a SOAP fault, if the response is one.
pub fn fault_message(xml: &str) -> Option<String> {
    parse_records(xml, "Fault")
        .ok()?
        .into_iter()
        .next()
        .and_then(|fault| take_field(&fault, "faultstring"))
}

fn take_field(record: &SoapRecord, name: &str) -> Option<String> {
    record
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
}

fn require_field(record: &SoapRecord, name: &str, context: &str) -> Result<String, MetadataError> {
    take_field(record, name)
        .ok_or_else(|| MetadataError::decode(context, format!("missing field {}", name)))
}

pub fn parse_describe_metadata(xml: &str) -> Result<Vec<TypeDescription>, MetadataError> {
    parse_records(xml, "metadataObjects")?
        .iter()
        .map(|record| {
            Ok(TypeDescription {
                name: require_field(record, "xmlName", "metadataObjects")?,
                child_names: record
                    .iter()
                    .filter(|(key, _)| key == "childXmlNames")
                    .map(|(_, value)| value.clone())
                    .collect(),
            })
        })
        .collect()
}

pub fn parse_list_metadata(xml: &str) -> Result<Vec<ComponentRecord>, MetadataError> {
    parse_records(xml, "result")?
        .iter()
        .map(|record| {
            Ok(ComponentRecord {
                id: require_field(record, "id", "listMetadata result")?,
                full_name: require_field(record, "fullName", "listMetadata result")?,
            })
        })
        .collect()
}

/// SOQL against the tooling relation table for one batch of ids.
pub fn dependency_soql(ids: &[String], direction: Direction) -> String {
    let quoted: Vec<String> = ids
        .iter()
        .map(|id| format!("'{}'", id.replace('\\', "\\\\").replace('\'', "\\'")))
        .collect();
    format!(
        "SELECT MetadataComponentId, MetadataComponentType, RefMetadataComponentId, \
         RefMetadataComponentType FROM MetadataComponentDependency WHERE {} IN ({})",
        direction.key_column(),
        quoted.join(",")
    )
}
