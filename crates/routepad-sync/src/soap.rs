//! SOAP 1.2 codec for the legacy `SearchArea` operation.
//!
//! # Axis convention
//!
//! - Request: corner N is written as `<latN>`/`<lngN>`, corners in the fixed
//!   order ne, nw, sw, se (N = 1..4).
//! - Response: every `<coordinates>` element encodes one point as
//!   `[lng, lat]`, the same order the route store uses for line strings.
//!   The two values may be two child elements or one text value separated
//!   by a comma or whitespace.

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use routepad_core::{LatLng, SearchRegion, SearchResult};

use crate::{BackendError, ClientError};

pub const SOAP12_ENVELOPE_NS: &str = "http://www.w3.org/2003/05/soap-envelope";
pub const CONTENT_TYPE: &str = "application/soap+xml; charset=utf-8";

/// Serialise a region into the `SearchArea` request envelope.
pub fn build_request(region: &SearchRegion, namespace: &str) -> String {
    let mut fields = String::new();
    for (i, corner) in region.corners().iter().enumerate() {
        let n = i + 1;
        fields.push_str(&format!(
            "<lat{n}>{}</lat{n}><lng{n}>{}</lng{n}>",
            corner.lat, corner.lng
        ));
    }
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
            r#"<soap12:Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" "#,
            r#"xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:soap12="{env}">"#,
            r#"<soap12:Body><SearchArea xmlns="{ns}">{fields}</SearchArea></soap12:Body>"#,
            r#"</soap12:Envelope>"#,
        ),
        env = SOAP12_ENVELOPE_NS,
        ns = escape(namespace),
        fields = fields,
    )
}

#[derive(Default)]
struct RecordBuilder {
    id: Option<String>,
    name: Option<String>,
    path: Vec<LatLng>,
}

impl RecordBuilder {
    fn finish(self) -> Result<SearchResult, ClientError> {
        let external_id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ClientError::Parse("route record without id".into()))?;
        if self.path.is_empty() {
            return Err(ClientError::Parse(format!(
                "route record {external_id} has no coordinates"
            )));
        }
        Ok(SearchResult {
            external_id,
            name: self.name.unwrap_or_default(),
            path: self.path,
        })
    }
}

fn xml_err(e: impl std::fmt::Display) -> ClientError {
    ClientError::Parse(format!("invalid XML: {e}"))
}

/// Decode one `<coordinates>` element's raw values as `[lng, lat]`.
fn parse_pair(values: Vec<String>) -> Result<LatLng, ClientError> {
    let parts: Vec<String> = if values.len() == 1 {
        values[0]
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        values
    };
    let [lng, lat] = parts.as_slice() else {
        return Err(ClientError::Parse(format!(
            "coordinates must hold 2 values, got {}",
            parts.len()
        )));
    };
    let number = |s: &str| -> Result<f64, ClientError> {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ClientError::Parse(format!("bad coordinate value {s:?}")))
    };
    Ok(LatLng::new(number(lat.as_str())?, number(lng.as_str())?))
}

/// Parse a `SearchArea` response into result records.
///
/// Zero `routes` elements is a valid empty result. A SOAP fault anywhere in
/// the document is reported as [`BackendError::Fault`].
pub fn parse_response(xml: &str) -> Result<Vec<SearchResult>, ClientError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut results = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    let mut record: Option<RecordBuilder> = None;
    let mut pair: Option<Vec<String>> = None;
    let mut fault: Option<String> = None;

    loop {
        let text = match reader.read_event().map_err(xml_err)? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                match name.as_str() {
                    "routes" => record = Some(RecordBuilder::default()),
                    "coordinates" if record.is_some() => pair = Some(Vec::new()),
                    "Fault" => fault = Some(String::new()),
                    _ => {}
                }
                stack.push(name);
                continue;
            }
            Event::Empty(e) => {
                match e.local_name().as_ref() {
                    b"routes" => return Err(ClientError::Parse("route record without id".into())),
                    b"coordinates" if record.is_some() => {
                        return Err(ClientError::Parse("empty coordinates element".into()));
                    }
                    _ => {}
                }
                continue;
            }
            Event::End(_) => {
                match stack.pop().as_deref() {
                    Some("coordinates") => {
                        if let (Some(values), Some(rec)) = (pair.take(), record.as_mut()) {
                            rec.path.push(parse_pair(values)?);
                        }
                    }
                    Some("routes") => {
                        if let Some(rec) = record.take() {
                            results.push(rec.finish()?);
                        }
                    }
                    _ => {}
                }
                continue;
            }
            Event::Text(t) => t.unescape().map_err(xml_err)?.into_owned(),
            Event::CData(c) => String::from_utf8_lossy(&c.into_inner()).into_owned(),
            Event::Eof => break,
            _ => continue,
        };

        if let Some(values) = pair.as_mut() {
            values.push(text);
            continue;
        }
        let top = stack.last().map(String::as_str);
        let parent = stack.len().checked_sub(2).map(|i| stack[i].as_str());
        if let (Some(rec), Some("routes")) = (record.as_mut(), parent) {
            match top {
                Some("id") => rec.id = Some(text),
                Some("name") => rec.name = Some(text),
                _ => {}
            }
        } else if let (Some(reason), Some("Text" | "faultstring")) = (fault.as_mut(), top) {
            reason.push_str(&text);
        }
    }

    if let Some(reason) = fault {
        return Err(BackendError::Fault(reason).into());
    }
    if !stack.is_empty() {
        return Err(ClientError::Parse("truncated XML document".into()));
    }
    Ok(results)
}

/// Pull the fault reason out of an error response body, if it is a SOAP fault.
pub fn fault_reason(xml: &str) -> Option<String> {
    match parse_response(xml) {
        Err(ClientError::Backend(BackendError::Fault(reason))) => Some(reason),
        _ => None,
    }
}
