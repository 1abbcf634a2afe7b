use log::trace;
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer as XmlWriter,
};

use super::{Compose, Format};
use crate::{ast::Biblio, Error, ErrorKind};

const ROOT: &str = "xml";
const RECORDS: &str = "records";
const RECORD: &str = "record";

/// A type wrapper around [`String`] to represent an `EndNote` XML document.
///
/// The document is a root `xml` element holding a single `records` element with one `record`
/// element per reference. Each field becomes a child element named after the field.
#[derive(Debug, PartialEq, Eq)]
pub struct EndNote(String);

impl Format for EndNote {
    fn new(val: String) -> Self {
        Self(val)
    }

    fn raw(self) -> String {
        self.0
    }

    fn name() -> &'static str {
        "EndNote XML"
    }

    fn ext() -> &'static str {
        "xml"
    }
}

impl Compose for EndNote {
    fn compose(biblio: &Biblio) -> Result<Self, Error> {
        let mut writer = XmlWriter::new(Vec::new());

        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
        open(&mut writer, ROOT)?;
        open(&mut writer, RECORDS)?;

        for (index, record) in biblio.records().enumerate() {
            open(&mut writer, RECORD)?;
            for (name, value) in record.fields() {
                if !is_element_name(name) {
                    return Err(Error::new(
                        ErrorKind::MalformedField,
                        format!("'{name}' in record {index} is not a valid XML element name"),
                    ));
                }
                if let Some(c) = value.chars().find(|&c| !is_xml_char(c)) {
                    return Err(Error::new(
                        ErrorKind::MalformedField,
                        format!("'{name}' in record {index} holds {c:?} which XML cannot represent"),
                    ));
                }
                open(&mut writer, name)?;
                emit(&mut writer, Event::Text(BytesText::new(value)))?;
                close(&mut writer, name)?;
            }
            close(&mut writer, RECORD)?;
        }

        close(&mut writer, RECORDS)?;
        close(&mut writer, ROOT)?;

        trace!("Composed {} records as {}", biblio.len(), Self::name());
        String::from_utf8(writer.into_inner())
            .map(Self)
            .map_err(|e| Error::with_source(ErrorKind::IO, "Composed XML is not UTF-8", e))
    }
}

fn emit(writer: &mut XmlWriter<Vec<u8>>, event: Event<'_>) -> Result<(), Error> {
    writer
        .write_event(event)
        .map_err(|e| Error::wrap(ErrorKind::IO, e))
}

fn open(writer: &mut XmlWriter<Vec<u8>>, name: &str) -> Result<(), Error> {
    emit(writer, Event::Start(BytesStart::new(name)))
}

fn close(writer: &mut XmlWriter<Vec<u8>>, name: &str) -> Result<(), Error> {
    emit(writer, Event::End(BytesEnd::new(name)))
}

/// Field names are written as element names without any escaping so they must already be valid
/// XML 1.0 names.
///
/// Colons are rejected to keep names free of namespace prefixes.
fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_name_start_char) && chars.all(is_name_char)
}

// XML 1.0 `NameStartChar` without ':'.
const fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

// XML 1.0 `NameChar` without ':'.
const fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

// XML 1.0 `Char`. Surrogates cannot occur in a `char`.
const fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

#[cfg(test)]
mod tests {
    use quick_xml::Reader;

    use super::*;
    use crate::ast::Record;

    const DECL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

    fn biblio(records: &[&[(&str, &str)]]) -> Biblio {
        records
            .iter()
            .map(|fields| fields.iter().copied().collect::<Record>())
            .collect()
    }

    fn compose(biblio: &Biblio) -> String {
        EndNote::compose(biblio).unwrap().raw()
    }

    // Reads the composed document back into records of (element name, text) pairs and checks the
    // `xml` > `records` > `record` nesting on the way.
    fn read_back(xml: &str) -> Vec<Vec<(String, String)>> {
        let mut reader = Reader::from_str(xml);
        let mut stack = Vec::<String>::new();
        let mut records = Vec::<Vec<(String, String)>>::new();
        let mut records_elements = 0;

        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) => {
                    let name = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                    match stack.len() {
                        0 => assert_eq!(ROOT, name),
                        1 => {
                            assert_eq!(RECORDS, name);
                            records_elements += 1;
                        }
                        2 => {
                            assert_eq!(RECORD, name);
                            records.push(Vec::new());
                        }
                        3 => records
                            .last_mut()
                            .unwrap()
                            .push((name.clone(), String::new())),
                        _ => panic!("unexpected nesting at <{name}>"),
                    }
                    stack.push(name);
                }
                Event::Text(text) if stack.len() == 4 => {
                    let field = records.last_mut().unwrap().last_mut().unwrap();
                    field.1.push_str(&text.unescape().unwrap());
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Eof => break,
                _ => {}
            }
        }

        assert_eq!(1, records_elements);
        records
    }

    fn owned(fields: &[(&str, &str)]) -> Vec<(String, String)> {
        fields
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn compose_single_record() {
        let result = compose(&biblio(&[&[("author", "Smith, J."), ("title", "A Study")]]));

        let expected = format!(
            "{DECL}<xml><records><record><author>Smith, J.</author><title>A Study</title></record></records></xml>"
        );
        assert_eq!(expected, result);
    }

    #[test]
    fn compose_empty_biblio() {
        let result = compose(&Biblio::default());

        assert_eq!(format!("{DECL}<xml><records></records></xml>"), result);
    }

    #[test]
    fn one_element_per_record_and_field() {
        let input = biblio(&[
            &[("ty", "JOUR"), ("au", "Doe, J.")],
            &[],
            &[("title", "Y"), ("note", "")],
        ]);

        let records = read_back(&compose(&input));

        assert_eq!(3, records.len());
        assert_eq!(owned(&[("ty", "JOUR"), ("au", "Doe, J.")]), records[0]);
        assert!(records[1].is_empty());
        assert_eq!(owned(&[("title", "Y"), ("note", "")]), records[2]);
    }

    #[test]
    fn markup_in_values_is_escaped() {
        let value = "Fast <Parsers> & \"Friends\"";
        let xml = compose(&biblio(&[&[("title", value)]]));

        assert!(xml.contains("&lt;Parsers&gt; &amp;"));
        assert_eq!(owned(&[("title", value)]), read_back(&xml)[0]);
    }

    #[test]
    fn composing_twice_is_identical() {
        let input = biblio(&[&[("b", "2"), ("a", "1"), ("c", "3")], &[("z", "26")]]);

        assert_eq!(compose(&input), compose(&input));
    }

    #[test]
    fn invalid_element_names_are_rejected() {
        for name in ["first author", "2nd", "", "dc:title", "a/b", "-x", "x²", "a\u{D7}b"] {
            let input = biblio(&[&[("title", "ok")], &[(name, "value")]]);
            let err = EndNote::compose(&input).unwrap_err();

            assert_eq!(ErrorKind::MalformedField, err.kind());
            assert!(err.to_string().contains("record 1"));
        }
    }

    #[test]
    fn characters_outside_xml_are_rejected() {
        for value in ["A\u{1}B", "page\u{C}break", "nul\u{0}", "\u{FFFE}"] {
            let input = biblio(&[&[("title", "ok")], &[("title", value)]]);
            let err = EndNote::compose(&input).unwrap_err();

            assert_eq!(ErrorKind::MalformedField, err.kind());
            assert!(err.to_string().contains("'title' in record 1"));
        }
    }

    #[test]
    fn whitespace_controls_are_kept() {
        let value = "line one\nline two\tend";
        let xml = compose(&biblio(&[&[("abstract", value)]]));

        assert!(xml.chars().all(|c| is_xml_char(c)));
        assert_eq!(owned(&[("abstract", value)]), read_back(&xml)[0]);
    }

    #[test]
    fn composed_names_and_text_are_xml_characters() {
        let input = biblio(&[&[("année", "Ünïcode \u{1F4DA} text"), ("x_1.b-c", "v")]]);
        let xml = compose(&input);

        assert!(xml.chars().all(|c| is_xml_char(c)));
        assert_eq!(2, read_back(&xml)[0].len());
    }

    #[test]
    fn valid_element_names() {
        for name in ["title", "_id", "secondary-title", "a.b", "x1", "année", "x\u{B7}y", "名前"] {
            assert!(is_element_name(name), "{name} should be valid");
        }
    }
}
