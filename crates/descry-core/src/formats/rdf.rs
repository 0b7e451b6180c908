//! Generic RDF reader: N-Triples, a Turtle subset, RDF/XML and RDF/JSON.
//!
//! Covers the serializations a descriptor document is realistically served
//! in. The Turtle reader is a small hand lexer/parser handling prefixes,
//! `@base`, IRIs, prefixed names, literals with datatype or language tags,
//! `a`, `;`/`,` continuations and blank nodes (labels and `[...]` property
//! lists); collections are not supported. N-Triples is the degenerate case
//! of the same grammar. RDF/XML covers the striped core: `rdf:Description`
//! and typed nodes, property elements with `rdf:resource`, nested nodes,
//! `rdf:parseType="Resource"` and text content. RDF/JSON is the
//! `{subject: {predicate: [value]}}` mapping.

use crate::graph::{Graph, Term};
use crate::vocab;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use tracing::debug;
use url::Url;

/// Parses an RDF document of the given content type.
///
/// Returns `None` when the body does not parse as the claimed format.
#[must_use]
pub fn parse(body: &str, base: &str, content_type: &str) -> Option<Graph> {
    let result = match content_type {
        "application/rdf+xml" => parse_rdf_xml(body, base),
        "application/rdf+json" => parse_rdf_json(body),
        _ => parse_turtle(body, base),
    };
    match result {
        Ok(graph) => Some(graph),
        Err(message) => {
            debug!(content_type, error = %message, "RDF parse failed");
            None
        },
    }
}

type ParseResult<T> = Result<T, String>;

// ---------------------------------------------------------------------------
// Turtle / N-Triples
// ---------------------------------------------------------------------------

struct TurtleParser<'a> {
    input: &'a [u8],
    pos: usize,
    base: String,
    prefixes: std::collections::HashMap<String, String>,
    bnode_counter: usize,
    graph: Graph,
}

fn parse_turtle(body: &str, base: &str) -> ParseResult<Graph> {
    let mut parser = TurtleParser {
        input: body.as_bytes(),
        pos: 0,
        base: base.to_string(),
        prefixes: std::collections::HashMap::new(),
        bnode_counter: 0,
        graph: Graph::new(),
    };
    parser.run()?;
    Ok(parser.graph)
}

impl TurtleParser<'_> {
    fn run(&mut self) -> ParseResult<()> {
        loop {
            self.skip_trivia();
            if self.at_end() {
                return Ok(());
            }
            if self.peek() == b'@' || self.keyword_ahead("PREFIX") || self.keyword_ahead("BASE") {
                self.parse_directive()?;
            } else {
                self.parse_triples()?;
            }
        }
    }

    fn parse_directive(&mut self) -> ParseResult<()> {
        let at_form = self.peek() == b'@';
        if at_form {
            self.pos += 1;
        }
        let word = self.take_word();
        match word.to_ascii_lowercase().as_str() {
            "prefix" => {
                self.skip_trivia();
                let prefix = self.take_until(b':');
                self.expect(b':')?;
                self.skip_trivia();
                let iri = self.parse_iri_ref()?;
                self.prefixes.insert(prefix, iri);
            },
            "base" => {
                self.skip_trivia();
                let iri = self.parse_iri_ref()?;
                self.base = iri;
            },
            other => return Err(format!("unknown directive: {other}")),
        }
        // the @-form ends with '.', the SPARQL form does not
        if at_form {
            self.expect(b'.')?;
        }
        Ok(())
    }

    fn parse_triples(&mut self) -> ParseResult<()> {
        let subject = self.parse_subject()?;
        self.parse_predicate_object_list(&subject)?;
        self.skip_trivia();
        self.expect(b'.')
    }

    fn parse_subject(&mut self) -> ParseResult<Term> {
        self.skip_trivia();
        match self.peek() {
            b'<' => Ok(Term::iri(self.parse_iri_ref()?)),
            b'_' => Ok(self.parse_blank_label()?),
            b'[' => self.parse_blank_property_list(),
            _ => Ok(Term::iri(self.parse_prefixed_name()?)),
        }
    }

    fn parse_predicate_object_list(&mut self, subject: &Term) -> ParseResult<()> {
        loop {
            self.skip_trivia();
            let predicate = self.parse_predicate()?;
            loop {
                let object = self.parse_object()?;
                self.graph
                    .add_triple(subject.clone(), predicate.clone(), object);
                self.skip_trivia();
                if self.peek_is(b',') {
                    self.pos += 1;
                } else {
                    break;
                }
            }
            if self.peek_is(b';') {
                self.pos += 1;
                self.skip_trivia();
                // stray ';' before '.' or ']' is legal Turtle
                if self.at_end() || self.peek() == b'.' || self.peek() == b']' {
                    return Ok(());
                }
            } else {
                return Ok(());
            }
        }
    }

    fn parse_predicate(&mut self) -> ParseResult<String> {
        self.skip_trivia();
        if self.peek() == b'<' {
            return self.parse_iri_ref();
        }
        // bare 'a' abbreviates rdf:type
        if self.peek() == b'a' && self.boundary_at(self.pos + 1) {
            self.pos += 1;
            return Ok(vocab::rdf::TYPE.to_string());
        }
        self.parse_prefixed_name()
    }

    fn parse_object(&mut self) -> ParseResult<Term> {
        self.skip_trivia();
        match self.peek() {
            b'<' => Ok(Term::iri(self.parse_iri_ref()?)),
            b'"' | b'\'' => self.parse_literal(),
            b'_' => self.parse_blank_label(),
            b'[' => self.parse_blank_property_list(),
            b'(' => Err("collections are not supported".to_string()),
            b'+' | b'-' | b'0'..=b'9' => self.parse_numeric(),
            _ => {
                let start = self.pos;
                let name = self.parse_prefixed_name();
                match name {
                    Ok(iri) => Ok(Term::iri(iri)),
                    Err(_) => {
                        self.pos = start;
                        self.parse_boolean()
                    },
                }
            },
        }
    }

    fn parse_literal(&mut self) -> ParseResult<Term> {
        let value = self.parse_string()?;
        if self.peek_is(b'@') {
            self.pos += 1;
            let _lang = self.take_word_with(|c| c.is_ascii_alphanumeric() || c == b'-');
            return Ok(Term::typed_literal(value, vocab::rdf::LANG_STRING));
        }
        if self.input[self.pos..].starts_with(b"^^") {
            self.pos += 2;
            self.skip_trivia();
            let datatype = if self.peek() == b'<' {
                self.parse_iri_ref()?
            } else {
                self.parse_prefixed_name()?
            };
            return Ok(Term::typed_literal(value, datatype));
        }
        Ok(Term::literal(value))
    }

    fn parse_string(&mut self) -> ParseResult<String> {
        let quote = self.peek();
        let long_delim = [quote, quote, quote];
        let long = self.input[self.pos..].starts_with(&long_delim);
        if long {
            self.pos += 3;
        } else {
            self.pos += 1;
        }
        let mut value = String::new();
        loop {
            if self.at_end() {
                return Err("unterminated string literal".to_string());
            }
            if long && self.input[self.pos..].starts_with(&long_delim) {
                self.pos += 3;
                return Ok(value);
            }
            let c = self.peek();
            if !long && c == quote {
                self.pos += 1;
                return Ok(value);
            }
            if c == b'\\' {
                self.pos += 1;
                value.push(self.parse_escape()?);
            } else {
                let rest = std::str::from_utf8(&self.input[self.pos..])
                    .map_err(|e| e.to_string())?;
                let ch = rest.chars().next().ok_or("unterminated string")?;
                value.push(ch);
                self.pos += ch.len_utf8();
            }
        }
    }

    fn parse_escape(&mut self) -> ParseResult<char> {
        let c = self.peek();
        self.pos += 1;
        match c {
            b't' => Ok('\t'),
            b'n' => Ok('\n'),
            b'r' => Ok('\r'),
            b'b' => Ok('\u{0008}'),
            b'f' => Ok('\u{000C}'),
            b'"' => Ok('"'),
            b'\'' => Ok('\''),
            b'\\' => Ok('\\'),
            b'u' => self.parse_unicode_escape(4),
            b'U' => self.parse_unicode_escape(8),
            other => Err(format!("invalid escape: \\{}", other as char)),
        }
    }

    fn parse_unicode_escape(&mut self, digits: usize) -> ParseResult<char> {
        if self.pos + digits > self.input.len() {
            return Err("truncated unicode escape".to_string());
        }
        let hex = std::str::from_utf8(&self.input[self.pos..self.pos + digits])
            .map_err(|e| e.to_string())?;
        self.pos += digits;
        let code = u32::from_str_radix(hex, 16).map_err(|e| e.to_string())?;
        char::from_u32(code).ok_or_else(|| format!("invalid code point: {code:#x}"))
    }

    fn parse_numeric(&mut self) -> ParseResult<Term> {
        let word = self.take_word_with(|c| {
            c.is_ascii_digit() || matches!(c, b'+' | b'-' | b'.' | b'e' | b'E')
        });
        // a trailing '.' is the statement terminator, not part of the number
        let trimmed = word.trim_end_matches('.');
        self.pos -= word.len() - trimmed.len();
        let datatype = if trimmed.contains(['e', 'E']) {
            vocab::xsd::DOUBLE
        } else if trimmed.contains('.') {
            vocab::xsd::DECIMAL
        } else {
            vocab::xsd::INTEGER
        };
        if trimmed.is_empty() {
            return Err("empty numeric literal".to_string());
        }
        Ok(Term::typed_literal(trimmed, datatype))
    }

    fn parse_boolean(&mut self) -> ParseResult<Term> {
        for keyword in ["true", "false"] {
            if self.keyword_ahead(keyword) {
                self.pos += keyword.len();
                return Ok(Term::typed_literal(keyword, vocab::xsd::BOOLEAN));
            }
        }
        Err("expected RDF term".to_string())
    }

    fn parse_blank_label(&mut self) -> ParseResult<Term> {
        if !self.input[self.pos..].starts_with(b"_:") {
            return Err("expected blank node label".to_string());
        }
        self.pos += 2;
        let label = self.take_word_with(|c| c.is_ascii_alphanumeric() || c == b'_' || c == b'-');
        Ok(Term::iri(format!("_:{label}")))
    }

    fn parse_blank_property_list(&mut self) -> ParseResult<Term> {
        self.expect(b'[')?;
        self.bnode_counter += 1;
        let subject = Term::iri(format!("_:g{}", self.bnode_counter));
        self.skip_trivia();
        if self.peek() != b']' {
            self.parse_predicate_object_list(&subject)?;
            self.skip_trivia();
        }
        self.expect(b']')?;
        Ok(subject)
    }

    fn parse_iri_ref(&mut self) -> ParseResult<String> {
        self.expect(b'<')?;
        let raw = self.take_until(b'>');
        self.expect(b'>')?;
        Ok(self.resolve(&raw))
    }

    fn parse_prefixed_name(&mut self) -> ParseResult<String> {
        let raw = self.take_word_with(|c| {
            c.is_ascii_alphanumeric() || matches!(c, b':' | b'_' | b'-' | b'.' | b'%')
        });
        // a trailing '.' is the statement terminator, not part of the name
        let word = raw.trim_end_matches('.');
        self.pos -= raw.len() - word.len();
        let (prefix, local) = word
            .split_once(':')
            .ok_or_else(|| format!("expected prefixed name, got: {word}"))?;
        let namespace = self
            .prefixes
            .get(prefix)
            .ok_or_else(|| format!("unknown prefix: {prefix}"))?;
        Ok(format!("{namespace}{local}"))
    }

    fn resolve(&self, iri: &str) -> String {
        if iri.contains("://") || iri.starts_with("urn:") {
            return iri.to_string();
        }
        if let Ok(base) = Url::parse(&self.base) {
            if let Ok(resolved) = base.join(iri) {
                return resolved.to_string();
            }
        }
        iri.to_string()
    }

    // -- lexing helpers -----------------------------------------------------

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> u8 {
        self.input.get(self.pos).copied().unwrap_or(0)
    }

    fn peek_is(&mut self, expected: u8) -> bool {
        self.skip_trivia();
        !self.at_end() && self.peek() == expected
    }

    fn expect(&mut self, expected: u8) -> ParseResult<()> {
        self.skip_trivia();
        if self.at_end() || self.peek() != expected {
            return Err(format!(
                "expected '{}' at byte {}",
                expected as char, self.pos
            ));
        }
        self.pos += 1;
        Ok(())
    }

    fn skip_trivia(&mut self) {
        while !self.at_end() {
            let c = self.peek();
            if c.is_ascii_whitespace() {
                self.pos += 1;
            } else if c == b'#' {
                while !self.at_end() && self.peek() != b'\n' {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    fn boundary_at(&self, pos: usize) -> bool {
        self.input
            .get(pos)
            .is_none_or(|&c| c.is_ascii_whitespace() || matches!(c, b'<' | b'"' | b'\'' | b'['))
    }

    fn keyword_ahead(&self, keyword: &str) -> bool {
        let end = self.pos + keyword.len();
        self.input.len() >= end
            && self.input[self.pos..end].eq_ignore_ascii_case(keyword.as_bytes())
            && self.boundary_at(end)
    }

    fn take_word(&mut self) -> String {
        self.take_word_with(|c| c.is_ascii_alphanumeric())
    }

    fn take_word_with(&mut self, accept: impl Fn(u8) -> bool) -> String {
        let start = self.pos;
        while !self.at_end() && accept(self.peek()) {
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }

    fn take_until(&mut self, stop: u8) -> String {
        let start = self.pos;
        while !self.at_end() && self.peek() != stop {
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }
}

// ---------------------------------------------------------------------------
// RDF/XML
// ---------------------------------------------------------------------------

enum Frame {
    /// The `rdf:RDF` document element.
    Container,
    /// A node element; children are property elements of this subject.
    Node(String),
    /// A property element awaiting its object.
    Property {
        subject: String,
        predicate: String,
        datatype: Option<String>,
        text: String,
        has_node: bool,
    },
}

fn parse_rdf_xml(body: &str, base: &str) -> ParseResult<Graph> {
    let mut reader = NsReader::from_str(body);
    let mut graph = Graph::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut bnode_counter = 0usize;
    let mut buf = Vec::new();

    loop {
        match reader.read_resolved_event_into(&mut buf) {
            Ok((resolved, Event::Start(e))) => {
                handle_element(
                    &resolved, &e, base, &mut graph, &mut stack, &mut bnode_counter, false,
                )?;
            },
            Ok((resolved, Event::Empty(e))) => {
                handle_element(
                    &resolved, &e, base, &mut graph, &mut stack, &mut bnode_counter, true,
                )?;
            },
            Ok((_, Event::Text(e))) => {
                if let Some(Frame::Property { text, .. }) = stack.last_mut() {
                    text.push_str(&e.unescape().map_err(|e| e.to_string())?);
                }
            },
            Ok((_, Event::End(_))) => {
                if let Some(frame) = stack.pop() {
                    finish_frame(frame, &mut graph);
                }
            },
            Ok((_, Event::Eof)) => break,
            Err(e) => return Err(e.to_string()),
            Ok(_) => {},
        }
        buf.clear();
    }

    if stack.is_empty() {
        Ok(graph)
    } else {
        Err("unbalanced RDF/XML document".to_string())
    }
}

fn finish_frame(frame: Frame, graph: &mut Graph) {
    if let Frame::Property {
        subject,
        predicate,
        datatype,
        text,
        has_node: false,
    } = frame
    {
        let value = text.trim();
        if !value.is_empty() {
            let object = match datatype {
                Some(d) => Term::typed_literal(value, d),
                None => Term::literal(value),
            };
            graph.add_triple(Term::iri(subject), predicate, object);
        }
    }
}

#[allow(clippy::too_many_lines)]
fn handle_element(
    resolved: &ResolveResult,
    element: &BytesStart<'_>,
    base: &str,
    graph: &mut Graph,
    stack: &mut Vec<Frame>,
    bnode_counter: &mut usize,
    is_empty: bool,
) -> ParseResult<()> {
    let local = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
    let namespace = match resolved {
        ResolveResult::Bound(ns) => String::from_utf8_lossy(ns.as_ref()).into_owned(),
        _ => String::new(),
    };
    let is_rdf_ns = namespace == vocab::rdf::NS;

    let expects_node = matches!(
        stack.last(),
        None | Some(Frame::Container | Frame::Property { .. })
    );

    if expects_node {
        if is_rdf_ns && local == "RDF" {
            if is_empty {
                return Ok(());
            }
            stack.push(Frame::Container);
            return Ok(());
        }

        // node element: subject from rdf:about / rdf:nodeID, else a bnode
        let subject = if let Some(about) = rdf_attribute(element, "about") {
            resolve_against(base, &about)
        } else if let Some(node_id) = rdf_attribute(element, "nodeID") {
            format!("_:{node_id}")
        } else {
            *bnode_counter += 1;
            format!("_:x{bnode_counter}")
        };

        if !(is_rdf_ns && local == "Description") {
            if namespace.is_empty() {
                return Err(format!("unbound namespace on typed node <{local}>"));
            }
            graph.add_triple(
                Term::iri(subject.clone()),
                vocab::rdf::TYPE,
                Term::iri(format!("{namespace}{local}")),
            );
        }

        if let Some(Frame::Property {
            subject: parent_subject,
            predicate,
            has_node,
            ..
        }) = stack.last_mut()
        {
            *has_node = true;
            graph.add_triple(
                Term::iri(parent_subject.clone()),
                predicate.clone(),
                Term::iri(subject.clone()),
            );
        }

        if !is_empty {
            stack.push(Frame::Node(subject));
        }
        return Ok(());
    }

    // property element under a node
    let Some(Frame::Node(subject)) = stack.last() else {
        return Err("property element outside a node".to_string());
    };
    let subject = subject.clone();
    if namespace.is_empty() {
        return Err(format!("unbound namespace on property <{local}>"));
    }
    let predicate = format!("{namespace}{local}");

    if let Some(resource) = rdf_attribute(element, "resource") {
        graph.add_triple(
            Term::iri(subject),
            predicate,
            Term::iri(resolve_against(base, &resource)),
        );
        if !is_empty {
            stack.push(Frame::Property {
                subject: String::new(),
                predicate: String::new(),
                datatype: None,
                text: String::new(),
                has_node: true,
            });
        }
        return Ok(());
    }

    if let Some(node_id) = rdf_attribute(element, "nodeID") {
        graph.add_triple(
            Term::iri(subject),
            predicate,
            Term::iri(format!("_:{node_id}")),
        );
        if !is_empty {
            stack.push(Frame::Property {
                subject: String::new(),
                predicate: String::new(),
                datatype: None,
                text: String::new(),
                has_node: true,
            });
        }
        return Ok(());
    }

    if rdf_attribute(element, "parseType").as_deref() == Some("Resource") {
        *bnode_counter += 1;
        let object = format!("_:x{bnode_counter}");
        graph.add_triple(
            Term::iri(subject),
            predicate,
            Term::iri(object.clone()),
        );
        if !is_empty {
            // children are property elements of the implicit bnode
            stack.push(Frame::Node(object));
        }
        return Ok(());
    }

    if is_empty {
        return Ok(());
    }
    stack.push(Frame::Property {
        subject,
        predicate,
        datatype: rdf_attribute(element, "datatype").map(|d| resolve_against(base, &d)),
        text: String::new(),
        has_node: false,
    });
    Ok(())
}

/// Reads an `rdf:`-namespaced attribute by local name, prefix-leniently.
fn rdf_attribute(element: &BytesStart<'_>, name: &str) -> Option<String> {
    element.attributes().filter_map(Result::ok).find_map(|a| {
        if a.key.local_name().as_ref() == name.as_bytes() {
            a.unescape_value().ok().map(|v| v.into_owned())
        } else {
            None
        }
    })
}

fn resolve_against(base: &str, target: &str) -> String {
    if target.contains("://") || target.starts_with("urn:") || target.starts_with("_:") {
        return target.to_string();
    }
    if let Ok(base) = Url::parse(base) {
        if let Ok(resolved) = base.join(target) {
            return resolved.to_string();
        }
    }
    target.to_string()
}

// ---------------------------------------------------------------------------
// RDF/JSON
// ---------------------------------------------------------------------------

fn parse_rdf_json(body: &str) -> ParseResult<Graph> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| e.to_string())?;
    let map = value.as_object().ok_or("RDF/JSON root must be an object")?;
    let mut graph = Graph::new();

    for (subject, predicates) in map {
        let predicates = predicates
            .as_object()
            .ok_or("subject entry must be an object")?;
        for (predicate, objects) in predicates {
            let objects = objects.as_array().ok_or("predicate entry must be an array")?;
            for object in objects {
                let kind = object.get("type").and_then(|t| t.as_str()).unwrap_or("literal");
                let value = object
                    .get("value")
                    .and_then(|v| v.as_str())
                    .ok_or("object value must be a string")?;
                let term = match kind {
                    "uri" => Term::iri(value),
                    "bnode" => Term::iri(value.to_string()),
                    _ => match object.get("datatype").and_then(|d| d.as_str()) {
                        Some(datatype) => Term::typed_literal(value, datatype),
                        None => Term::literal(value),
                    },
                };
                graph.add_triple(Term::iri(subject.clone()), predicate.clone(), term);
            }
        }
    }
    Ok(graph)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const BASE: &str = "http://a.example/doc";

    #[test]
    fn ntriples_lines() {
        let body = concat!(
            "<http://a.example/doc> <http://www.w3.org/2000/01/rdf-schema#seeAlso> ",
            "<http://a.example/doc.meta> .\n",
            "<http://a.example/doc> <http://purl.org/dc/terms/title> \"A doc\" .\n",
        );
        let graph = parse(body, BASE, "text/turtle").unwrap();
        assert_eq!(graph.len(), 2);
        assert!(graph.has_subject("http://a.example/doc"));
    }

    #[test]
    fn turtle_prefixes_and_semicolons() {
        let body = r#"
            @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
            @prefix dct: <http://purl.org/dc/terms/> .
            <http://a.example/doc>
                rdfs:seeAlso <http://a.example/doc.meta> ;
                dct:title "A doc", "Ein Dokument"@de .
        "#;
        let graph = parse(body, BASE, "text/turtle").unwrap();
        assert_eq!(graph.len(), 3);
        let objects: Vec<_> = graph
            .objects(
                Some("http://a.example/doc"),
                "http://www.w3.org/2000/01/rdf-schema#seeAlso",
            )
            .collect();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].as_iri(), Some("http://a.example/doc.meta"));
    }

    #[test]
    fn turtle_relative_iri_resolves_against_base_directive() {
        let body = r#"
            @base <http://b.example/dir/> .
            <thing> <http://example.org/p> <other> .
        "#;
        let graph = parse(body, BASE, "text/turtle").unwrap();
        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.subject.as_iri(), Some("http://b.example/dir/thing"));
        assert_eq!(triple.object.as_iri(), Some("http://b.example/dir/other"));
    }

    #[test]
    fn turtle_a_keyword_and_typed_literal() {
        let body = r#"
            @prefix foaf: <http://xmlns.com/foaf/0.1/> .
            @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
            <http://a.example/doc> a foaf:Document ;
                foaf:age "42"^^xsd:integer .
        "#;
        let graph = parse(body, BASE, "text/turtle").unwrap();
        assert_eq!(graph.len(), 2);
        let types: Vec<_> = graph
            .objects(Some("http://a.example/doc"), vocab::rdf::TYPE)
            .collect();
        assert_eq!(types[0].as_iri(), Some("http://xmlns.com/foaf/0.1/Document"));
    }

    #[test]
    fn turtle_blank_property_list() {
        let body = r#"
            @prefix foaf: <http://xmlns.com/foaf/0.1/> .
            <http://a.example/doc> foaf:maker [ foaf:name "Ada" ] .
        "#;
        let graph = parse(body, BASE, "text/turtle").unwrap();
        assert_eq!(graph.len(), 2);
        let maker = graph
            .objects(Some("http://a.example/doc"), "http://xmlns.com/foaf/0.1/maker")
            .next()
            .unwrap();
        let label = maker.as_iri().unwrap();
        assert!(label.starts_with("_:"));
        assert!(graph.has_subject(label));
    }

    #[test]
    fn turtle_numeric_and_boolean_objects() {
        let body = r#"
            <http://a.example/doc> <http://example.org/count> 3 ;
                <http://example.org/ratio> 0.5 ;
                <http://example.org/open> true .
        "#;
        let graph = parse(body, BASE, "text/turtle").unwrap();
        assert_eq!(graph.len(), 3);
        let count = graph
            .objects(Some("http://a.example/doc"), "http://example.org/count")
            .next()
            .unwrap();
        assert!(count.has_datatype(vocab::xsd::INTEGER));
    }

    #[test]
    fn malformed_turtle_is_none() {
        assert!(parse("this is ;; not turtle <", BASE, "text/turtle").is_none());
    }

    #[test]
    fn rdf_xml_description_with_resource_and_text() {
        let body = r#"<?xml version="1.0"?>
            <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
                     xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
                     xmlns:dct="http://purl.org/dc/terms/">
              <rdf:Description rdf:about="http://a.example/doc">
                <rdfs:seeAlso rdf:resource="http://a.example/doc.meta"/>
                <dct:title>A doc</dct:title>
              </rdf:Description>
            </rdf:RDF>"#;
        let graph = parse(body, BASE, "application/rdf+xml").unwrap();
        assert_eq!(graph.len(), 2);
        let see_also = graph
            .objects(
                Some("http://a.example/doc"),
                "http://www.w3.org/2000/01/rdf-schema#seeAlso",
            )
            .next()
            .unwrap();
        assert_eq!(see_also.as_iri(), Some("http://a.example/doc.meta"));
    }

    #[test]
    fn rdf_xml_typed_node_and_nested_node() {
        let body = r#"<?xml version="1.0"?>
            <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
                     xmlns:foaf="http://xmlns.com/foaf/0.1/">
              <foaf:Document rdf:about="http://a.example/doc">
                <foaf:maker>
                  <foaf:Person rdf:about="http://a.example/ada">
                    <foaf:name>Ada</foaf:name>
                  </foaf:Person>
                </foaf:maker>
              </foaf:Document>
            </rdf:RDF>"#;
        let graph = parse(body, BASE, "application/rdf+xml").unwrap();
        // type, maker arc, nested type, nested name
        assert_eq!(graph.len(), 4);
        let maker = graph
            .objects(Some("http://a.example/doc"), "http://xmlns.com/foaf/0.1/maker")
            .next()
            .unwrap();
        assert_eq!(maker.as_iri(), Some("http://a.example/ada"));
    }

    #[test]
    fn rdf_xml_relative_about_resolves() {
        let body = r#"<?xml version="1.0"?>
            <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
                     xmlns:ex="http://example.org/">
              <rdf:Description rdf:about="">
                <ex:p rdf:resource="meta"/>
              </rdf:Description>
            </rdf:RDF>"#;
        let graph = parse(body, BASE, "application/rdf+xml").unwrap();
        assert!(graph.has_subject("http://a.example/doc"));
        let object = graph
            .objects(Some("http://a.example/doc"), "http://example.org/p")
            .next()
            .unwrap();
        assert_eq!(object.as_iri(), Some("http://a.example/meta"));
    }

    #[test]
    fn malformed_xml_is_none() {
        assert!(parse("<rdf:RDF><broken", BASE, "application/rdf+xml").is_none());
    }

    #[test]
    fn rdf_json_round() {
        let body = r#"{
            "http://a.example/doc": {
                "http://www.w3.org/2000/01/rdf-schema#seeAlso": [
                    { "type": "uri", "value": "http://a.example/doc.meta" }
                ],
                "http://purl.org/dc/terms/title": [
                    { "type": "literal", "value": "A doc" }
                ]
            }
        }"#;
        let graph = parse(body, BASE, "application/rdf+json").unwrap();
        assert_eq!(graph.len(), 2);
        assert!(graph.has_subject("http://a.example/doc"));
    }

    #[test]
    fn rdf_json_array_root_is_none() {
        assert!(parse("[1, 2]", BASE, "application/rdf+json").is_none());
    }
}
