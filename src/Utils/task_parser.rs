/// parse a task document with structure like
/// " title1 key1: value1, value2 key2: value2 title2 key3: value3, value4 "
/// which has section titles and pairs key - vector of values. The result goes
/// into HashMap<String, HashMap<String, Option<Vec<Value>>>>; a template map
/// may be supplied so that every expected key exists in the result, missing
/// ones as None.
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, recognize},
    multi::{many0, many1, separated_list0},
    sequence::{delimited, pair, separated_pair, terminated},
};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

pub type SectionMap = HashMap<String, Option<Vec<Value>>>;
pub type DocumentMap = HashMap<String, SectionMap>;

/// enum to represent the value types found in task documents
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    pub fn as_string(&self) -> Option<&String> {
        if let Value::String(s) = self { Some(s) } else { None }
    }

    /// floats and integers both coerce, so "sigma: 10" works as well as
    /// "sigma: 10.0"
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(i) = self { Some(*i) } else { None }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self { Some(*b) } else { None }
    }
}

// identifier: word characters and underscores, starting with a letter or
// an underscore
fn parse_identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    parser.parse(input)
}

/// Parses a section title; trailing whitespace and newlines are dropped
fn parse_title(input: &str) -> IResult<&str, String> {
    let (input, result) = parse_identifier(input)?;
    Ok((input.trim(), result))
}

fn parse_value(input: &str) -> IResult<&str, Value> {
    // a single value: everything up to a comma, whitespace or semicolon
    let value_parser = take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\n' | '\r' | ';'));
    let mut value_parser = map(value_parser, |s: &str| {
        let s = s.trim();
        // try parsing as different types in order
        if let Ok(val) = s.parse::<i64>() {
            Value::Integer(val)
        } else if let Ok(val) = s.parse::<f64>() {
            Value::Float(val)
        } else if let Ok(val) = s.parse::<bool>() {
            Value::Boolean(val)
        } else {
            Value::String(s.to_string())
        }
    });
    value_parser.parse(input)
}

fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    let (input, _) = multispace0(input)?;
    let separator_coma = delimited(space0, tag(","), space0);
    let mut parser = separated_list0(separator_coma, parse_value);
    parser.parse(input)
}

/// Parses a key-value pair where value is a list; the remaining input is
/// trimmed so pairs may sit on separate lines
fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    let mut parser = separated_pair(parse_identifier, colon_separator, parse_value_list);
    let (input, result) = parser.parse(input)?;
    Ok((input.trim(), result))
}

/// Parses a section: a title followed by one or more key-value pairs. The
/// section ends when a bare identifier without a colon shows up, which is
/// the next section title.
fn parse_section(input: &str) -> IResult<&str, (String, HashMap<String, Vec<Value>>)> {
    let (input, _) = space0(input)?;
    let (input, title) = parse_title(input)?;
    let (input, _) = multispace0(input)?;
    let mut parser = many1(terminated(parse_key_value_pair, space0));
    let (input, pairs) = parser.parse(input)?;

    let mut section_map = HashMap::new();
    for (key, values) in pairs {
        section_map.insert(key, values);
    }
    Ok((input, (title, section_map)))
}

/// Filters out comment lines (starting with //, #, % or ;) and empty lines
fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
                && !trimmed.starts_with(';')
                && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses the entire document into a DocumentMap
pub fn parse_document(input: &str) -> IResult<&str, DocumentMap> {
    let mut parser = many1(delimited(space0, parse_section, multispace0));
    let (input, sections) = parser.parse(input)?;

    let mut result = HashMap::new();
    for (title, section_map) in sections.into_iter() {
        let mut title_map = HashMap::new();
        for (key, values) in section_map {
            title_map.insert(key, Some(values));
        }
        result.insert(title, title_map);
    }
    Ok((input, result))
}

/// Parses a document; with a template every expected section and key is
/// guaranteed to exist in the result, missing ones as None
pub fn parse_document_as(
    input: &str,
    template: Option<DocumentMap>,
) -> Result<DocumentMap, String> {
    match parse_document(input) {
        Ok((remaining, mut parsed)) => {
            if !remaining.trim().is_empty() {
                return Err(format!(
                    "Failed to parse entire document. Remaining: '{}'",
                    remaining
                ));
            }
            if let Some(template) = template {
                for (title, keys_map) in template {
                    if !parsed.contains_key(&title) {
                        parsed.insert(title.clone(), HashMap::new());
                    }
                    let section_map = parsed.get_mut(&title).unwrap();
                    for key in keys_map.keys() {
                        if !section_map.contains_key(key) {
                            section_map.insert(key.clone(), None);
                        }
                    }
                }
            }
            Ok(parsed)
        }
        Err(e) => Err(format!("Parsing error: {:?}", e)),
    }
}

/// holds a task document together with an optional template and the parse
/// result, so the same instance can be handed around between the parameter
/// and postprocessing consumers
#[derive(Debug, Clone)]
pub struct DocumentParser {
    pub input: String,
    template: Option<DocumentMap>,
    result: Option<DocumentMap>,
}

impl DocumentParser {
    pub fn new(input: String) -> Self {
        DocumentParser {
            input,
            template: None,
            result: None,
        }
    }

    pub fn with_template(mut self, template: DocumentMap) -> Self {
        self.template = Some(template);
        self
    }

    /// replace the held input with the contents of a task file;
    /// None falls back to ./lorenz_task.txt
    pub fn setting_from_file(&mut self, path: Option<PathBuf>) -> Result<(), String> {
        let path = path.unwrap_or_else(|| PathBuf::from("lorenz_task.txt"));
        let content = fs::read_to_string(&path)
            .map_err(|e| format!("failed to read task file {:?}: {}", path, e))?;
        self.input = content;
        Ok(())
    }

    pub fn parse_document(&mut self) -> Result<(), String> {
        let filtered = filter_comments(&self.input);
        let parsed = parse_document_as(&filtered, self.template.clone())?;
        self.result = Some(parsed);
        Ok(())
    }

    pub fn get_result(&self) -> Option<&DocumentMap> {
        self.result.as_ref()
    }

    fn first_value(&self, section: &str, key: &str) -> Option<&Value> {
        self.result
            .as_ref()?
            .get(section)?
            .get(key)?
            .as_ref()?
            .first()
    }

    pub fn get_float(&self, section: &str, key: &str) -> Option<f64> {
        self.first_value(section, key)?.as_float()
    }

    pub fn get_integer(&self, section: &str, key: &str) -> Option<i64> {
        self.first_value(section, key)?.as_integer()
    }

    pub fn get_boolean(&self, section: &str, key: &str) -> Option<bool> {
        self.first_value(section, key)?.as_boolean()
    }

    pub fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.first_value(section, key)?.as_string().cloned()
    }
}

/////////////////////////////TESTS////////////////////////////////////////////////////
#[cfg(test)]
mod tests_task_parser {
    use super::*;

    #[test]
    fn test_parse_title() {
        let (remaining, title) = parse_title("solver_settings\n dt: 0.01").unwrap();
        assert_eq!(title, "solver_settings");
        assert_eq!(remaining, "dt: 0.01");
    }

    #[test]
    fn test_parse_value_types() {
        let (_, value) = parse_value("123, next").unwrap();
        assert_eq!(value, Value::Integer(123));

        let (_, value) = parse_value("45.67, next").unwrap();
        assert_eq!(value, Value::Float(45.67));

        let (_, value) = parse_value("true next").unwrap();
        assert_eq!(value, Value::Boolean(true));

        let (_, value) = parse_value("viridis next").unwrap();
        assert_eq!(value, Value::String("viridis".to_string()));
    }

    #[test]
    fn test_parse_key_value_pair_on_one_line() {
        let (remaining, (key, values)) = parse_key_value_pair("x0: 0.0, 1.0, 1.05").unwrap();
        assert_eq!(key, "x0");
        assert_eq!(
            values,
            vec![Value::Float(0.0), Value::Float(1.0), Value::Float(1.05)]
        );
        assert_eq!(remaining, "");
    }

    #[test]
    fn test_parse_section_with_pairs_on_separate_lines() {
        let input = "solver_settings\ndt: 0.01\nnum_steps: 10000";
        let (remaining, (title, map)) = parse_section(input).unwrap();
        assert_eq!(title, "solver_settings");
        assert_eq!(remaining, "");
        assert_eq!(map.get("dt").unwrap(), &vec![Value::Float(0.01)]);
        assert_eq!(map.get("num_steps").unwrap(), &vec![Value::Integer(10000)]);
    }

    #[test]
    fn test_parse_document_with_two_sections() {
        let input = "lorenz_params sigma: 10.0 rho: 28.0\npostprocessing plot: true";
        let (remaining, doc) = parse_document(input).unwrap();
        assert_eq!(remaining, "");
        assert_eq!(doc.len(), 2);
        assert_eq!(
            doc["lorenz_params"].get("sigma").unwrap().as_ref().unwrap(),
            &vec![Value::Float(10.0)]
        );
        assert_eq!(
            doc["postprocessing"].get("plot").unwrap().as_ref().unwrap(),
            &vec![Value::Boolean(true)]
        );
    }

    #[test]
    fn test_parse_document_with_template_fills_missing_keys() {
        let mut template: DocumentMap = HashMap::new();
        let mut section: SectionMap = HashMap::new();
        section.insert("sigma".to_string(), None);
        section.insert("rho".to_string(), None);
        section.insert("beta".to_string(), None);
        template.insert("lorenz_params".to_string(), section);
        template.insert("postprocessing".to_string(), HashMap::new());

        let input = "lorenz_params sigma: 10.0";
        let result = parse_document_as(input, Some(template)).unwrap();

        let section = &result["lorenz_params"];
        assert!(section.get("sigma").unwrap().is_some());
        assert!(section.get("rho").unwrap().is_none());
        assert!(section.get("beta").unwrap().is_none());
        assert!(result.contains_key("postprocessing"));
    }

    #[test]
    fn test_empty_document_is_an_error() {
        assert!(parse_document("").is_err());
    }

    #[test]
    fn test_malformed_document_is_reported() {
        let mut parser = DocumentParser::new("solver_settings dt 0.01".to_string());
        assert!(parser.parse_document().is_err());
    }

    #[test]
    fn test_comments_are_filtered() {
        let input = "# task for the canonical attractor\nsolver_settings\n// step size\ndt: 0.01\n% another comment\nnum_steps: 100";
        let mut parser = DocumentParser::new(input.to_string());
        parser.parse_document().unwrap();
        assert_eq!(parser.get_float("solver_settings", "dt"), Some(0.01));
        assert_eq!(parser.get_integer("solver_settings", "num_steps"), Some(100));
    }

    #[test]
    fn test_typed_accessors() {
        let input =
            "solver_settings dt: 0.02 num_steps: 500 loglevel: info\npostprocessing plot: false colormap: plasma";
        let mut parser = DocumentParser::new(input.to_string());
        parser.parse_document().unwrap();
        assert_eq!(parser.get_float("solver_settings", "dt"), Some(0.02));
        // integers coerce to float but not the other way around
        assert_eq!(parser.get_float("solver_settings", "num_steps"), Some(500.0));
        assert_eq!(parser.get_integer("solver_settings", "dt"), None);
        assert_eq!(parser.get_boolean("postprocessing", "plot"), Some(false));
        assert_eq!(
            parser.get_string("postprocessing", "colormap"),
            Some("plasma".to_string())
        );
        assert_eq!(parser.get_float("solver_settings", "missing"), None);
        assert_eq!(parser.get_float("missing_section", "dt"), None);
    }
}
