//! Tag grammar and the per-call descriptor table.
//!
//! A tag is a comma-separated list:
//!
//! ```text
//! trailing
//! ,-X[,mandatory]
//! longname[,-X][,mandatory]
//! longname,mandatory
//! ```
//!
//! Names may be written with or without their leading dashes. Compiling a
//! record's bindings yields a [`Table`]: one [`FieldDescriptor`] per tagged
//! field, plus the keys (`--name`, `--no-name`, `-n`) that route tokens to
//! them.

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::binding::FieldBinding;
use crate::error::Error;
use crate::value::ValueKind;

const TRAILING: &str = "trailing";
const MANDATORY: &str = "mandatory";
const NEGATION_PREFIX: &str = "--no-";

fn trim_name(token: &str) -> &str {
    token.trim_matches(|c: char| c.is_whitespace() || c == '-')
}

/// A parsed tag, before it is attached to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TagSpec {
    pub long: Option<String>,
    pub short: Option<char>,
    pub mandatory: bool,
    pub trailing: bool,
}

impl TagSpec {
    /// Parse tag text. The error is the reason the tag was rejected.
    pub fn parse(tag: &str) -> Result<Self, String> {
        let tokens: Vec<&str> = tag.split(',').collect();
        let head = tokens[0].trim();

        match head {
            TRAILING => {
                if tokens.len() != 1 {
                    return Err(format!("expected '{TRAILING}' alone"));
                }
                Ok(Self {
                    trailing: true,
                    ..Self::default()
                })
            }
            "" => Self::parse_short_form(&tokens),
            _ => Self::parse_long_form(head, &tokens),
        }
    }

    fn parse_short_form(tokens: &[&str]) -> Result<Self, String> {
        if tokens.len() < 2 || tokens.len() > 3 {
            return Err("expected two or three values".to_string());
        }

        let mut chars = trim_name(tokens[1]).chars();
        let (Some(short), None) = (chars.next(), chars.next()) else {
            return Err("expected a single char value".to_string());
        };

        let mandatory = match tokens.get(2) {
            None => false,
            Some(token) if token.trim() == MANDATORY => true,
            Some(_) => return Err(format!("expected '{MANDATORY}' as third value")),
        };

        Ok(Self {
            short: Some(short),
            mandatory,
            ..Self::default()
        })
    }

    fn parse_long_form(head: &str, tokens: &[&str]) -> Result<Self, String> {
        let long = trim_name(head);
        let mut spec = Self {
            long: (!long.is_empty()).then(|| long.to_string()),
            ..Self::default()
        };

        if let Some(second) = tokens.get(1) {
            let second = trim_name(second);
            if second == MANDATORY {
                spec.mandatory = true;
            } else {
                let mut chars = second.chars();
                spec.short = match (chars.next(), chars.next()) {
                    (None, _) => None,
                    (Some(c), None) => Some(c),
                    (Some(_), Some(_)) => return Err("expected a single char value".to_string()),
                };
                if let Some(third) = tokens.get(2) {
                    if third.trim() != MANDATORY {
                        return Err(format!("expected '{MANDATORY}' as third value"));
                    }
                    spec.mandatory = true;
                }
            }
        }

        if spec.long.is_none() && spec.short.is_none() {
            return Err("expected a long or short name".to_string());
        }
        Ok(spec)
    }
}

/// Compiled binding metadata for one tagged field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldDescriptor {
    /// Position of the field's binding in the record's table.
    pub field: usize,
    pub long: Option<String>,
    pub short: Option<char>,
    pub mandatory: bool,
    pub trailing: bool,
    pub kind: ValueKind,
    pub writable: bool,
    pub found: bool,
    pub visited: bool,
    pub raw: Vec<String>,
}

impl FieldDescriptor {
    fn new(field: usize, spec: TagSpec, kind: ValueKind, writable: bool) -> Self {
        Self {
            field,
            long: spec.long,
            short: spec.short,
            mandatory: spec.mandatory,
            trailing: spec.trailing,
            kind,
            writable,
            found: false,
            visited: false,
            raw: Vec::new(),
        }
    }

    /// Long name, else short name, without dashes.
    pub fn display_name(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) => long.clone(),
            (None, Some(short)) => short.to_string(),
            (None, None) => TRAILING.to_string(),
        }
    }

    /// The key this descriptor is primarily known by on the command line.
    pub fn primary_key(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) => format!("--{long}"),
            (None, Some(short)) => format!("-{short}"),
            (None, None) => TRAILING.to_string(),
        }
    }
}

/// Where a key routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot {
    pub index: usize,
    /// The key is the `--no-` form of a boolean field.
    pub negated: bool,
}

/// Per-call lookup table: descriptor arena plus key routing.
#[derive(Debug, Clone, Default)]
pub(crate) struct Table {
    descriptors: Vec<FieldDescriptor>,
    keys: IndexMap<String, Slot>,
    trailing: Option<usize>,
}

impl Table {
    /// Compile every tagged binding. Bindings with an empty tag are skipped.
    pub fn compile<T>(bindings: &[FieldBinding<T>]) -> Result<Self, Error> {
        let mut table = Self::default();

        for (field, binding) in bindings.iter().enumerate() {
            if binding.tag().is_empty() {
                continue;
            }
            let invalid = |reason: String| Error::InvalidTag {
                field: binding.name().to_string(),
                tag: binding.tag().to_string(),
                reason,
            };

            let spec = TagSpec::parse(binding.tag()).map_err(invalid)?;
            let kind = binding.kind();
            let index = table.descriptors.len();

            if spec.trailing {
                if !kind.accepts_trailing() {
                    return Err(invalid(format!(
                        "expected a string or string collection field, found {kind}"
                    )));
                }
                if table.trailing.is_some() {
                    return Err(invalid("only one trailing field is allowed".to_string()));
                }
                table.trailing = Some(index);
            } else {
                if let Some(long) = &spec.long {
                    table
                        .register(format!("--{long}"), index, false)
                        .map_err(invalid)?;
                    if kind == ValueKind::Bool {
                        table
                            .register(format!("{NEGATION_PREFIX}{long}"), index, true)
                            .map_err(invalid)?;
                    }
                }
                if let Some(short) = spec.short {
                    table
                        .register(format!("-{short}"), index, false)
                        .map_err(invalid)?;
                }
            }

            table.descriptors.push(FieldDescriptor::new(
                field,
                spec,
                kind,
                binding.is_writable(),
            ));
        }

        tracing::debug!(
            descriptors = table.descriptors.len(),
            keys = table.keys.len(),
            trailing = table.trailing.is_some(),
            "compiled binding table"
        );
        Ok(table)
    }

    fn register(&mut self, key: String, index: usize, negated: bool) -> Result<(), String> {
        match self.keys.entry(key) {
            Entry::Occupied(entry) => Err(format!("key '{}' is already bound", entry.key())),
            Entry::Vacant(entry) => {
                entry.insert(Slot { index, negated });
                Ok(())
            }
        }
    }

    pub fn lookup(&self, key: &str) -> Option<Slot> {
        self.keys.get(key).copied()
    }

    #[cfg(test)]
    /// Registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    pub fn trailing(&self) -> Option<usize> {
        self.trailing
    }

    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    #[cfg(test)]
    pub fn descriptor(&self, index: usize) -> &FieldDescriptor {
        &self.descriptors[index]
    }

    pub(crate) fn descriptor_mut(&mut self, index: usize) -> &mut FieldDescriptor {
        &mut self.descriptors[index]
    }

    pub(crate) fn descriptors_mut(&mut self) -> &mut [FieldDescriptor] {
        &mut self.descriptors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn compile(bindings: Vec<FieldBinding<()>>) -> Result<Table, Error> {
        Table::compile(&bindings)
    }

    fn reason(tag: &str) -> String {
        TagSpec::parse(tag).unwrap_err()
    }

    #[test]
    fn long_form_variants() {
        assert_eq!(
            TagSpec::parse("--recursive,-R,mandatory").unwrap(),
            TagSpec {
                long: Some("recursive".to_string()),
                short: Some('R'),
                mandatory: true,
                trailing: false,
            }
        );
        assert_eq!(
            TagSpec::parse("image, mandatory").unwrap(),
            TagSpec {
                long: Some("image".to_string()),
                mandatory: true,
                ..TagSpec::default()
            }
        );
        let spec = TagSpec::parse("recursive,,mandatory").unwrap();
        assert_eq!(spec.short, None);
        assert!(spec.mandatory);
    }

    #[test]
    fn short_form_variants() {
        let spec = TagSpec::parse(",-S,mandatory").unwrap();
        assert_eq!(spec.long, None);
        assert_eq!(spec.short, Some('S'));
        assert!(spec.mandatory);

        let spec = TagSpec::parse(", O").unwrap();
        assert_eq!(spec.short, Some('O'));
        assert!(!spec.mandatory);
    }

    #[test]
    fn rejects_malformed_tags() {
        assert_eq!(reason(",-s,foo,bar"), "expected two or three values");
        assert_eq!(reason(","), "expected a single char value");
        assert_eq!(reason(",-"), "expected a single char value");
        assert_eq!(reason(",-s,unexpected"), "expected 'mandatory' as third value");
        assert_eq!(reason("--test,-wrongtag"), "expected a single char value");
        assert_eq!(reason("--test,-t,another"), "expected 'mandatory' as third value");
        assert_eq!(reason("trailing,-t"), "expected 'trailing' alone");
        assert_eq!(reason("--"), "expected a long or short name");
    }

    #[test]
    fn boolean_fields_get_negation_key() {
        let table = compile(vec![
            FieldBinding::readonly::<bool>("recursive", "--recursive,-R"),
            FieldBinding::readonly::<String>("name", "name"),
        ])
        .unwrap();

        let keys: Vec<&str> = table.keys().collect();
        assert_eq!(keys, ["--recursive", "--no-recursive", "-R", "--name"]);
        assert_eq!(table.lookup("--no-recursive"), Some(Slot { index: 0, negated: true }));
        assert_eq!(table.lookup("-R"), Some(Slot { index: 0, negated: false }));
        assert_eq!(table.lookup("--no-name"), None);
    }

    #[test]
    fn untagged_bindings_are_skipped() {
        let table = compile(vec![
            FieldBinding::readonly::<String>("plain", ""),
            FieldBinding::readonly::<i64>("size", "--size"),
        ])
        .unwrap();
        assert_eq!(table.descriptors().len(), 1);
        assert_eq!(table.descriptor(0).field, 1);
        assert_eq!(table.descriptor(0).kind, ValueKind::Int(64));
    }

    #[test]
    fn trailing_must_hold_strings() {
        let table =
            compile(vec![FieldBinding::readonly::<Vec<String>>("rest", "trailing")]).unwrap();
        assert_eq!(table.trailing(), Some(0));
        assert_eq!(table.keys().count(), 0);
        assert_eq!(table.descriptor(0).primary_key(), "trailing");

        let err = compile(vec![FieldBinding::readonly::<i32>("rest", "trailing")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTag);

        let err = compile(vec![
            FieldBinding::readonly::<String>("first", "trailing"),
            FieldBinding::readonly::<String>("second", "trailing"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("only one trailing field"));
    }

    #[test]
    fn colliding_keys_are_rejected() {
        let err = compile(vec![
            FieldBinding::readonly::<bool>("cache", "--cache"),
            FieldBinding::readonly::<bool>("no_cache", "--no-cache"),
        ])
        .unwrap_err();
        match err {
            Error::InvalidTag { field, reason, .. } => {
                assert_eq!(field, "no_cache");
                assert_eq!(reason, "key '--no-cache' is already bound");
            }
            other => panic!("expected InvalidTag, got: {other:?}"),
        }
    }

    #[test]
    fn invalid_tag_names_field_and_tag() {
        let err =
            compile(vec![FieldBinding::readonly::<String>("field", ",-s,foo,bar")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "field 'field': invalid tag (got ',-s,foo,bar', expected two or three values)"
        );
    }

    #[test]
    fn display_names() {
        let table = compile(vec![
            FieldBinding::readonly::<String>("a", "--alpha,-a"),
            FieldBinding::readonly::<String>("b", ",-b"),
        ])
        .unwrap();
        assert_eq!(table.descriptor(0).display_name(), "alpha");
        assert_eq!(table.descriptor(0).primary_key(), "--alpha");
        assert_eq!(table.descriptor(1).display_name(), "b");
        assert_eq!(table.descriptor(1).primary_key(), "-b");
    }
}
