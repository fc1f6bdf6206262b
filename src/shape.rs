//! Field-by-field shape checks run ahead of deserialization
//!
//! Every declared field of a payload is checked for presence and type, so a
//! request with several bad fields gets one entry per field instead of the
//! first `serde` error. Bad fields are replaced with placeholders afterwards;
//! the value then deserializes and the `validator` rules still run on the rest
//! of the payload.

use serde_json::{Map, Number, Value};

use crate::errors::{FieldError, Loc};

/// Where a payload was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// JSON bodies, where values carry their own types
    Json,
    /// Query strings and form bodies, where every value is text
    Text,
}

/// A type whose declared fields can be checked on an untyped payload
pub trait Shape {
    fn check_shape(check: &mut FieldCheck<'_>);
}

#[derive(Debug, Clone, Copy)]
enum Scalar {
    Str,
    Float,
    Unsigned,
}

impl Scalar {
    fn type_error(self, loc: Vec<Loc>) -> FieldError {
        match self {
            Scalar::Str => FieldError::new(loc, "str type expected", "type_error.str"),
            Scalar::Float => FieldError::new(loc, "value is not a valid float", "type_error.float"),
            Scalar::Unsigned => FieldError::new(
                loc,
                "value is not a valid non-negative integer",
                "type_error.integer",
            ),
        }
    }

    /// The value in the form `serde` expects, or `None` if it does not fit
    fn coerce(self, value: &Value, source: Source) -> Option<Value> {
        match (self, value) {
            (Scalar::Str, Value::String(_)) | (Scalar::Float, Value::Number(_)) => Some(value.clone()),
            (Scalar::Unsigned, Value::Number(n)) if n.is_u64() => Some(value.clone()),
            (Scalar::Float, Value::String(text)) if source == Source::Text => text
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number),
            (Scalar::Unsigned, Value::String(text)) if source == Source::Text => {
                text.parse::<u64>().ok().map(Value::from)
            }
            _ => None,
        }
    }

    fn placeholder(self) -> Value {
        match self {
            Scalar::Str => Value::String(String::new()),
            Scalar::Float => Value::from(1.0),
            Scalar::Unsigned => Value::from(0u64),
        }
    }
}

enum Repair {
    Keep,
    Remove,
    Replace(Value),
}

fn list_error(loc: Vec<Loc>) -> FieldError {
    FieldError::new(loc, "value is not a valid list", "type_error.list")
}

/// The error for a payload, or part of one, that is not an object
pub fn dict_error(loc: Vec<Loc>) -> FieldError {
    FieldError::new(loc, "value is not a valid dict", "type_error.dict")
}

/// An object that passes the shape of `T`, used in place of a bad nested value
fn placeholder_object<T: Shape>(source: Source) -> Value {
    let mut fields = Map::new();
    {
        let mut scratch = FieldCheck::new(&mut fields, Vec::new(), source);
        T::check_shape(&mut scratch);
    }
    Value::Object(fields)
}

/// Walks the fields of one object, collecting errors and repairing bad values
pub struct FieldCheck<'a> {
    fields: &'a mut Map<String, Value>,
    loc: Vec<Loc>,
    source: Source,
    errors: Vec<FieldError>,
}

impl<'a> FieldCheck<'a> {
    pub fn new(fields: &'a mut Map<String, Value>, loc: Vec<Loc>, source: Source) -> Self {
        Self {
            fields,
            loc,
            source,
            errors: Vec::new(),
        }
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    fn at(&self, name: &str) -> Vec<Loc> {
        let mut loc = self.loc.clone();
        loc.push(Loc::from(name));
        loc
    }

    fn apply(&mut self, name: &str, repair: Repair) {
        match repair {
            Repair::Keep => {}
            Repair::Remove => {
                self.fields.remove(name);
            }
            Repair::Replace(value) => {
                self.fields.insert(name.to_string(), value);
            }
        }
    }

    /// Null counts as absent
    fn scalar(&mut self, name: &str, scalar: Scalar, required: bool) -> &mut Self {
        let loc = self.at(name);
        let source = self.source;
        let current = self
            .fields
            .get(name)
            .filter(|value| !value.is_null())
            .map(|value| scalar.coerce(value, source));

        let repair = match current {
            None if required => {
                self.errors.push(FieldError::missing(loc));
                Repair::Replace(scalar.placeholder())
            }
            None => Repair::Remove,
            Some(Some(typed)) => Repair::Replace(typed),
            Some(None) => {
                self.errors.push(scalar.type_error(loc));
                if required {
                    Repair::Replace(scalar.placeholder())
                } else {
                    Repair::Remove
                }
            }
        };
        self.apply(name, repair);
        self
    }

    pub fn string(&mut self, name: &str) -> &mut Self {
        self.scalar(name, Scalar::Str, true)
    }

    pub fn optional_string(&mut self, name: &str) -> &mut Self {
        self.scalar(name, Scalar::Str, false)
    }

    pub fn float(&mut self, name: &str) -> &mut Self {
        self.scalar(name, Scalar::Float, true)
    }

    pub fn optional_float(&mut self, name: &str) -> &mut Self {
        self.scalar(name, Scalar::Float, false)
    }

    pub fn unsigned(&mut self, name: &str) -> &mut Self {
        self.scalar(name, Scalar::Unsigned, true)
    }

    /// An unsigned integer that falls back to its default when absent
    pub fn optional_unsigned(&mut self, name: &str) -> &mut Self {
        self.scalar(name, Scalar::Unsigned, false)
    }

    /// An optional list of strings; non-string entries are reported by index and dropped
    pub fn string_set(&mut self, name: &str) -> &mut Self {
        let loc = self.at(name);
        let repair = match self.fields.get_mut(name) {
            None => Repair::Keep,
            Some(Value::Null) => Repair::Remove,
            Some(Value::Array(entries)) => {
                for (index, entry) in entries.iter().enumerate() {
                    if !entry.is_string() {
                        let mut entry_loc = loc.clone();
                        entry_loc.push(Loc::Index(index));
                        self.errors.push(Scalar::Str.type_error(entry_loc));
                    }
                }
                entries.retain(Value::is_string);
                Repair::Keep
            }
            Some(_) => {
                self.errors.push(list_error(loc));
                Repair::Remove
            }
        };
        self.apply(name, repair);
        self
    }

    /// A required nested object checked against `T`
    pub fn nested<T: Shape>(&mut self, name: &str) -> &mut Self {
        let loc = self.at(name);
        let source = self.source;
        let repair = match self.fields.get_mut(name) {
            Some(Value::Object(inner)) => {
                let mut child = FieldCheck::new(inner, loc, source);
                T::check_shape(&mut child);
                self.errors.extend(child.into_errors());
                Repair::Keep
            }
            None | Some(Value::Null) => {
                self.errors.push(FieldError::missing(loc));
                Repair::Replace(placeholder_object::<T>(source))
            }
            Some(_) => {
                self.errors.push(dict_error(loc));
                Repair::Replace(placeholder_object::<T>(source))
            }
        };
        self.apply(name, repair);
        self
    }

    /// A list of nested objects, each checked against `T`
    pub fn nested_list<T: Shape>(&mut self, name: &str, required: bool) -> &mut Self {
        let loc = self.at(name);
        let source = self.source;
        let repair = match self.fields.get_mut(name) {
            Some(Value::Array(entries)) => {
                for (index, entry) in entries.iter_mut().enumerate() {
                    let mut entry_loc = loc.clone();
                    entry_loc.push(Loc::Index(index));
                    match entry {
                        Value::Object(inner) => {
                            let mut child = FieldCheck::new(inner, entry_loc, source);
                            T::check_shape(&mut child);
                            self.errors.extend(child.into_errors());
                        }
                        _ => {
                            self.errors.push(dict_error(entry_loc));
                            *entry = placeholder_object::<T>(source);
                        }
                    }
                }
                Repair::Keep
            }
            None | Some(Value::Null) if required => {
                self.errors.push(FieldError::missing(loc));
                Repair::Replace(Value::Array(Vec::new()))
            }
            None | Some(Value::Null) => Repair::Remove,
            Some(_) => {
                self.errors.push(list_error(loc));
                if required {
                    Repair::Replace(Value::Array(Vec::new()))
                } else {
                    Repair::Remove
                }
            }
        };
        self.apply(name, repair);
        self
    }
}
