//! Conversion of accumulated raw values into typed field values.

use crate::binding::FieldBinding;
use crate::error::Error;
use crate::results::Results;
use crate::tag::Table;
use crate::value::{Value, ValueError, ValueKind};

/// Values above `i128::MAX` keep their bits so `u128` fields read them back exactly.
fn parse_int(raw: &str, expected: &'static str) -> Result<i128, ValueError> {
    raw.parse::<i128>()
        .or_else(|_| raw.parse::<u128>().map(|n| n as i128))
        .map_err(|_| ValueError::Invalid {
            value: raw.to_string(),
            expected,
        })
}

fn parse_ints<'a>(
    raw: impl Iterator<Item = &'a String>,
    expected: &'static str,
) -> Result<Vec<i128>, ValueError> {
    raw.map(|r| parse_int(r, expected)).collect()
}

/// Convert raw command-line strings into a value of the given kind.
///
/// Scalars look at the first raw value only. Integers are parsed as base-10
/// and narrowed later by the field's own type. Arrays keep at most their
/// declared length.
pub fn coerce(kind: ValueKind, raw: &[String]) -> Result<Value, ValueError> {
    let first = raw.first().map(String::as_str).unwrap_or_default();
    let expected = kind.expected();

    match kind {
        ValueKind::Str => Ok(Value::Str(first.to_string())),
        ValueKind::Int(_) | ValueKind::Uint(_) => parse_int(first, expected).map(Value::Int),
        ValueKind::Float(_) => first
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| ValueError::Invalid {
                value: first.to_string(),
                expected,
            }),
        ValueKind::Bool => Ok(Value::Bool(first == "true")),
        ValueKind::StrList => Ok(Value::StrList(raw.to_vec())),
        ValueKind::IntList => parse_ints(raw.iter(), expected).map(Value::IntList),
        ValueKind::StrArray(len) => Ok(Value::StrList(raw.iter().take(len).cloned().collect())),
        ValueKind::IntArray(len) => parse_ints(raw.iter().take(len), expected).map(Value::IntList),
    }
}

/// Write every matched descriptor into `target`, in declaration order.
///
/// The first conversion failure is recorded under the field's primary key
/// and aborts the remaining writes.
pub(crate) fn apply<T>(
    table: &mut Table,
    bindings: &[FieldBinding<T>],
    target: &mut T,
    results: &mut Results,
) -> Result<(), Error> {
    let mut written = 0usize;

    for desc in table.descriptors_mut() {
        if !desc.writable || desc.raw.is_empty() || desc.visited {
            continue;
        }
        desc.visited = true;

        let Some(write) = bindings[desc.field].writer() else {
            continue;
        };
        if let Err(source) = coerce(desc.kind, &desc.raw).and_then(|value| write(target, value)) {
            let argument = desc.primary_key();
            tracing::debug!(argument = %argument, error = %source, "failed to coerce value");
            results.unexpected.push(argument.clone());
            return Err(Error::UnexpectedArgument { argument, source });
        }
        written += 1;
    }

    tracing::debug!(written, "applied bound values");
    Ok(())
}
