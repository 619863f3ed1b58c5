//! Left-to-right token routing.
//!
//! Tokens matching a registered key are routed to their descriptor together
//! with the values they consume. Any other token is either ignored (a
//! flag-shaped token still follows it) or starts the trailing run.

use crate::binder::Binder;
use crate::error::Error;
use crate::results::Results;
use crate::tag::Table;
use crate::value::ValueKind;

fn is_flag(token: &str) -> bool {
    token.starts_with('-')
}

/// Explicit boolean words accepted after a flag when valued booleans are enabled.
fn switch_value(token: &str) -> Option<bool> {
    match token {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Walk `args` once, filling descriptor raw values and `results`.
///
/// Stops at the first duplicated argument or missing value. Mandatory
/// fields are checked after the walk so all of them are reported together.
pub(crate) fn walk<S: AsRef<str>>(
    args: &[S],
    table: &mut Table,
    options: &Binder,
    results: &mut Results,
) -> Result<(), Error> {
    let mut i = 0usize;

    while i < args.len() {
        let arg = args[i].as_ref();

        let Some(slot) = table.lookup(arg) else {
            if args[i..].iter().any(|a| is_flag(a.as_ref())) {
                tracing::trace!(token = arg, "ignored token");
                results.ignored.push(arg.to_string());
                i += 1;
                continue;
            }

            if let Some(index) = table.trailing() {
                let desc = table.descriptor_mut(index);
                if desc.writable {
                    desc.found = true;
                    desc.raw.extend(args[i..].iter().map(|a| a.as_ref().to_string()));
                    tracing::trace!(count = args.len() - i, "captured trailing run");
                    break;
                }
            }

            if options.ignore_unclaimed_trailing {
                tracing::trace!(token = arg, "ignored unclaimed trailing token");
                results.ignored.push(arg.to_string());
            } else {
                tracing::trace!(token = arg, "dropped unclaimed trailing token");
            }
            i += 1;
            continue;
        };

        let desc = table.descriptor_mut(slot.index);
        if desc.found {
            results.duplicated.push(arg.to_string());
            return Err(Error::DuplicatedArgument {
                argument: arg.to_string(),
            });
        }
        desc.found = true;

        if !desc.writable {
            tracing::trace!(token = arg, "matched read-only field");
            i += 1;
            continue;
        }

        let kind = desc.kind;
        if kind.is_scalar() {
            match args.get(i + 1).map(AsRef::as_ref) {
                Some(value) if !is_flag(value) => {
                    desc.raw.push(value.to_string());
                    i += 2;
                }
                _ => {
                    results.missing.push(arg.to_string());
                    return Err(Error::MissingArgumentValue {
                        argument: arg.to_string(),
                    });
                }
            }
        } else if kind == ValueKind::Bool {
            let mut value = !slot.negated;
            let mut step = 1;
            if options.boolean_values {
                if let Some(explicit) = args.get(i + 1).and_then(|a| switch_value(a.as_ref())) {
                    value = explicit != slot.negated;
                    step = 2;
                }
            }
            desc.raw.push(value.to_string());
            i += step;
        } else if let Some(window) = kind.window() {
            let values: Vec<String> = args[i + 1..]
                .iter()
                .map(AsRef::as_ref)
                .take_while(|a| !is_flag(a))
                .take(window)
                .map(str::to_string)
                .collect();
            if values.is_empty() {
                results.missing.push(arg.to_string());
                return Err(Error::MissingArgumentValue {
                    argument: arg.to_string(),
                });
            }
            i += 1 + values.len();
            desc.raw.extend(values);
        }
        tracing::trace!(token = arg, kind = %kind, "matched field");
    }

    let names: Vec<String> = table
        .descriptors()
        .iter()
        .filter(|d| d.mandatory && !d.found)
        .map(|d| d.display_name())
        .collect();
    if !names.is_empty() {
        results.mandatory.extend(names.iter().cloned());
        return Err(Error::MandatoryArgument { names });
    }

    tracing::debug!(
        tokens = args.len(),
        ignored = results.ignored.len(),
        "finished matching arguments"
    );
    Ok(())
}
