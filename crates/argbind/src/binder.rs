//! Binding options and the entry point tying compile, match and coerce together.

use crate::binding::{Bind, FieldBinding};
use crate::error::Failure;
use crate::results::Results;
use crate::tag::Table;
use crate::{coerce, matcher};

/// Binding options.
///
/// The defaults give plain flag booleans and silently drop a trailing run
/// nothing claims.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Binder {
    pub(crate) boolean_values: bool,
    pub(crate) ignore_unclaimed_trailing: bool,
}

impl Binder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let a boolean flag consume one explicit `true`/`1`/`yes` or
    /// `false`/`0`/`no` token. A `--no-` key inverts the explicit value.
    pub fn boolean_values(mut self, enabled: bool) -> Self {
        self.boolean_values = enabled;
        self
    }

    /// Report a final run of loose tokens as ignored when the record has no
    /// writable trailing field, instead of dropping it.
    pub fn ignore_unclaimed_trailing(mut self, enabled: bool) -> Self {
        self.ignore_unclaimed_trailing = enabled;
        self
    }

    /// Bind `args` into `target` using the record's derived field table.
    pub fn bind<T: Bind, S: AsRef<str>>(
        &self,
        args: &[S],
        target: &mut T,
    ) -> Result<Results, Failure> {
        let bindings = T::bindings();
        self.bind_with(&bindings, args, target)
    }

    /// Bind `args` into `target` using an explicit field table.
    ///
    /// On failure the returned [`Failure`] still carries everything recorded
    /// before the fatal condition. A tag error is raised before any argument
    /// is read, so its results are empty.
    pub fn bind_with<T, S: AsRef<str>>(
        &self,
        bindings: &[FieldBinding<T>],
        args: &[S],
        target: &mut T,
    ) -> Result<Results, Failure> {
        let mut table =
            Table::compile(bindings).map_err(|error| Failure::new(error, Results::default()))?;
        let mut results = Results::default();

        if let Err(error) = matcher::walk(args, &mut table, self, &mut results) {
            tracing::debug!(%error, "argument matching failed");
            return Err(Failure::new(error, results));
        }
        if let Err(error) = coerce::apply(&mut table, bindings, target, &mut results) {
            return Err(Failure::new(error, results));
        }

        tracing::debug!(
            warnings = results.has_warnings(),
            "bound {} argument(s)",
            args.len()
        );
        Ok(results)
    }
}

/// Bind `args` into `target` with default options.
pub fn bind<T: Bind, S: AsRef<str>>(args: &[S], target: &mut T) -> Result<Results, Failure> {
    Binder::default().bind(args, target)
}
