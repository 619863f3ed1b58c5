//! Static field tables describing a destination record.

use std::borrow::Cow;
use std::fmt;

use crate::value::{BindValue, Value, ValueError, ValueKind};

/// Stores a coerced value into one field of `T`.
pub type Writer<T> = fn(&mut T, Value) -> Result<(), ValueError>;

/// One bindable field of a destination record: its name, its tag text, the
/// shape of value it expects and how to write it.
pub struct FieldBinding<T> {
    name: Cow<'static, str>,
    tag: Cow<'static, str>,
    kind: ValueKind,
    writer: Option<Writer<T>>,
}

impl<T> FieldBinding<T> {
    /// Bind a field of type `F`.
    ///
    /// ```rust,ignore
    /// FieldBinding::<Config>::field::<u16>("port", ",-P,mandatory", |c, v| {
    ///     argbind::assign(&mut c.port, v)
    /// })
    /// ```
    pub fn field<F: BindValue>(
        name: impl Into<Cow<'static, str>>,
        tag: impl Into<Cow<'static, str>>,
        writer: Writer<T>,
    ) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            kind: F::kind(),
            writer: Some(writer),
        }
    }

    /// Bind a field of type `F` that is recognized on the command line but
    /// never written.
    pub fn readonly<F: BindValue>(
        name: impl Into<Cow<'static, str>>,
        tag: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            kind: F::kind(),
            writer: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_writable(&self) -> bool {
        self.writer.is_some()
    }

    pub(crate) fn writer(&self) -> Option<Writer<T>> {
        self.writer
    }
}

impl<T> Clone for FieldBinding<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            tag: self.tag.clone(),
            kind: self.kind,
            writer: self.writer,
        }
    }
}

impl<T> fmt::Debug for FieldBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("kind", &self.kind)
            .field("writable", &self.is_writable())
            .finish()
    }
}

/// A record whose fields can be bound from command-line arguments.
///
/// Usually derived:
///
/// ```rust,ignore
/// #[derive(Default, argbind::Bind)]
/// struct Config {
///     #[bind("--extensions,-e,mandatory")]
///     extensions: Vec<String>,
///     #[bind("--verbose,-v")]
///     verbose: bool,
///     #[bind("trailing")]
///     directories: Vec<String>,
/// }
/// ```
///
/// Fields without a `#[bind]` attribute are left out of the table and never
/// touched.
pub trait Bind: Sized {
    fn bindings() -> Vec<FieldBinding<Self>>;
}
