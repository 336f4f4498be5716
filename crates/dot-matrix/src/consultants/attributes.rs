/// Raised when a form or entity is built from a key it does not recognize.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown attribute: {key}")]
pub struct UnknownAttribute {
    pub key: String,
}

impl UnknownAttribute {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Construction from named string values against an explicit field allowlist.
pub trait Attributes: Default {
    /// Field names accepted by [`Attributes::assign`].
    const FIELDS: &'static [&'static str];

    /// Sets one field. Keys outside [`Attributes::FIELDS`] fail.
    fn assign(&mut self, key: &str, value: String) -> Result<(), UnknownAttribute>;

    fn from_attributes<I, K, V>(values: I) -> Result<Self, UnknownAttribute>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut target = Self::default();
        for (key, value) in values {
            target.assign(key.as_ref(), value.into())?;
        }
        Ok(target)
    }
}
