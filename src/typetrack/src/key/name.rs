use std::fmt::{Display, Formatter, Result as FmtResult};

/// The name of a registration.
///
/// A registration made without a name is the *default* registration of its
/// type. Absent and empty names are the same thing and are both represented by
/// [`Name::DEFAULT`], which holds the empty string. Any other string is kept
/// verbatim, so `"Named"` and `"named"` are different names.
///
/// Every API in this crate which accepts a name takes `impl Into<Name>`, so
/// the normalization happens exactly once, in the conversions below.
///
/// ```rust
/// # use typetrack::key::Name;
/// assert_eq!(Name::from(""), Name::DEFAULT);
/// assert_eq!(Name::from(None::<&str>), Name::DEFAULT);
/// assert!(Name::from("primary").as_str() == "primary");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(String);

impl Name {
    /// The name of default registrations.
    pub const DEFAULT: Self = Self(String::new());

    pub fn new<S>(raw: Option<S>) -> Self
    where
        S: AsRef<str>,
    {
        match raw {
            Some(raw) => Self(raw.as_ref().to_owned()),
            None => Self::DEFAULT,
        }
    }

    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_default() {
            write!(f, "<default>")
        } else {
            write!(f, "{:?}", self.0)
        }
    }
}

impl From<&str> for Name {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl From<String> for Name {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&String> for Name {
    fn from(raw: &String) -> Self {
        Self(raw.clone())
    }
}

impl From<Option<&str>> for Name {
    fn from(raw: Option<&str>) -> Self {
        Self::new(raw)
    }
}

impl From<Option<String>> for Name {
    fn from(raw: Option<String>) -> Self {
        raw.map(Self).unwrap_or_default()
    }
}

impl From<&Name> for Name {
    fn from(name: &Name) -> Self {
        name.clone()
    }
}
