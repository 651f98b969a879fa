//! Backend dialect identification

/// The SQL dialect a query is rendered for.
///
/// Rendering itself lives in `squall-core`; this enum only names the
/// backend so sessions and configuration files can select a renderer.
///
/// ```
/// use squall_types::Dialect;
///
/// assert_eq!("pg".parse::<Dialect>(), Ok(Dialect::PostgreSQL));
/// assert_eq!(Dialect::MySQL.to_string(), "mysql");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dialect {
    #[default]
    SQLite,
    #[cfg_attr(feature = "serde", serde(alias = "postgres", alias = "pg"))]
    PostgreSQL,
    #[cfg_attr(feature = "serde", serde(alias = "mariadb"))]
    MySQL,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::SQLite, Dialect::PostgreSQL, Dialect::MySQL];

    /// Canonical lowercase name, as accepted by `FromStr` and serde.
    pub const fn name(&self) -> &'static str {
        match self {
            Dialect::SQLite => "sqlite",
            Dialect::PostgreSQL => "postgresql",
            Dialect::MySQL => "mysql",
        }
    }
}

impl core::fmt::Display for Dialect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for Dialect {
    type Err = DialectParseError;

    /// Case-insensitive; also accepts `postgres`, `pg` and `mariadb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "sqlite" => Ok(Dialect::SQLite),
            "postgresql" | "postgres" | "pg" => Ok(Dialect::PostgreSQL),
            "mysql" | "mariadb" => Ok(Dialect::MySQL),
            _ => Err(DialectParseError(s.to_owned())),
        }
    }
}

/// An unrecognised dialect name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectParseError(pub String);

impl core::fmt::Display for DialectParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unknown dialect `{}`", self.0)
    }
}

impl std::error::Error for DialectParseError {}
