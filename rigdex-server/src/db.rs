use anyhow::{Context, Result, anyhow};
use url::Url;

/// Reject URLs that cannot point at a PostgreSQL database.
pub fn validate_primary_database_url(base: &str) -> Result<()> {
    let url = Url::parse(base).context("invalid PostgreSQL URL")?;
    if !matches!(url.scheme(), "postgres" | "postgresql") {
        return Err(anyhow!(
            "unsupported database scheme `{}`; expected postgres://",
            url.scheme()
        ));
    }
    let name = url.path().trim_start_matches('/');
    if name.is_empty() {
        return Err(anyhow!("database URL must include database name"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_named_postgres_database() {
        validate_primary_database_url("postgres://rigdex@localhost:5432/rigdex")
            .unwrap();
        validate_primary_database_url("postgresql://localhost/catalog").unwrap();
    }

    #[test]
    fn rejects_missing_name_and_foreign_schemes() {
        assert!(validate_primary_database_url("postgres://localhost").is_err());
        assert!(validate_primary_database_url("mysql://localhost/rigdex").is_err());
        assert!(validate_primary_database_url("not a url").is_err());
    }
}
