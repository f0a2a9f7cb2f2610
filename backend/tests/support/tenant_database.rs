//! Per-suite databases on the embedded cluster, addressed the way a tenant
//! would address them: host, port, database name, and role credentials.

use postgres::{Client, NoTls};
use sql_connector::domain::DatabaseTarget;
use sql_connector::outbound::persistence::DatabaseCredentials;
use url::Url;

use super::format_postgres_error;

/// A freshly created database plus what an adapter needs to reach it.
pub struct TenantDatabase {
    /// Host, port, and database name.
    pub target: DatabaseTarget,
    /// Cluster superuser credentials.
    pub credentials: DatabaseCredentials,
    /// `postgresql://` URL for direct assertions.
    pub url: String,
}

/// Drop and recreate `name` on the cluster behind `admin_url`.
///
/// `admin_url` must point at an existing database such as `postgres`.
pub fn provision_tenant_database(admin_url: &str, name: &str) -> Result<TenantDatabase, String> {
    let mut admin = Client::connect(admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    // Each statement runs on its own; CREATE DATABASE refuses a transaction block.
    for statement in [
        format!("DROP DATABASE IF EXISTS \"{name}\""),
        format!("CREATE DATABASE \"{name}\""),
    ] {
        admin
            .batch_execute(&statement)
            .map_err(|err| format_postgres_error(&err))?;
    }

    let mut url = Url::parse(admin_url).map_err(|err| err.to_string())?;
    url.set_path(name);
    let host = url.host_str().ok_or("cluster URL has no host")?.to_owned();
    let port = url.port().unwrap_or(5432);
    let user = url.username().to_owned();
    let password = url.password().unwrap_or_default().to_owned();

    let target = DatabaseTarget::new(host, port, name).map_err(|err| err.to_string())?;
    Ok(TenantDatabase {
        target,
        credentials: DatabaseCredentials::new(user, password),
        url: url.to_string(),
    })
}
