use std::sync::Arc;

use envconfig::Envconfig;
use lazy_static::lazy_static;
use tokio::sync::Mutex;
use tracing::trace;
use tracing_subscriber::EnvFilter;

lazy_static! {
    pub static ref TEST_CONFIG: Mutex<Option<Arc<TestConfig>>> = Mutex::new(None);
}

#[derive(Debug, Clone, Envconfig)]
pub struct EnvTestConfig {
    #[envconfig(from = "CBCCONNSTR", default = "couchbases://localhost")]
    pub conn_string: String,
    #[envconfig(from = "CBCUSERNAME", default = "Administrator")]
    pub username: String,
    #[envconfig(from = "CBCPASSWORD", default = "password")]
    pub password: String,
    #[envconfig(from = "CBCDATABASE", default = "travel-sample")]
    pub database: String,
    #[envconfig(from = "CBCSCOPE", default = "inventory")]
    pub scope: String,
    #[envconfig(from = "CBCCOLLECTION", default = "airline")]
    pub collection: String,
    #[envconfig(from = "CBCNONPROD", default = "false")]
    pub nonprod: bool,
    #[envconfig(from = "CBCNONPROD_CA_FILE")]
    pub nonprod_ca_file: Option<String>,
    #[envconfig(from = "CBCTLS_VERIFY", default = "true")]
    pub tls_verify: bool,
}

#[derive(Debug, Clone)]
pub struct TestConfig {
    pub conn_string: String,
    pub username: String,
    pub password: String,
    pub database: String,
    pub scope: String,
    pub collection: String,
    pub nonprod: bool,
    pub nonprod_ca_file: Option<String>,
    pub tls_verify: bool,
    pub use_ssl: bool,
}

impl TestConfig {
    pub fn fqdn(&self) -> String {
        format!("`{}`.`{}`.`{}`", self.database, self.scope, self.collection)
    }
}

pub async fn setup_tests() -> Arc<TestConfig> {
    let mut config = TEST_CONFIG.lock().await;

    if config.is_none() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_env("CBCOLUMNAR_TEST_LOG")
                    .unwrap_or_else(|_| EnvFilter::new("couchbase_columnar=trace")),
            )
            .with_test_writer()
            .try_init();

        let test_config = EnvTestConfig::init_from_env().unwrap();
        let conn_spec = couchbase_connstr::parse(&test_config.conn_string).unwrap();

        *config = Some(Arc::new(TestConfig {
            conn_string: test_config.conn_string,
            username: test_config.username,
            password: test_config.password,
            database: test_config.database,
            scope: test_config.scope,
            collection: test_config.collection,
            nonprod: test_config.nonprod,
            nonprod_ca_file: test_config.nonprod_ca_file,
            tls_verify: test_config.tls_verify,
            use_ssl: conn_spec.use_ssl(),
        }));

        trace!("{:?}", &config);
    }

    config.clone().unwrap()
}
